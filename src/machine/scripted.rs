//! A deterministic machine whose RAM and pixels are driven by a closure.
//!
//! `ScriptedMachine` stands in for a real emulator core when exercising the
//! episode loop headless: each frame advance hands the script the frame
//! number, both joystick inputs and mutable access to RAM and pixels. The
//! script plays the part of the game program.
//!
//! ```
//! use arcade_env::core::Action;
//! use arcade_env::machine::{Machine, MemoryReader, ScriptedMachine};
//!
//! // A "game" that counts fire presses at 0x80.
//! let mut machine = ScriptedMachine::new(8, 8).with_script(|f| {
//!     if f.primary.inputs().fire {
//!         f.ram[0] += 1;
//!     }
//! });
//! machine.reset_to_power_on();
//! machine.advance_frame(Action::Fire, Action::Noop);
//! machine.advance_frame(Action::Left, Action::Noop);
//! assert_eq!(machine.peek(0x80), 1);
//! ```

use std::fmt;

use crate::core::{Action, EnvError, Result};

use super::{ram_index, Machine, MemoryReader, Rom, RAM_SIZE};

/// Per-frame program run by a `ScriptedMachine`.
pub type FrameScript = Box<dyn FnMut(&mut ScriptFrame<'_>) + Send>;

/// What a script sees during one frame advance.
pub struct ScriptFrame<'a> {
    /// Frames advanced since power-on, including this one.
    pub frame: u64,
    pub primary: Action,
    pub secondary: Action,
    /// The 128-byte RAM window; index with `ram_index(address)`.
    pub ram: &'a mut [u8],
    pub pixels: &'a mut [u8],
}

/// Headless machine with scripted behavior.
pub struct ScriptedMachine {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    ram: Vec<u8>,
    power_on_ram: Vec<u8>,
    frame: u64,
    cartridge: Option<Vec<u8>>,
    script: Option<FrameScript>,
    power_ons: u32,
    reset_presses: u32,
    last_input: Option<(Action, Action)>,
}

impl ScriptedMachine {
    /// Create a machine with a blank frame of the given size and zeroed RAM.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            ram: vec![0; RAM_SIZE],
            power_on_ram: vec![0; RAM_SIZE],
            frame: 0,
            cartridge: None,
            script: None,
            power_ons: 0,
            reset_presses: 0,
            last_input: None,
        }
    }

    /// Install the per-frame script.
    #[must_use]
    pub fn with_script<F>(mut self, script: F) -> Self
    where
        F: FnMut(&mut ScriptFrame<'_>) + Send + 'static,
    {
        self.script = Some(Box::new(script));
        self
    }

    /// Byte loaded at `address` on every power-on.
    #[must_use]
    pub fn with_power_on_byte(mut self, address: u16, value: u8) -> Self {
        self.power_on_ram[ram_index(address)] = value;
        self
    }

    /// Write a RAM byte directly.
    pub fn poke(&mut self, address: u16, value: u8) {
        self.ram[ram_index(address)] = value;
    }

    /// Mutable frame buffer.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Frames advanced since the last power-on, reset-switch frames included.
    #[must_use]
    pub fn frames_since_power_on(&self) -> u64 {
        self.frame
    }

    /// Number of power-on resets performed.
    #[must_use]
    pub fn power_on_count(&self) -> u32 {
        self.power_ons
    }

    /// Number of reset-switch frames since the last power-on.
    #[must_use]
    pub fn reset_presses(&self) -> u32 {
        self.reset_presses
    }

    /// Inputs of the most recent `advance_frame`.
    #[must_use]
    pub fn last_input(&self) -> Option<(Action, Action)> {
        self.last_input
    }

    /// The inserted cartridge image.
    #[must_use]
    pub fn cartridge(&self) -> Option<&[u8]> {
        self.cartridge.as_deref()
    }
}

impl fmt::Debug for ScriptedMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedMachine")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame", &self.frame)
            .field("scripted", &self.script.is_some())
            .finish_non_exhaustive()
    }
}

impl MemoryReader for ScriptedMachine {
    fn peek(&self, address: u16) -> u8 {
        self.ram[ram_index(address)]
    }
}

impl Machine for ScriptedMachine {
    fn insert_cartridge(&mut self, rom: &Rom) -> Result<()> {
        if rom.image().is_empty() {
            return Err(EnvError::RomUnreadable {
                path: rom.path().map(|p| p.to_path_buf()).unwrap_or_default(),
                reason: "empty cartridge image".to_string(),
            });
        }
        self.cartridge = Some(rom.image().to_vec());
        Ok(())
    }

    fn reset_to_power_on(&mut self) {
        self.ram.copy_from_slice(&self.power_on_ram);
        self.pixels.fill(0);
        self.frame = 0;
        self.reset_presses = 0;
        self.last_input = None;
        self.power_ons += 1;
    }

    fn hold_reset_switch(&mut self) {
        self.frame += 1;
        self.reset_presses += 1;
    }

    fn advance_frame(&mut self, primary: Action, secondary: Action) {
        self.frame += 1;
        self.last_input = Some((primary, secondary));

        if let Some(script) = self.script.as_mut() {
            let mut frame = ScriptFrame {
                frame: self.frame,
                primary,
                secondary,
                ram: &mut self.ram,
                pixels: &mut self.pixels,
            };
            script(&mut frame);
        }
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }
}
