//! The emulated machine, seen through the narrow interface the episode loop needs.
//!
//! The emulator itself lives outside this crate. Anything that can power on,
//! advance one frame under a pair of joystick inputs, expose its frame buffer
//! and answer RAM peeks can drive an `EpisodeController`.
//!
//! ## Porting constraint
//!
//! Controllers may coexist only if each owns an independent machine. An
//! emulator core that keeps process-wide mutable state cannot back more than
//! one controller at a time.

pub mod rom;
pub mod scripted;
pub mod snapshot;

pub use rom::Rom;
pub use scripted::{FrameScript, ScriptFrame, ScriptedMachine};
pub use snapshot::MachineSnapshot;

use crate::core::{Action, Result};

/// First address of the console's 128 bytes of RAM.
pub const RAM_BASE: u16 = 0x80;

/// Bytes of console RAM.
pub const RAM_SIZE: usize = 128;

/// Map any address onto its index in the 128-byte RAM window.
///
/// The RAM is mirrored, so only the low seven bits select a byte.
#[must_use]
pub const fn ram_index(address: u16) -> usize {
    (address & 0x7F) as usize
}

/// Read-only view of console RAM.
///
/// Adapters decode game state through this trait only, so they can be
/// exercised against a snapshot or a plain byte table without an emulator.
pub trait MemoryReader {
    /// Read the byte at `address` (mirrored into the RAM window).
    fn peek(&self, address: u16) -> u8;
}

impl MemoryReader for [u8] {
    fn peek(&self, address: u16) -> u8 {
        self.get(ram_index(address)).copied().unwrap_or(0)
    }
}

impl MemoryReader for Vec<u8> {
    fn peek(&self, address: u16) -> u8 {
        self.as_slice().peek(address)
    }
}

/// The machine collaborator.
pub trait Machine: MemoryReader {
    /// Insert a cartridge image. Fails with `RomUnreadable` if the image is rejected.
    fn insert_cartridge(&mut self, rom: &Rom) -> Result<()>;

    /// Return to the power-on state with the current cartridge.
    fn reset_to_power_on(&mut self);

    /// Advance one frame with the console's reset switch held down.
    fn hold_reset_switch(&mut self);

    /// Advance one frame with `primary` on the first joystick and `secondary` on the second.
    fn advance_frame(&mut self, primary: Action, secondary: Action);

    /// Current frame buffer, row-major, one palette index per pixel.
    fn pixels(&self) -> &[u8];

    /// Frame width in pixels.
    fn width(&self) -> usize;

    /// Frame height in pixels.
    fn height(&self) -> usize;
}
