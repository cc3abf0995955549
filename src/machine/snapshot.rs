//! One frame's captured pixels and RAM.

use serde::{Deserialize, Serialize};

use super::{ram_index, Machine, MemoryReader, RAM_BASE, RAM_SIZE};

/// Pixel buffer and RAM captured after a completed frame advance.
///
/// The controller owns exactly one snapshot and overwrites it in place on
/// every capture, so accessors always reflect the last full frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    frame: u64,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    ram: Vec<u8>,
}

impl MachineSnapshot {
    /// Build a snapshot from raw parts. `pixels` must hold `width * height` bytes.
    pub fn from_parts(frame: u64, width: usize, height: usize, pixels: Vec<u8>, ram: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), width * height, "pixel buffer does not match dimensions");
        assert_eq!(ram.len(), RAM_SIZE, "RAM must be {} bytes", RAM_SIZE);
        Self {
            frame,
            width,
            height,
            pixels,
            ram,
        }
    }

    /// Capture a fresh snapshot of `machine`.
    pub fn capture<M: Machine + ?Sized>(machine: &M, frame: u64) -> Self {
        let mut snapshot = Self::default();
        snapshot.capture_from(machine, frame);
        snapshot
    }

    /// Overwrite this snapshot from `machine`, reusing the buffers.
    pub fn capture_from<M: Machine + ?Sized>(&mut self, machine: &M, frame: u64) {
        self.frame = frame;
        self.width = machine.width();
        self.height = machine.height();

        self.pixels.clear();
        self.pixels.extend_from_slice(machine.pixels());

        self.ram.clear();
        self.ram
            .extend((0..RAM_SIZE as u16).map(|offset| machine.peek(RAM_BASE + offset)));
    }

    /// Episode frame this snapshot was taken at.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel buffer.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at (`row`, `col`), or `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.pixels.get(row * self.width + col).copied()
    }

    /// Iterate over pixel rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(self.width.max(1))
    }

    /// The 128 RAM bytes, starting at `RAM_BASE`.
    #[must_use]
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }
}

impl MemoryReader for MachineSnapshot {
    fn peek(&self, address: u16) -> u8 {
        self.ram.get(ram_index(address)).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::ScriptedMachine;

    #[test]
    fn test_capture_copies_ram_and_pixels() {
        let mut machine = ScriptedMachine::new(4, 3);
        machine.poke(0x9E, 0x50);
        machine.pixels_mut()[5] = 7;

        let snapshot = MachineSnapshot::capture(&machine, 12);

        assert_eq!(snapshot.frame(), 12);
        assert_eq!(snapshot.width(), 4);
        assert_eq!(snapshot.height(), 3);
        assert_eq!(snapshot.ram().len(), RAM_SIZE);
        assert_eq!(snapshot.peek(0x9E), 0x50);
        assert_eq!(snapshot.pixel(1, 1), Some(7));
        assert_eq!(snapshot.pixel(3, 0), None);
        assert_eq!(snapshot.rows().count(), 3);
    }

    #[test]
    fn test_snapshot_is_detached_from_machine() {
        let mut machine = ScriptedMachine::new(2, 2);
        let snapshot = MachineSnapshot::capture(&machine, 0);

        machine.poke(0x80, 9);
        assert_eq!(snapshot.peek(0x80), 0);
    }

    #[test]
    fn test_from_parts() {
        let snapshot = MachineSnapshot::from_parts(1, 2, 1, vec![3, 4], vec![0; RAM_SIZE]);
        assert_eq!(snapshot.pixel(0, 1), Some(4));
    }

    #[test]
    #[should_panic(expected = "pixel buffer does not match dimensions")]
    fn test_from_parts_bad_dimensions() {
        MachineSnapshot::from_parts(0, 3, 3, vec![0; 4], vec![0; RAM_SIZE]);
    }
}
