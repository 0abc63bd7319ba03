//! CSR Register Definitions.
//!
//! A register is one named, fixed-width value on the CSR bus. Its kind
//! decides who may change it: the CPU (storage), the hardware (status),
//! or nobody, because writes only produce a pulse (strobe).

use serde::Serialize;

use crate::common::CSR_WORD_BITS;

/// Behaviour of a register on the CPU bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsrKind {
    /// Write-only; every write is a one-cycle pulse to the fabric.
    Strobe,
    /// Read-write value held for the fabric.
    Storage,
    /// Read-only value driven by the fabric.
    Status,
    /// Read-only single bit captured by an edge latch, cleared on read.
    LatchedStatus,
}

impl CsrKind {
    /// Access mode visible to host software.
    pub fn mode(&self) -> AccessMode {
        match self {
            CsrKind::Strobe => AccessMode::WriteOnly,
            CsrKind::Storage => AccessMode::ReadWrite,
            CsrKind::Status | CsrKind::LatchedStatus => AccessMode::ReadOnly,
        }
    }

    /// Whether reading the register has a clearing side effect.
    pub fn read_clears(&self) -> bool {
        matches!(self, CsrKind::LatchedStatus)
    }
}

/// Access mode as published in the generated register map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AccessMode {
    #[serde(rename = "ro")]
    ReadOnly,
    #[serde(rename = "rw")]
    ReadWrite,
    #[serde(rename = "wo")]
    WriteOnly,
}

impl AccessMode {
    pub fn can_read(&self) -> bool {
        !matches!(self, AccessMode::WriteOnly)
    }

    pub fn can_write(&self) -> bool {
        !matches!(self, AccessMode::ReadOnly)
    }
}

/// A single control/status register.
#[derive(Clone, Debug)]
pub struct Register {
    /// Name within the owning group, e.g. `slot_id`.
    pub name: &'static str,
    /// Bus behaviour.
    pub kind: CsrKind,
    /// Width in bits (1..=64).
    pub width: u32,
    value: u64,
}

impl Register {
    /// Creates a register holding zero.
    pub fn new(name: &'static str, kind: CsrKind, width: u32) -> Self {
        assert!(
            (1..=64).contains(&width),
            "register {} has invalid width {}",
            name,
            width
        );
        Self {
            name,
            kind,
            width,
            value: 0,
        }
    }

    /// Bit mask covering the register width.
    pub fn mask(&self) -> u64 {
        width_mask(self.width)
    }

    /// Number of 32-bit bus words the register occupies.
    pub fn words(&self) -> usize {
        self.width.div_ceil(CSR_WORD_BITS) as usize
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Stores a value, truncated to the register width.
    pub fn set(&mut self, value: u64) {
        self.value = value & self.mask();
    }

    /// Returns bus word `word` of the value, most significant word first.
    pub fn word(&self, word: usize) -> u32 {
        (self.value >> self.word_shift(word)) as u32
    }

    /// Replaces bus word `word`, leaving the other words untouched.
    pub fn set_word(&mut self, word: usize, data: u32) {
        let shift = self.word_shift(word);
        let cleared = self.value & !(0xFFFF_FFFFu64 << shift);
        self.set(cleared | ((data as u64) << shift));
    }

    fn word_shift(&self, word: usize) -> u32 {
        CSR_WORD_BITS * (self.words() - 1 - word) as u32
    }
}

/// Mask with the low `width` bits set.
pub fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_split_msb_first() {
        let mut reg = Register::new("chip_id", CsrKind::Status, 64);
        reg.set(0x0123_4567_89AB_CDEF);
        assert_eq!(reg.words(), 2);
        assert_eq!(reg.word(0), 0x0123_4567);
        assert_eq!(reg.word(1), 0x89AB_CDEF);

        reg.set_word(1, 0xDEAD_BEEF);
        assert_eq!(reg.value(), 0x0123_4567_DEAD_BEEF);
    }

    #[test]
    fn test_set_truncates_to_width() {
        let mut reg = Register::new("buffer_fill", CsrKind::Status, 12);
        reg.set(0x1FFF);
        assert_eq!(reg.value(), 0xFFF);
    }
}
