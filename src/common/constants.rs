//! Shared constants.

/// Data width of the CSR bus in bits.
pub const CSR_WORD_BITS: u32 = 32;

/// Data width of the CSR bus in bytes.
pub const CSR_WORD_BYTES: u64 = 4;

/// Default base address of the CSR window.
pub const DEFAULT_CSR_BASE: u64 = 0xF000_0000;

/// Default size of one register group region.
pub const DEFAULT_REGION_SIZE: u64 = 0x800;

/// Entries in the audio sample FIFO.
pub const AUDIO_FIFO_DEPTH: usize = 4096;

/// Largest value `audio.buffer_fill` can report (12-bit status).
pub const AUDIO_FILL_MAX: u32 = 0xFFF;

/// Transfer length that asks the bridge for the whole file.
pub const BRIDGE_MAX_LENGTH: u32 = 0xFFFF_FFFF;

/// Number of controller ports exposed by the input group.
pub const CONTROLLER_PORTS: usize = 4;
