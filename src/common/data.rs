//! Bus Access Types.
//!
//! This module defines the classification of bus accesses used by the
//! register bank and the error type. An access is either a CPU-side read
//! or a CPU-side write; hardware-side updates never go through the bus.

use std::fmt;

/// Type of bus access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// CPU read of a register word.
    ///
    /// Reads of read-clear status registers have a side effect.
    Read,

    /// CPU write of a register word.
    ///
    /// Writes to strobe registers are interpreted as one-shot events.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessType::Read => write!(f, "read"),
            AccessType::Write => write!(f, "write"),
        }
    }
}
