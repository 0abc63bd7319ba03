//! Register Bridge Errors.
//!
//! Almost every register operation is total: writes are masked to the
//! register width and status updates cannot fail. The only failures are
//! accesses that have no defined meaning, such as reading a strobe.

use std::fmt;

use super::data::AccessType;

/// Result alias used by all bus-facing operations.
pub type CsrResult<T> = Result<T, CsrError>;

/// Errors raised by the register bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CsrError {
    /// The register exists but does not support this access
    /// (reading a write-only strobe register, or writing a read-only
    /// register on a strict bus).
    InvalidAccess {
        /// Fully qualified register name, e.g. `bridge.request_read`.
        name: String,
        /// The access that was attempted.
        access: AccessType,
    },

    /// No device region decodes this address.
    UnmappedAddress(u64),

    /// A device region decodes the address but no register lives there.
    UnmappedOffset {
        /// Device that owns the region.
        device: String,
        /// Byte offset within the device region.
        offset: u64,
    },

    /// No register carries this name.
    UnknownRegister(String),

    /// Address is not aligned to a 32-bit CSR word.
    Misaligned(u64),

    /// Configuration could not be read or parsed.
    Config(String),
}

impl fmt::Display for CsrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsrError::InvalidAccess { name, access } => {
                write!(f, "InvalidAccess: {} of {}", access, name)
            }
            CsrError::UnmappedAddress(addr) => write!(f, "UnmappedAddress: {:#010x}", addr),
            CsrError::UnmappedOffset { device, offset } => {
                write!(f, "UnmappedOffset: {} + {:#x}", device, offset)
            }
            CsrError::UnknownRegister(name) => write!(f, "UnknownRegister: {}", name),
            CsrError::Misaligned(addr) => write!(f, "Misaligned: {:#010x}", addr),
            CsrError::Config(msg) => write!(f, "Config: {}", msg),
        }
    }
}

impl std::error::Error for CsrError {}
