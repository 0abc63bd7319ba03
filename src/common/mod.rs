//! Common types used throughout the register bridge simulator.
//!
//! This module provides the access classification, the error type and
//! the constants shared by the register bank, the bus and the devices.

/// Common constants used throughout the simulator.
pub mod constants;

/// Bus access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use data::AccessType;
pub use error::{CsrError, CsrResult};

pub use constants::{CSR_WORD_BYTES, CSR_WORD_BITS};
