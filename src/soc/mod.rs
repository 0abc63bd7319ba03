//! System-on-Chip components.
//!
//! The CSR bus, the register groups attached to it, and the builder that
//! wires them together from the configuration.

pub mod builder;
pub mod devices;
pub mod interconnect;
pub mod traits;

pub use builder::System;
pub use interconnect::Bus;
pub use traits::CsrDevice;
