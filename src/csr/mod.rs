//! Control/Status Register primitives.
//!
//! Building blocks shared by every register group: typed registers, the
//! per-group register bank, the read-clear edge latch, the clock-domain
//! synchronizer and the generated register map.

pub mod bank;
pub mod latch;
pub mod map;
pub mod register;
pub mod sync;

pub use bank::{RegisterBank, WriteEffect};
pub use latch::EdgeLatch;
pub use map::{RegisterDesc, RegisterMap};
pub use register::{AccessMode, CsrKind, Register};
pub use sync::Synchronizer;
