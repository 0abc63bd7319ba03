//! Simulation harness around the register bridge.
//!
//! Fabric signal definitions, the transfer engine model, the video timing
//! stimulus, slot asset loading and the stepped evaluation loop.

pub mod loader;
pub mod runner;
pub mod signals;
pub mod timing;
pub mod transfer;

pub use runner::Simulator;
pub use signals::{ExternalSignals, FabricOutputs, TransferRequest};
pub use timing::VideoTiming;
pub use transfer::{SlotTransferEngine, TransferEngine};
