//! CSR register groups.
//!
//! One device per group, each owning a `RegisterBank` and mapping the
//! fabric signals it cares about onto its status registers.

pub mod audio;
pub mod bridge;
pub mod id;
pub mod input;
pub mod rtc;
pub mod video;

pub use audio::{Audio, AudioSample, SampleFifo};
pub use bridge::Bridge;
pub use id::ChipId;
pub use input::Input;
pub use rtc::Rtc;
pub use video::Video;
