//! Fabric-side signals.
//!
//! `ExternalSignals` is everything the hardware drives into the register
//! bridge; tests and the simulator inject events by mutating it between
//! steps. `FabricOutputs` is everything the bridge drives back out: storage
//! values and the strobe pulses of the step just evaluated.

use crate::common::constants::CONTROLLER_PORTS;

/// Signals from the host bridge transfer engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeSignals {
    /// Pulses high when a transfer finishes.
    pub complete_trigger: bool,
    /// Size of the asset in the selected slot.
    pub file_size: u32,
    /// Address the engine is currently writing.
    pub current_address: u32,
}

/// Raw words reported for one controller port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub key: u32,
    pub joy: u32,
    pub trig: u32,
}

/// Real-time clock values supplied at launch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RtcSignals {
    pub unix_seconds: u32,
    pub date_bcd: u32,
    pub time_bcd: u32,
}

/// Outputs of the video timing generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VideoSignals {
    pub vsync: bool,
    /// Current line; lines at or past the active height are vertical blank.
    pub vcount: u32,
}

/// Every hardware-side input of the register bridge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExternalSignals {
    pub bridge: BridgeSignals,
    pub controllers: [ControllerState; CONTROLLER_PORTS],
    pub rtc: RtcSignals,
    pub video: VideoSignals,
    pub chip_id: u64,
}

/// Parameters of a bridge read, captured when `request_read` is strobed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransferRequest {
    pub slot_id: u16,
    pub data_offset: u32,
    pub length: u32,
    pub ram_data_address: u32,
}

/// Bridge storage values and the request pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BridgeOutputs {
    pub slot_id: u16,
    pub data_offset: u32,
    pub transfer_length: u32,
    pub ram_data_address: u32,
    /// Present for exactly the step following a `request_read` write.
    pub request: Option<TransferRequest>,
}

/// Audio control outputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioOutputs {
    pub playback_en: bool,
    /// `buffer_flush` was strobed before this step.
    pub flush: bool,
    /// Number of `audio.out` writes since the previous step.
    pub samples_written: u32,
}

/// Everything the register bridge drives into the fabric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FabricOutputs {
    pub bridge: BridgeOutputs,
    pub audio: AudioOutputs,
}
