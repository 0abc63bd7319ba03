//! Stepped evaluation loop.
//!
//! Binds the register bridge to its fabric: each step optionally advances
//! the video timing stimulus, evaluates every register group against the
//! current `ExternalSignals`, then lets the transfer engine react to the
//! outputs. Engine responses land in the signals for the following step.

use crate::common::CsrResult;
use crate::config::Config;
use crate::sim::signals::{ExternalSignals, FabricOutputs};
use crate::sim::timing::VideoTiming;
use crate::sim::transfer::{SlotTransferEngine, TransferEngine};
use crate::soc::{Bus, System};

/// Single-threaded simulator around one `System`.
pub struct Simulator {
    pub system: System,
    pub engine: SlotTransferEngine,
    signals: ExternalSignals,
    timing: Option<VideoTiming>,
}

impl Simulator {
    pub fn new(config: &Config) -> CsrResult<Self> {
        Ok(Self {
            system: System::new(config)?,
            engine: SlotTransferEngine::new(&config.bridge),
            signals: ExternalSignals::default(),
            timing: None,
        })
    }

    /// Drives vsync/vcount from a `VideoTiming` generator instead of
    /// leaving them to injection.
    pub fn with_video_timing(mut self, config: &Config) -> Self {
        self.timing = Some(VideoTiming::new(&config.video));
        self
    }

    /// Injection hook for hardware-side events.
    pub fn signals_mut(&mut self) -> &mut ExternalSignals {
        &mut self.signals
    }

    pub fn signals(&self) -> &ExternalSignals {
        &self.signals
    }

    pub fn bus(&self) -> &Bus {
        &self.system.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.system.bus
    }

    pub fn engine_mut(&mut self) -> &mut SlotTransferEngine {
        &mut self.engine
    }

    pub fn read(&mut self, name: &str) -> CsrResult<u64> {
        self.system.read(name)
    }

    pub fn write(&mut self, name: &str, value: u64) -> CsrResult<()> {
        self.system.write(name, value)
    }

    /// Advances one evaluation step.
    ///
    /// # Returns
    ///
    /// The outputs the register bridge drove during this step.
    pub fn step(&mut self) -> FabricOutputs {
        if let Some(timing) = self.timing.as_mut() {
            self.signals.video = timing.advance();
        }

        self.system.step(&self.signals);
        let outputs = self.system.outputs();

        let completed = self.engine.completed;
        let copied = self.engine.bytes_copied;
        self.engine.tick(&outputs.bridge, &mut self.signals.bridge);

        let stats = &mut self.system.bus.stats;
        if outputs.bridge.request.is_some() {
            stats.transfers_requested += 1;
        }
        stats.transfers_completed += self.engine.completed - completed;
        stats.bytes_transferred += self.engine.bytes_copied - copied;

        outputs
    }

    /// Advances `steps` evaluation steps.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Steps until the engine goes idle, at most `limit` steps.
    ///
    /// # Returns
    ///
    /// Steps taken.
    pub fn run_until_idle(&mut self, limit: u64) -> u64 {
        let mut taken = 0;
        while taken < limit {
            self.step();
            taken += 1;
            if !self.engine.is_busy() {
                break;
            }
        }
        taken
    }

    /// Host-side poll of `video.vsync_status`.
    pub fn poll_vsync(&mut self) -> CsrResult<bool> {
        let seen = self.system.read("video.vsync_status")? != 0;
        let stats = &mut self.system.bus.stats;
        stats.vsync_polls += 1;
        if seen {
            stats.vsync_seen += 1;
        }
        Ok(seen)
    }

    /// Power-on reset of registers, signals and timing. Engine slots stay.
    pub fn reset(&mut self) {
        self.system.reset();
        self.signals = ExternalSignals::default();
        if let Some(timing) = self.timing.as_mut() {
            timing.reset();
        }
    }
}
