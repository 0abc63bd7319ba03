//! Video status registers.
//!
//! `vsync_status` latches every rising edge of vsync until read.
//! `vblank_status` is a pure function of the current line count.
//! `frame_counter` counts every detected vsync edge, including edges that
//! land while `vsync_status` is still set, and wraps modulo 2^32.

use crate::config::VideoConfig;
use crate::csr::{CsrKind, RegisterBank, Synchronizer};
use crate::sim::signals::ExternalSignals;
use crate::soc::traits::CsrDevice;

const VSYNC_STATUS: usize = 0;
const VBLANK_STATUS: usize = 1;
const FRAME_COUNTER: usize = 2;

const LAYOUT: &[(&str, CsrKind, u32)] = &[
    ("vsync_status", CsrKind::LatchedStatus, 1),
    ("vblank_status", CsrKind::Status, 1),
    ("frame_counter", CsrKind::Status, 32),
];

pub struct Video {
    base_addr: u64,
    size: u64,
    bank: RegisterBank,
    v_active: u32,
    vsync_sync: Synchronizer<bool>,
    frames: u32,
}

impl Video {
    pub fn new(base_addr: u64, size: u64, config: &VideoConfig) -> Self {
        Self {
            base_addr,
            size,
            bank: RegisterBank::new("video", LAYOUT),
            v_active: config.v_active,
            vsync_sync: Synchronizer::new(config.sync_stages),
            frames: 0,
        }
    }
}

impl CsrDevice for Video {
    fn name(&self) -> &str {
        "video"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.size)
    }

    fn bank(&self) -> &RegisterBank {
        &self.bank
    }

    fn bank_mut(&mut self) -> &mut RegisterBank {
        &mut self.bank
    }

    fn step(&mut self, signals: &ExternalSignals) {
        let vblank = signals.video.vcount >= self.v_active;
        self.bank.set_status(VBLANK_STATUS, vblank as u64);

        let vsync = self.vsync_sync.sample(signals.video.vsync);
        if self.bank.evaluate_latch(VSYNC_STATUS, vsync) {
            self.frames = self.frames.wrapping_add(1);
            self.bank.set_status(FRAME_COUNTER, self.frames as u64);
        }
    }

    fn reset(&mut self) {
        self.bank.reset();
        self.vsync_sync.reset();
        self.frames = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vsync(level: bool) -> ExternalSignals {
        let mut signals = ExternalSignals::default();
        signals.video.vsync = level;
        signals
    }

    #[test]
    fn test_frame_counter_wraps() {
        let mut video = Video::new(0xF000_2000, 0x800, &VideoConfig::default());
        video.frames = u32::MAX;
        video.bank.set_status(FRAME_COUNTER, u32::MAX as u64);

        video.step(&vsync(false));
        assert_eq!(video.bank.value(FRAME_COUNTER), u32::MAX as u64);

        video.step(&vsync(true));
        assert_eq!(video.bank.value(FRAME_COUNTER), 0);
        assert_eq!(video.read_u32(0x8).unwrap(), 0);
        assert_eq!(video.read_u32(0x0).unwrap(), 1);
    }
}
