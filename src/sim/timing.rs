//! Vertical video timing stimulus.
//!
//! Produces the `vcount`/`vsync` pair the register bridge samples, one
//! line per step. Only the vertical axis matters to the registers.

use crate::config::VideoConfig;
use crate::sim::signals::VideoSignals;

/// Line counter with a vsync pulse inside the vertical blanking interval.
#[derive(Clone, Debug)]
pub struct VideoTiming {
    v_total: u32,
    sync_start: u32,
    sync_end: u32,
    line: u32,
}

impl VideoTiming {
    pub fn new(config: &VideoConfig) -> Self {
        let sync_start = config.v_active.saturating_add(config.v_sync_offset);
        Self {
            v_total: config.v_total().max(1),
            sync_start,
            sync_end: sync_start.saturating_add(config.v_sync_width),
            line: 0,
        }
    }

    /// Lines per frame, i.e. steps between two vsync edges.
    pub fn lines_per_frame(&self) -> u32 {
        self.v_total
    }

    /// Returns the signals for the current line and moves to the next.
    pub fn advance(&mut self) -> VideoSignals {
        let signals = VideoSignals {
            vcount: self.line,
            vsync: self.line >= self.sync_start && self.line < self.sync_end,
        };
        self.line = (self.line + 1) % self.v_total;
        signals
    }

    pub fn reset(&mut self) {
        self.line = 0;
    }
}
