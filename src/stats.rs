//! Simulation statistics collection and reporting.
//!
//! Tracks evaluation steps, CPU bus traffic, rejected accesses and the
//! bridge/video events seen during a run.

use std::time::Instant;

/// Simulation statistics structure tracking bus and event counters.
pub struct SimStats {
    start_time: Instant,
    pub steps: u64,

    pub reads: u64,
    pub writes: u64,
    pub strobes: u64,
    pub ignored_writes: u64,
    pub rejected_accesses: u64,

    pub transfers_requested: u64,
    pub transfers_completed: u64,
    pub bytes_transferred: u64,

    pub vsync_polls: u64,
    pub vsync_seen: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            reads: 0,
            writes: 0,
            strobes: 0,
            ignored_writes: 0,
            rejected_accesses: 0,
            transfers_requested: 0,
            transfers_completed: 0,
            bytes_transferred: 0,
            vsync_polls: 0,
            vsync_seen: 0,
        }
    }
}

impl SimStats {
    /// Prints a formatted summary of the run.
    ///
    /// `frames` is the final value of `video.frame_counter`.
    pub fn print(&self, frames: u64) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let khz = if seconds > 0.0 {
            (self.steps as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        let accesses = self.reads + self.writes;

        println!("\n==========================================================");
        println!("CSR BRIDGE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_steps                {}", self.steps);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("----------------------------------------------------------");
        println!("BUS");
        println!("  bus.accesses           {}", accesses);
        println!("  bus.reads              {}", self.reads);
        println!("  bus.writes             {}", self.writes);
        println!("  bus.strobes            {}", self.strobes);
        println!("  bus.ignored_writes     {}", self.ignored_writes);
        println!("  bus.rejected           {}", self.rejected_accesses);
        println!("----------------------------------------------------------");
        println!("BRIDGE");
        println!("  bridge.requests        {}", self.transfers_requested);
        println!("  bridge.completed       {}", self.transfers_completed);
        println!("  bridge.bytes           {}", self.bytes_transferred);
        println!("----------------------------------------------------------");
        println!("VIDEO");
        let missed = frames.saturating_sub(self.vsync_seen);
        println!("  video.frames           {}", frames);
        println!("  video.vsync_polls      {}", self.vsync_polls);
        println!("  video.vsync_seen       {}", self.vsync_seen);
        println!("  video.frames_coalesced {}", missed);
        println!("==========================================================");
    }
}
