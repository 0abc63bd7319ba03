//! Integration tests for the full simulator.

use pocket_csr::config::Config;
use pocket_csr::sim::Simulator;

const LINES: u64 = 255;

fn create_timed_sim(config: &Config) -> Simulator {
    Simulator::new(config).unwrap().with_video_timing(config)
}

/// Tests the frame counter advances once per generated frame.
#[test]
fn test_frame_counter_per_frame() {
    let config = Config::default();
    let mut sim = create_timed_sim(&config);

    sim.run(3 * LINES);
    assert_eq!(sim.read("video.frame_counter").unwrap(), 3);
}

/// Tests a host polling every step observes every vsync.
#[test]
fn test_polling_host_sees_every_frame() {
    let config = Config::default();
    let mut sim = create_timed_sim(&config);

    for _ in 0..5 * LINES {
        sim.step();
        sim.poll_vsync().unwrap();
    }

    let stats = &sim.bus().stats;
    assert_eq!(stats.vsync_seen, 5);
    assert_eq!(stats.vsync_polls, 5 * LINES);
}

/// Tests a slow host coalesces frames but the counter does not.
#[test]
fn test_slow_host_coalesces() {
    let config = Config::default();
    let mut sim = create_timed_sim(&config);

    let mut seen = 0;
    for _ in 0..3 {
        sim.run(2 * LINES);
        if sim.poll_vsync().unwrap() {
            seen += 1;
        }
    }
    assert_eq!(seen, 3);
    assert_eq!(sim.read("video.frame_counter").unwrap(), 6);
}

/// Tests vblank follows the line count within the same step.
#[test]
fn test_vblank_tracks_vcount() {
    let mut sim = Simulator::new(&Config::default()).unwrap();

    for (vcount, expected) in [(0, 0), (239, 0), (240, 1), (254, 1), (10, 0)] {
        sim.signals_mut().video.vcount = vcount;
        sim.step();
        assert_eq!(
            sim.read("video.vblank_status").unwrap(),
            expected,
            "vcount {}",
            vcount
        );
    }
}

/// Tests vblank during generated timing.
#[test]
fn test_vblank_with_timing() {
    let config = Config::default();
    let mut sim = create_timed_sim(&config);

    sim.run(240);
    assert_eq!(sim.read("video.vblank_status").unwrap(), 0);
    sim.step();
    assert_eq!(sim.read("video.vblank_status").unwrap(), 1);
    sim.run(LINES - 241);
    assert_eq!(sim.read("video.vblank_status").unwrap(), 1);
    sim.step();
    assert_eq!(sim.read("video.vblank_status").unwrap(), 0);
}

/// Tests the frame counter counts edges that land while the latch is set.
#[test]
fn test_frame_counter_counts_every_edge() {
    let mut sim = Simulator::new(&Config::default()).unwrap();

    for n in 1..=50u64 {
        sim.signals_mut().video.vsync = true;
        sim.step();
        sim.signals_mut().video.vsync = false;
        sim.step();
        assert_eq!(sim.read("video.frame_counter").unwrap(), n);
    }
    assert_eq!(sim.read("video.vsync_status").unwrap(), 1);
}

/// Tests a bridge transfer running alongside video timing.
#[test]
fn test_transfer_during_frames() {
    let config = Config::default();
    let mut sim = create_timed_sim(&config);
    sim.engine_mut().insert_slot(1, vec![0xAB; 4096]);

    sim.write("bridge.slot_id", 1).unwrap();
    sim.write("bridge.transfer_length", 0xFFFF_FFFF).unwrap();
    sim.write("bridge.ram_data_address", 0x4000_0000).unwrap();
    sim.write("bridge.request_read", 1).unwrap();

    let mut done_at = None;
    for step in 0..LINES {
        sim.step();
        if done_at.is_none() && sim.read("bridge.status").unwrap() == 1 {
            done_at = Some(step);
        }
    }

    assert_eq!(done_at, Some(64));
    assert_eq!(sim.engine.ram_at(0x4000_0000, 4096).unwrap(), &[0xAB; 4096][..]);
    assert_eq!(sim.read("video.frame_counter").unwrap(), 1);
}

/// Tests reset clears registers and timing but keeps slot contents.
#[test]
fn test_simulator_reset() {
    let config = Config::default();
    let mut sim = create_timed_sim(&config);
    sim.engine_mut().insert_slot(2, vec![1, 2, 3]);
    sim.run(2 * LINES);

    sim.reset();
    assert_eq!(sim.read("video.frame_counter").unwrap(), 0);
    assert_eq!(sim.bus().stats.steps, 0);

    sim.write("bridge.slot_id", 2).unwrap();
    sim.run(2);
    assert_eq!(sim.read("bridge.file_size").unwrap(), 3);

    sim.run(LINES);
    assert_eq!(sim.read("video.frame_counter").unwrap(), 1);
}
