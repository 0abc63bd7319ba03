//! Integration tests for the audio registers and sample FIFO.

use pocket_csr::config::Config;
use pocket_csr::sim::Simulator;
use pocket_csr::soc::devices::AudioSample;

fn create_sim() -> Simulator {
    Simulator::new(&Config::default()).unwrap()
}

/// Tests that a full FIFO reports a saturated fill level.
#[test]
fn test_fill_saturates_at_0xfff() {
    let mut sim = create_sim();

    for i in 0..4096u64 {
        sim.write("audio.out", i).unwrap();
    }
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 0xFFF);

    sim.write("audio.out", 0).unwrap();
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 0xFFF);

    let audio = sim.bus_mut().audio_mut().unwrap();
    assert_eq!(audio.fifo().len(), 4096);
    assert_eq!(audio.fifo().dropped(), 1);
}

/// Tests the fill level tracks individual writes.
#[test]
fn test_fill_counts_writes() {
    let mut sim = create_sim();
    for _ in 0..100 {
        sim.write("audio.out", 0x0001_0001).unwrap();
    }
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 100);

    let outputs = sim.step();
    assert_eq!(outputs.audio.samples_written, 100);
    assert_eq!(sim.step().audio.samples_written, 0);
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 100);
}

/// Tests the flush strobe empties the FIFO.
#[test]
fn test_flush() {
    let mut sim = create_sim();
    for _ in 0..10 {
        sim.write("audio.out", 1).unwrap();
    }
    sim.write("audio.buffer_flush", 1).unwrap();
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 0);

    let outputs = sim.step();
    assert!(outputs.audio.flush);
    assert!(!sim.step().audio.flush);
}

/// Tests playback drains one sample per consume interval.
#[test]
fn test_playback_drains_fifo() {
    let mut config = Config::default();
    config.audio.consume_interval = 2;
    let mut sim = Simulator::new(&config).unwrap();

    sim.write("audio.out", 0x7FFF_8000).unwrap();
    for _ in 0..9 {
        sim.write("audio.out", 0x0001_0002).unwrap();
    }

    sim.run(4);
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 10);

    sim.write("audio.playback_en", 1).unwrap();
    assert!(sim.step().audio.playback_en);
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 10);
    sim.run(3);
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 8);

    let played = sim.bus_mut().audio_mut().unwrap().take_played();
    assert_eq!(
        played,
        vec![
            AudioSample {
                left: i16::MAX,
                right: i16::MIN
            },
            AudioSample { left: 1, right: 2 },
        ]
    );
}

/// Tests that playback stops when disabled.
#[test]
fn test_playback_disable() {
    let mut sim = create_sim();
    for _ in 0..5 {
        sim.write("audio.out", 3).unwrap();
    }
    sim.write("audio.playback_en", 1).unwrap();
    sim.run(2);
    sim.write("audio.playback_en", 0).unwrap();
    sim.run(10);
    assert_eq!(sim.read("audio.buffer_fill").unwrap(), 3);
}
