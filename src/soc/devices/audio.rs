//! Audio output registers and sample FIFO.
//!
//! Every write to `audio.out` pushes one stereo pair into the sample FIFO.
//! While `playback_en` is set the output side drains one pair every
//! `consume_interval` steps. `buffer_fill` saturates at `0xFFF`, so a full
//! 4096-entry FIFO never reads back as empty.

use log::debug;
use std::collections::VecDeque;

use crate::common::constants::AUDIO_FILL_MAX;
use crate::config::AudioConfig;
use crate::csr::{CsrKind, RegisterBank, WriteEffect};
use crate::sim::signals::{ExternalSignals, FabricOutputs};
use crate::soc::traits::CsrDevice;

const OUT: usize = 0;
const PLAYBACK_EN: usize = 1;
const BUFFER_FLUSH: usize = 2;
const BUFFER_FILL: usize = 3;

const LAYOUT: &[(&str, CsrKind, u32)] = &[
    ("out", CsrKind::Strobe, 32),
    ("playback_en", CsrKind::Storage, 1),
    ("buffer_flush", CsrKind::Strobe, 1),
    ("buffer_fill", CsrKind::Status, 12),
];

/// One stereo sample pair; left channel in the upper half of the bus word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioSample {
    pub left: i16,
    pub right: i16,
}

impl From<u32> for AudioSample {
    fn from(word: u32) -> Self {
        Self {
            left: (word >> 16) as i16,
            right: word as i16,
        }
    }
}

/// Bounded FIFO between the CPU and the audio output.
#[derive(Debug)]
pub struct SampleFifo {
    samples: VecDeque<AudioSample>,
    depth: usize,
    dropped: u64,
}

impl SampleFifo {
    pub fn new(depth: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(depth),
            depth,
            dropped: 0,
        }
    }

    /// Pushes a sample; a full FIFO drops it.
    pub fn push(&mut self, sample: AudioSample) -> bool {
        if self.samples.len() >= self.depth {
            self.dropped += 1;
            return false;
        }
        self.samples.push_back(sample);
        true
    }

    pub fn pop(&mut self) -> Option<AudioSample> {
        self.samples.pop_front()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples lost to overflow since power-on.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

pub struct Audio {
    base_addr: u64,
    size: u64,
    bank: RegisterBank,
    fifo: SampleFifo,
    consume_interval: u64,
    consume_timer: u64,
    played: Vec<AudioSample>,
    flush_strobed: bool,
    flush_pulse: bool,
    written: u32,
    written_pulse: u32,
}

impl Audio {
    pub fn new(base_addr: u64, size: u64, config: &AudioConfig) -> Self {
        Self {
            base_addr,
            size,
            bank: RegisterBank::new("audio", LAYOUT),
            fifo: SampleFifo::new(config.fifo_depth),
            consume_interval: config.consume_interval.max(1),
            consume_timer: 0,
            played: Vec::new(),
            flush_strobed: false,
            flush_pulse: false,
            written: 0,
            written_pulse: 0,
        }
    }

    pub fn fifo(&self) -> &SampleFifo {
        &self.fifo
    }

    /// Drains the samples played out since the last call.
    pub fn take_played(&mut self) -> Vec<AudioSample> {
        std::mem::take(&mut self.played)
    }

    fn refresh_fill(&mut self) {
        let fill = (self.fifo.len() as u32).min(AUDIO_FILL_MAX);
        self.bank.set_status(BUFFER_FILL, fill as u64);
    }
}

impl CsrDevice for Audio {
    fn name(&self) -> &str {
        "audio"
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

    fn on_write(&mut self, effect: WriteEffect) {
        match effect {
            WriteEffect::Strobe { index: OUT, value } => {
                if !self.fifo.push(AudioSample::from(value)) {
                    debug!("[audio] FIFO full, sample dropped");
                }
                self.written += 1;
                self.refresh_fill();
            }
            WriteEffect::Strobe {
                index: BUFFER_FLUSH,
                ..
            } => {
                self.fifo.clear();
                self.flush_strobed = true;
                self.refresh_fill();
            }
            _ => {}
        }
    }

    fn step(&mut self, _signals: &ExternalSignals) {
        self.flush_pulse = std::mem::take(&mut self.flush_strobed);
        self.written_pulse = std::mem::take(&mut self.written);

        if self.bank.value(PLAYBACK_EN) != 0 {
            self.consume_timer += 1;
            if self.consume_timer >= self.consume_interval {
                self.consume_timer = 0;
                if let Some(sample) = self.fifo.pop() {
                    self.played.push(sample);
                }
            }
        }

        self.refresh_fill();
    }

    fn drive_outputs(&self, outputs: &mut FabricOutputs) {
        outputs.audio.playback_en = self.bank.value(PLAYBACK_EN) != 0;
        outputs.audio.flush = self.flush_pulse;
        outputs.audio.samples_written = self.written_pulse;
    }

    fn reset(&mut self) {
        self.bank.reset();
        self.fifo = SampleFifo::new(self.fifo.depth);
        self.consume_timer = 0;
        self.played.clear();
        self.flush_strobed = false;
        self.flush_pulse = false;
        self.written = 0;
        self.written_pulse = 0;
    }

    fn as_audio_mut(&mut self) -> Option<&mut Audio> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_split() {
        let sample = AudioSample::from(0x8000_7FFF);
        assert_eq!(sample.left, i16::MIN);
        assert_eq!(sample.right, i16::MAX);
    }

    #[test]
    fn test_fifo_drops_when_full() {
        let mut fifo = SampleFifo::new(2);
        assert!(fifo.push(AudioSample::default()));
        assert!(fifo.push(AudioSample::default()));
        assert!(!fifo.push(AudioSample::default()));
        assert_eq!(fifo.len(), 2);
        assert_eq!(fifo.dropped(), 1);
    }
}
