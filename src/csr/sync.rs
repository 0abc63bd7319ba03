//! Clock-domain-crossing synchronizer.
//!
//! Models a chain of flip-flops between a foreign clock domain and the
//! register bridge: a value sampled at step `n` becomes visible at step
//! `n + stages`. Zero stages is a direct same-domain connection.

use std::collections::VecDeque;

/// Fixed-delay sampling stage for a signal crossing into the CSR domain.
#[derive(Clone, Debug)]
pub struct Synchronizer<T: Copy + Default> {
    stages: VecDeque<T>,
    depth: usize,
}

impl<T: Copy + Default> Synchronizer<T> {
    /// Creates a synchronizer `depth` flops deep, all holding `T::default()`.
    pub fn new(depth: usize) -> Self {
        Self {
            stages: std::iter::repeat(T::default()).take(depth).collect(),
            depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Clocks `input` in and returns the value leaving the last stage.
    pub fn sample(&mut self, input: T) -> T {
        if self.depth == 0 {
            return input;
        }
        self.stages.push_back(input);
        self.stages.pop_front().unwrap_or_default()
    }

    pub fn reset(&mut self) {
        for stage in self.stages.iter_mut() {
            *stage = T::default();
        }
    }
}
