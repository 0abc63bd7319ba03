//! Edge-triggered status latch.
//!
//! Captures a transient hardware pulse and holds it until the CPU reads
//! the owning register. Each evaluation step applies a pending read-clear
//! first and the set from a rising edge second, so an edge that coincides
//! with a read is never swallowed.

/// Read-clear edge latch backing a single-bit status register.
#[derive(Clone, Debug, Default)]
pub struct EdgeLatch {
    value: bool,
    prev: bool,
    clear_pending: bool,
}

impl EdgeLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates one step against the current sample of the external signal.
    ///
    /// # Returns
    ///
    /// `true` if a 0->1 transition was detected in this step, whether or not
    /// the latch was already set.
    pub fn evaluate(&mut self, sample: bool) -> bool {
        if self.clear_pending {
            self.value = false;
            self.clear_pending = false;
        }

        let rising = sample && !self.prev;
        if rising {
            self.value = true;
        }

        self.prev = sample;
        rising
    }

    /// CPU read: returns the latched bit and requests a clear.
    ///
    /// The clear is visible to any later read immediately and is folded into
    /// the state at the next `evaluate`, ahead of that step's edge detection.
    pub fn read_clear(&mut self) -> u32 {
        let bit = self.peek();
        self.clear_pending = true;
        bit
    }

    /// Current host-visible bit without side effects.
    pub fn peek(&self) -> u32 {
        if self.clear_pending {
            0
        } else {
            self.value as u32
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
