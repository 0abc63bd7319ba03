//! System-on-Chip Traits.
//!
//! This module defines the interface implemented by every CSR register
//! group. It allows the bus to decode, read, write and step disparate
//! groups uniformly.

use crate::common::CsrResult;
use crate::csr::{RegisterBank, RegisterDesc, WriteEffect};
use crate::sim::signals::{ExternalSignals, FabricOutputs};
use crate::soc::devices::Audio;

/// Trait for memory-mapped CSR groups.
///
/// All groups attached to the bus implement this trait. Bus accesses are
/// served by the group's `RegisterBank`; the group reacts to writes in
/// `on_write` and samples the fabric in `step`.
pub trait CsrDevice {
    /// Returns the group name, also used as the register name prefix.
    fn name(&self) -> &str;

    /// Returns the address range (Base Address, Size) of the group.
    fn address_range(&self) -> (u64, u64);

    fn bank(&self) -> &RegisterBank;

    fn bank_mut(&mut self) -> &mut RegisterBank;

    /// Reads the 32-bit word at the specified offset.
    fn read_u32(&mut self, offset: u64) -> CsrResult<u32> {
        self.bank_mut().read(offset)
    }

    /// Writes the 32-bit word at the specified offset.
    fn write_u32(&mut self, offset: u64, val: u32) -> CsrResult<WriteEffect> {
        let effect = self.bank_mut().write(offset, val)?;
        self.on_write(effect);
        Ok(effect)
    }

    /// Reacts to a completed CPU write. Strobe actions hook in here.
    fn on_write(&mut self, _effect: WriteEffect) {}

    /// Advances the group by one evaluation step.
    ///
    /// Status registers are recomputed from `signals` and edge latches are
    /// evaluated (pending clears first, rising edges second).
    fn step(&mut self, signals: &ExternalSignals);

    /// Publishes storage values and pulses of the last step.
    fn drive_outputs(&self, _outputs: &mut FabricOutputs) {}

    /// Returns the group to its power-on state.
    fn reset(&mut self) {
        self.bank_mut().reset();
    }

    /// Register map entries for this group.
    fn registers(&self) -> Vec<RegisterDesc> {
        self.bank().descriptors(self.address_range().0)
    }

    /// Downcasts the group to a mutable audio reference if applicable.
    ///
    /// Used to reach the sample FIFO for playback inspection.
    fn as_audio_mut(&mut self) -> Option<&mut Audio> {
        None
    }
}
