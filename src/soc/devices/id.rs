use crate::csr::{CsrKind, RegisterBank};
use crate::sim::signals::ExternalSignals;
use crate::soc::traits::CsrDevice;

const CHIP_ID: usize = 0;

const LAYOUT: &[(&str, CsrKind, u32)] = &[("chip_id", CsrKind::Status, 64)];

/// FPGA chip identifier, a 64-bit status spanning two bus words.
pub struct ChipId {
    base_addr: u64,
    size: u64,
    bank: RegisterBank,
}

impl ChipId {
    pub fn new(base_addr: u64, size: u64) -> Self {
        Self {
            base_addr,
            size,
            bank: RegisterBank::new("id", LAYOUT),
        }
    }
}

impl CsrDevice for ChipId {
    fn name(&self) -> &str {
        "id"
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
        self.bank.set_status(CHIP_ID, signals.chip_id);
    }
}
