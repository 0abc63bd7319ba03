use crate::common::constants::CONTROLLER_PORTS;
use crate::csr::{CsrKind, RegisterBank};
use crate::sim::signals::ExternalSignals;
use crate::soc::traits::CsrDevice;

const LAYOUT: &[(&str, CsrKind, u32)] = &[
    ("cont1_key", CsrKind::Status, 32),
    ("cont2_key", CsrKind::Status, 32),
    ("cont3_key", CsrKind::Status, 32),
    ("cont4_key", CsrKind::Status, 32),
    ("cont1_joy", CsrKind::Status, 32),
    ("cont2_joy", CsrKind::Status, 32),
    ("cont3_joy", CsrKind::Status, 32),
    ("cont4_joy", CsrKind::Status, 32),
    ("cont1_trig", CsrKind::Status, 32),
    ("cont2_trig", CsrKind::Status, 32),
    ("cont3_trig", CsrKind::Status, 32),
    ("cont4_trig", CsrKind::Status, 32),
];

const KEY_BASE: usize = 0;
const JOY_BASE: usize = CONTROLLER_PORTS;
const TRIG_BASE: usize = 2 * CONTROLLER_PORTS;

/// Controller input registers.
///
/// Twelve read-only words, key/joystick/trigger for each of four ports,
/// copied from the fabric every step.
pub struct Input {
    base_addr: u64,
    size: u64,
    bank: RegisterBank,
}

impl Input {
    pub fn new(base_addr: u64, size: u64) -> Self {
        Self {
            base_addr,
            size,
            bank: RegisterBank::new("input", LAYOUT),
        }
    }
}

impl CsrDevice for Input {
    fn name(&self) -> &str {
        "input"
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
        for (port, state) in signals.controllers.iter().enumerate() {
            self.bank.set_status(KEY_BASE + port, state.key as u64);
            self.bank.set_status(JOY_BASE + port, state.joy as u64);
            self.bank.set_status(TRIG_BASE + port, state.trig as u64);
        }
    }
}
