use crate::csr::{CsrKind, RegisterBank};
use crate::sim::signals::ExternalSignals;
use crate::soc::traits::CsrDevice;

const UNIX_SECONDS: usize = 0;
const DATE_BCD: usize = 1;
const TIME_BCD: usize = 2;

const LAYOUT: &[(&str, CsrKind, u32)] = &[
    ("unix_seconds", CsrKind::Status, 32),
    ("date_bcd", CsrKind::Status, 32),
    ("time_bcd", CsrKind::Status, 32),
];

/// Real-time clock registers.
///
/// `unix_seconds` follows the host clock. The BCD date and time are the
/// values captured at launch and do not advance.
pub struct Rtc {
    base_addr: u64,
    size: u64,
    bank: RegisterBank,
}

impl Rtc {
    pub fn new(base_addr: u64, size: u64) -> Self {
        Self {
            base_addr,
            size,
            bank: RegisterBank::new("rtc", LAYOUT),
        }
    }
}

impl CsrDevice for Rtc {
    fn name(&self) -> &str {
        "rtc"
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
        self.bank
            .set_status(UNIX_SECONDS, signals.rtc.unix_seconds as u64);
        self.bank.set_status(DATE_BCD, signals.rtc.date_bcd as u64);
        self.bank.set_status(TIME_BCD, signals.rtc.time_bcd as u64);
    }
}
