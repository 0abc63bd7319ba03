use log::debug;

use crate::csr::{CsrKind, RegisterBank, Synchronizer, WriteEffect};
use crate::sim::signals::{ExternalSignals, FabricOutputs, TransferRequest};
use crate::soc::traits::CsrDevice;

const REQUEST_READ: usize = 0;
const SLOT_ID: usize = 1;
const DATA_OFFSET: usize = 2;
const TRANSFER_LENGTH: usize = 3;
const RAM_DATA_ADDRESS: usize = 4;
const FILE_SIZE: usize = 5;
const STATUS: usize = 6;
const CURRENT_ADDRESS: usize = 7;

const LAYOUT: &[(&str, CsrKind, u32)] = &[
    ("request_read", CsrKind::Strobe, 1),
    ("slot_id", CsrKind::Storage, 16),
    ("data_offset", CsrKind::Storage, 32),
    ("transfer_length", CsrKind::Storage, 32),
    ("ram_data_address", CsrKind::Storage, 32),
    ("file_size", CsrKind::Status, 32),
    ("status", CsrKind::LatchedStatus, 1),
    ("current_address", CsrKind::Status, 32),
];

/// Bridge file-transfer registers.
///
/// The CPU fills in the transfer parameters and strobes `request_read`;
/// the transfer engine sees a `TransferRequest` for one step. Completion
/// comes back as a pulse on `complete_trigger`, captured by the read-clear
/// `status` latch so a poll can never miss it.
pub struct Bridge {
    base_addr: u64,
    size: u64,
    bank: RegisterBank,
    complete_sync: Synchronizer<bool>,
    request_strobed: bool,
    request_pulse: Option<TransferRequest>,
}

impl Bridge {
    pub fn new(base_addr: u64, size: u64, sync_stages: usize) -> Self {
        Self {
            base_addr,
            size,
            bank: RegisterBank::new("bridge", LAYOUT),
            complete_sync: Synchronizer::new(sync_stages),
            request_strobed: false,
            request_pulse: None,
        }
    }

    fn capture_request(&self) -> TransferRequest {
        TransferRequest {
            slot_id: self.bank.value(SLOT_ID) as u16,
            data_offset: self.bank.value(DATA_OFFSET) as u32,
            length: self.bank.value(TRANSFER_LENGTH) as u32,
            ram_data_address: self.bank.value(RAM_DATA_ADDRESS) as u32,
        }
    }
}

impl CsrDevice for Bridge {
    fn name(&self) -> &str {
        "bridge"
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
        if let WriteEffect::Strobe {
            index: REQUEST_READ,
            ..
        } = effect
        {
            self.request_strobed = true;
        }
    }

    fn step(&mut self, signals: &ExternalSignals) {
        self.request_pulse = if std::mem::take(&mut self.request_strobed) {
            let request = self.capture_request();
            debug!("[bridge] read request {:?}", request);
            Some(request)
        } else {
            None
        };

        self.bank
            .set_status(FILE_SIZE, signals.bridge.file_size as u64);
        self.bank
            .set_status(CURRENT_ADDRESS, signals.bridge.current_address as u64);

        let complete = self.complete_sync.sample(signals.bridge.complete_trigger);
        self.bank.evaluate_latch(STATUS, complete);
    }

    fn drive_outputs(&self, outputs: &mut FabricOutputs) {
        let out = &mut outputs.bridge;
        out.slot_id = self.bank.value(SLOT_ID) as u16;
        out.data_offset = self.bank.value(DATA_OFFSET) as u32;
        out.transfer_length = self.bank.value(TRANSFER_LENGTH) as u32;
        out.ram_data_address = self.bank.value(RAM_DATA_ADDRESS) as u32;
        out.request = self.request_pulse;
    }

    fn reset(&mut self) {
        self.bank.reset();
        self.complete_sync.reset();
        self.request_strobed = false;
        self.request_pulse = None;
    }
}
