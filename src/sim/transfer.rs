//! Bridge transfer engine model.
//!
//! Stands in for the host-side engine that serves `request_read`: it owns
//! the asset slots and a window of CPU RAM, copies the requested bytes over
//! several steps, and pulses `complete_trigger` for one step when done.

use log::{debug, warn};
use std::collections::HashMap;

use crate::common::constants::BRIDGE_MAX_LENGTH;
use crate::config::{BridgeConfig, MaxLengthPolicy};
use crate::sim::signals::{BridgeOutputs, BridgeSignals, TransferRequest};

/// Engine on the far side of the bridge registers.
pub trait TransferEngine {
    /// Advances the engine by one step.
    ///
    /// `outputs` are the bridge values driven by the step just evaluated;
    /// the engine updates `signals` for the next step.
    fn tick(&mut self, outputs: &BridgeOutputs, signals: &mut BridgeSignals);

    /// Whether a transfer is in flight.
    fn is_busy(&self) -> bool;
}

#[derive(Debug)]
struct ActiveTransfer {
    slot_id: u16,
    source: usize,
    dest: u64,
    remaining: usize,
}

/// In-memory engine serving reads from registered slots into a RAM window.
pub struct SlotTransferEngine {
    slots: HashMap<u16, Vec<u8>>,
    ram: Vec<u8>,
    ram_base: u64,
    bytes_per_step: usize,
    policy: MaxLengthPolicy,
    active: Option<ActiveTransfer>,
    /// Requests accepted since power-on.
    pub requests: u64,
    /// Transfers finished since power-on.
    pub completed: u64,
    /// Bytes copied into RAM since power-on.
    pub bytes_copied: u64,
}

impl SlotTransferEngine {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            slots: HashMap::new(),
            ram: vec![0; config.ram_size],
            ram_base: config.ram_base,
            bytes_per_step: config.bytes_per_step.max(1),
            policy: config.max_length_policy,
            active: None,
            requests: 0,
            completed: 0,
            bytes_copied: 0,
        }
    }

    /// Registers the contents of an asset slot.
    pub fn insert_slot(&mut self, slot_id: u16, data: Vec<u8>) {
        debug!("[engine] slot {} holds {} bytes", slot_id, data.len());
        self.slots.insert(slot_id, data);
    }

    pub fn policy(&self) -> MaxLengthPolicy {
        self.policy
    }

    /// RAM window contents starting at `addr`.
    pub fn ram_at(&self, addr: u64, len: usize) -> Option<&[u8]> {
        let start = usize::try_from(addr.checked_sub(self.ram_base)?).ok()?;
        self.ram.get(start..start.checked_add(len)?)
    }

    fn file_size(&self, slot_id: u16) -> u32 {
        self.slots
            .get(&slot_id)
            .map_or(0, |data| data.len().min(u32::MAX as usize) as u32)
    }

    /// Number of bytes a request moves once the length is resolved.
    pub fn resolve_length(&self, request: &TransferRequest) -> usize {
        let available = (self.file_size(request.slot_id) as usize)
            .saturating_sub(request.data_offset as usize);

        if request.length == BRIDGE_MAX_LENGTH {
            match self.policy {
                MaxLengthPolicy::EntireFile => available,
                MaxLengthPolicy::FileSizeQuery => 0,
            }
        } else {
            (request.length as usize).min(available)
        }
    }

    fn start(&mut self, request: TransferRequest) {
        self.requests += 1;
        if !self.slots.contains_key(&request.slot_id) {
            warn!("[engine] read from empty slot {}", request.slot_id);
        }
        let remaining = self.resolve_length(&request);
        debug!(
            "[engine] start slot {} offset {:#x} -> {:#010x}, {} bytes",
            request.slot_id, request.data_offset, request.ram_data_address, remaining
        );
        self.active = Some(ActiveTransfer {
            slot_id: request.slot_id,
            source: request.data_offset as usize,
            dest: request.ram_data_address as u64,
            remaining,
        });
    }

    /// Copies up to one step's worth of bytes.
    ///
    /// # Returns
    ///
    /// `true` when the transfer has finished.
    fn advance(&mut self) -> bool {
        let Some(xfer) = self.active.as_mut() else {
            return false;
        };

        let chunk = xfer.remaining.min(self.bytes_per_step);
        if chunk > 0 {
            let src = self
                .slots
                .get(&xfer.slot_id)
                .and_then(|data| data.get(xfer.source..xfer.source + chunk));
            let dst = xfer
                .dest
                .checked_sub(self.ram_base)
                .and_then(|off| usize::try_from(off).ok())
                .and_then(|off| self.ram.get_mut(off..off + chunk));

            match (src, dst) {
                (Some(src), Some(dst)) => dst.copy_from_slice(src),
                _ => {
                    warn!(
                        "[engine] transfer to {:#010x} leaves the RAM window, aborting",
                        xfer.dest
                    );
                    xfer.remaining = 0;
                    return true;
                }
            }

            xfer.source += chunk;
            xfer.dest += chunk as u64;
            xfer.remaining -= chunk;
            self.bytes_copied += chunk as u64;
        }

        xfer.remaining == 0
    }
}

impl TransferEngine for SlotTransferEngine {
    fn tick(&mut self, outputs: &BridgeOutputs, signals: &mut BridgeSignals) {
        signals.complete_trigger = false;
        signals.file_size = self.file_size(outputs.slot_id);

        if let Some(request) = outputs.request {
            if self.active.is_some() {
                warn!("[engine] request while busy, restarting transfer");
            }
            self.start(request);
        }

        if self.advance() {
            if let Some(xfer) = self.active.take() {
                signals.current_address = xfer.dest as u32;
            }
            signals.complete_trigger = true;
            self.completed += 1;
            debug!("[engine] transfer complete");
        } else if let Some(xfer) = &self.active {
            signals.current_address = xfer.dest as u32;
        }
    }

    fn is_busy(&self) -> bool {
        self.active.is_some()
    }
}
