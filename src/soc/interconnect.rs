//! CSR Bus Interconnect.
//!
//! This module implements the CSR bus, which routes CPU accesses to the
//! register group that decodes the address. It manages the list of groups,
//! the generated register map used for name lookups, and the per-step
//! evaluation of every group.

use log::{info, trace};

use crate::common::{AccessType, CsrError, CsrResult, CSR_WORD_BYTES};
use crate::csr::{RegisterDesc, RegisterMap, WriteEffect};
use crate::sim::signals::{ExternalSignals, FabricOutputs};
use crate::soc::devices::Audio;
use crate::soc::traits::CsrDevice;
use crate::stats::SimStats;

/// CSR bus connecting the CPU to every register group.
///
/// Routes 32-bit word accesses to the group whose region contains the
/// address and keeps the register map in sync with the attached groups.
pub struct Bus {
    devices: Vec<Box<dyn CsrDevice>>,
    map: RegisterMap,
    /// Log every access at `trace` level.
    pub trace: bool,
    /// Reject writes to read-only registers with `CsrError::InvalidAccess`.
    pub strict: bool,
    /// Access and step counters.
    pub stats: SimStats,

    last_device_idx: usize,

    audio_idx: Option<usize>,
}

impl Bus {
    /// Creates a new bus with no groups attached.
    ///
    /// # Arguments
    ///
    /// * `csr_base` - Base address of the CSR window, recorded in the map
    pub fn new(csr_base: u64) -> Self {
        Self {
            devices: Vec::new(),
            map: RegisterMap::new(csr_base),
            trace: cfg!(feature = "always-trace"),
            strict: false,
            stats: SimStats::default(),
            last_device_idx: 0,
            audio_idx: None,
        }
    }

    /// Adds a register group to the bus.
    ///
    /// Groups are kept sorted by base address and their registers are
    /// merged into the register map.
    pub fn add_device(&mut self, dev: Box<dyn CsrDevice>) {
        let (base, size) = dev.address_range();
        info!(
            "[Bus] Registered group: {:<8} @ {:#010x} - {:#010x} ({} registers)",
            dev.name(),
            base,
            base + size,
            dev.bank().registers().len()
        );
        self.map.extend(dev.registers());
        self.devices.push(dev);

        self.devices.sort_by_key(|d| d.address_range().0);

        self.audio_idx = self.devices.iter().position(|d| d.name() == "audio");
        self.last_device_idx = 0;
    }

    /// The generated register map of every attached group.
    pub fn register_map(&self) -> &RegisterMap {
        &self.map
    }

    /// Looks up a register by its fully qualified name.
    pub fn describe(&self, name: &str) -> CsrResult<&RegisterDesc> {
        self.map
            .get(name)
            .ok_or_else(|| CsrError::UnknownRegister(name.to_string()))
    }

    /// Address of the first word of a named register.
    pub fn address_of(&self, name: &str) -> CsrResult<u64> {
        self.describe(name).map(|d| d.addr)
    }

    /// Checks if an address is decoded by any group.
    pub fn is_valid_address(&self, addr: u64) -> bool {
        self.devices.iter().any(|dev| {
            let (start, size) = dev.address_range();
            addr >= start && addr < start + size
        })
    }

    /// Helper to find the group mapped to a specific address.
    ///
    /// Returns a mutable reference to the group and the offset within it.
    #[inline(always)]
    fn find_device(&mut self, addr: u64) -> Option<(&mut Box<dyn CsrDevice>, u64)> {
        if self.last_device_idx < self.devices.len() {
            let (start, size) = self.devices[self.last_device_idx].address_range();
            if addr >= start && addr < start + size {
                return Some((&mut self.devices[self.last_device_idx], addr - start));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            let (start, size) = dev.address_range();
            if addr >= start && addr < start + size {
                self.last_device_idx = i;
                return Some((dev, addr - start));
            }
        }
        None
    }

    /// Reads the 32-bit word at the specified address.
    pub fn read_u32(&mut self, addr: u64) -> CsrResult<u32> {
        let trace = self.trace;
        let result = if addr % CSR_WORD_BYTES != 0 {
            Err(CsrError::Misaligned(addr))
        } else if let Some((dev, offset)) = self.find_device(addr) {
            dev.read_u32(offset)
        } else {
            Err(CsrError::UnmappedAddress(addr))
        };

        match &result {
            Ok(val) => {
                self.stats.reads += 1;
                if trace {
                    trace!("[Bus] R {:#010x} -> {:#010x}", addr, val);
                }
            }
            Err(_) => self.stats.rejected_accesses += 1,
        }
        result
    }

    /// Writes the 32-bit word at the specified address.
    pub fn write_u32(&mut self, addr: u64, val: u32) -> CsrResult<()> {
        let trace = self.trace;
        let result = if addr % CSR_WORD_BYTES != 0 {
            Err(CsrError::Misaligned(addr))
        } else if let Some(e) = self.check_writable(addr) {
            Err(e)
        } else if let Some((dev, offset)) = self.find_device(addr) {
            dev.write_u32(offset, val)
        } else {
            Err(CsrError::UnmappedAddress(addr))
        };

        match result {
            Ok(effect) => {
                self.stats.writes += 1;
                match effect {
                    WriteEffect::Strobe { .. } => self.stats.strobes += 1,
                    WriteEffect::Ignored { .. } => self.stats.ignored_writes += 1,
                    WriteEffect::Stored { .. } => {}
                }
                if trace {
                    trace!("[Bus] W {:#010x} <- {:#010x}", addr, val);
                }
                Ok(())
            }
            Err(e) => {
                self.stats.rejected_accesses += 1;
                Err(e)
            }
        }
    }

    /// In strict mode, the error for a write to a register without write access.
    fn check_writable(&self, addr: u64) -> Option<CsrError> {
        if !self.strict {
            return None;
        }
        let desc = self.map.at(addr)?;
        if desc.mode.can_write() {
            return None;
        }
        Some(CsrError::InvalidAccess {
            name: desc.name.clone(),
            access: AccessType::Write,
        })
    }

    /// Reads a register by name, assembling multi-word registers.
    pub fn read_named(&mut self, name: &str) -> CsrResult<u64> {
        let desc = self.describe(name)?.clone();
        let mut value = 0u64;
        for word in 0..desc.words {
            let data = self.read_u32(desc.addr + word as u64 * CSR_WORD_BYTES)?;
            value = (value << 32) | data as u64;
        }
        Ok(value)
    }

    /// Writes a register by name, most significant word first.
    pub fn write_named(&mut self, name: &str, value: u64) -> CsrResult<()> {
        let desc = self.describe(name)?.clone();
        for word in 0..desc.words {
            let shift = 32 * (desc.words - 1 - word);
            let data = (value >> shift) as u32;
            self.write_u32(desc.addr + word as u64 * CSR_WORD_BYTES, data)?;
        }
        Ok(())
    }

    /// Advances every group by one evaluation step.
    ///
    /// Groups never read each other's registers within a step, so the
    /// evaluation order of the groups is not observable.
    pub fn step(&mut self, signals: &ExternalSignals) {
        for dev in self.devices.iter_mut() {
            dev.step(signals);
        }
        self.stats.steps += 1;
    }

    /// Collects the outputs every group drives into the fabric.
    pub fn outputs(&self) -> FabricOutputs {
        let mut outputs = FabricOutputs::default();
        for dev in &self.devices {
            dev.drive_outputs(&mut outputs);
        }
        outputs
    }

    /// Returns every group to its power-on state and clears the counters.
    pub fn reset(&mut self) {
        for dev in self.devices.iter_mut() {
            dev.reset();
        }
        self.stats = SimStats::default();
        self.last_device_idx = 0;
    }

    /// The audio group, if attached.
    pub fn audio_mut(&mut self) -> Option<&mut Audio> {
        let idx = self.audio_idx?;
        self.devices.get_mut(idx)?.as_audio_mut()
    }
}
