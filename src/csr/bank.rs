//! Register bank for one CSR group.
//!
//! A bank owns the registers of a single device region and decodes byte
//! offsets within that region onto register words. Registers are laid out
//! on consecutive 32-bit words in declaration order.

use log::{debug, warn};

use super::latch::EdgeLatch;
use super::map::RegisterDesc;
use super::register::{CsrKind, Register};
use crate::common::{AccessType, CsrError, CsrResult, CSR_WORD_BYTES};

/// Outcome of a CPU write, consumed by the owning device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteEffect {
    /// A storage register took the value.
    Stored { index: usize },
    /// A strobe register was written; `value` is the masked bus data.
    Strobe { index: usize, value: u32 },
    /// The register is read-only and the write was dropped.
    Ignored { index: usize },
}

/// Registers of one CSR group plus their word decode table.
pub struct RegisterBank {
    group: &'static str,
    regs: Vec<Register>,
    latches: Vec<Option<EdgeLatch>>,
    /// Word index -> (register index, word within register).
    decode: Vec<(usize, usize)>,
}

impl RegisterBank {
    /// Builds a bank from `(name, kind, width)` triples.
    pub fn new(group: &'static str, layout: &[(&'static str, CsrKind, u32)]) -> Self {
        let mut regs = Vec::with_capacity(layout.len());
        let mut latches = Vec::with_capacity(layout.len());
        let mut decode = Vec::new();

        for (index, &(name, kind, width)) in layout.iter().enumerate() {
            let reg = Register::new(name, kind, width);
            for word in 0..reg.words() {
                decode.push((index, word));
            }
            latches.push(if kind == CsrKind::LatchedStatus {
                Some(EdgeLatch::new())
            } else {
                None
            });
            regs.push(reg);
        }

        Self {
            group,
            regs,
            latches,
            decode,
        }
    }

    pub fn group(&self) -> &'static str {
        self.group
    }

    /// Size of the decoded part of the region in bytes.
    pub fn span(&self) -> u64 {
        self.decode.len() as u64 * CSR_WORD_BYTES
    }

    pub fn registers(&self) -> &[Register] {
        &self.regs
    }

    /// Fully qualified name of register `index`, e.g. `video.vsync_status`.
    pub fn full_name(&self, index: usize) -> String {
        format!("{}.{}", self.group, self.regs[index].name)
    }

    fn locate(&self, offset: u64) -> CsrResult<(usize, usize)> {
        if offset % CSR_WORD_BYTES != 0 {
            return Err(CsrError::Misaligned(offset));
        }
        self.decode
            .get((offset / CSR_WORD_BYTES) as usize)
            .copied()
            .ok_or_else(|| CsrError::UnmappedOffset {
                device: self.group.to_string(),
                offset,
            })
    }

    /// CPU read of the word at `offset`.
    ///
    /// Reading a latched status register clears it. Reading a strobe is an
    /// invalid access.
    pub fn read(&mut self, offset: u64) -> CsrResult<u32> {
        let (index, word) = self.locate(offset)?;
        let reg = &self.regs[index];

        match reg.kind {
            CsrKind::Strobe => Err(CsrError::InvalidAccess {
                name: self.full_name(index),
                access: AccessType::Read,
            }),
            CsrKind::LatchedStatus => {
                let bit = self.latches[index]
                    .as_mut()
                    .map_or(0, |latch| latch.read_clear());
                Ok(bit)
            }
            CsrKind::Storage | CsrKind::Status => Ok(reg.word(word)),
        }
    }

    /// CPU write of the word at `offset`; data is truncated to the width.
    pub fn write(&mut self, offset: u64, data: u32) -> CsrResult<WriteEffect> {
        let (index, word) = self.locate(offset)?;
        let reg = &mut self.regs[index];

        match reg.kind {
            CsrKind::Storage => {
                reg.set_word(word, data);
                Ok(WriteEffect::Stored { index })
            }
            CsrKind::Strobe => {
                let value = (data as u64 & reg.mask()) as u32;
                debug!("[{}] strobe {} <= {:#x}", self.group, reg.name, value);
                Ok(WriteEffect::Strobe { index, value })
            }
            CsrKind::Status | CsrKind::LatchedStatus => {
                warn!(
                    "[{}] ignoring write of {:#x} to read-only {}",
                    self.group, data, reg.name
                );
                Ok(WriteEffect::Ignored { index })
            }
        }
    }

    /// Hardware-side update of a status register, truncated to the width.
    pub fn set_status(&mut self, index: usize, value: u64) {
        debug_assert_eq!(self.regs[index].kind, CsrKind::Status);
        self.regs[index].set(value);
    }

    /// Current value of a storage or status register.
    pub fn value(&self, index: usize) -> u64 {
        match &self.latches[index] {
            Some(latch) => latch.peek() as u64,
            None => self.regs[index].value(),
        }
    }

    /// Evaluates the edge latch of register `index` for this step.
    ///
    /// # Returns
    ///
    /// `true` on a detected rising edge of `sample`.
    pub fn evaluate_latch(&mut self, index: usize, sample: bool) -> bool {
        let Some(latch) = self.latches[index].as_mut() else {
            return false;
        };
        let rising = latch.evaluate(sample);
        if rising {
            debug!("[{}] {} latched", self.group, self.regs[index].name);
        }
        rising
    }

    /// Returns every register to zero and forgets latch history.
    pub fn reset(&mut self) {
        for reg in self.regs.iter_mut() {
            reg.set(0);
        }
        for latch in self.latches.iter_mut().flatten() {
            latch.reset();
        }
    }

    /// Map entries for this bank placed at `base`.
    pub fn descriptors(&self, base: u64) -> Vec<RegisterDesc> {
        let mut addr = base;
        self.regs
            .iter()
            .enumerate()
            .map(|(index, reg)| {
                let desc = RegisterDesc {
                    name: self.full_name(index),
                    addr,
                    width: reg.width,
                    words: reg.words(),
                    mode: reg.kind.mode(),
                    read_clear: reg.kind.read_clears(),
                };
                addr += reg.words() as u64 * CSR_WORD_BYTES;
                desc
            })
            .collect()
    }
}
