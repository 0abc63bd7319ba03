//! Generated register map.
//!
//! The map is the host-facing description of the CSR window: one entry per
//! register with its address, width and access mode. It can be exported as
//! JSON or as a C header of address defines for driver code.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

use super::register::AccessMode;
use crate::common::CSR_WORD_BYTES;

/// Host-visible description of one register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterDesc {
    /// Fully qualified name, `group.register`.
    pub name: String,
    /// Address of the first (most significant) bus word.
    pub addr: u64,
    /// Width in bits.
    pub width: u32,
    /// Number of 32-bit bus words.
    pub words: usize,
    /// Access mode.
    pub mode: AccessMode,
    /// Reading clears the register.
    pub read_clear: bool,
}

#[derive(Serialize)]
struct MapDocument<'a> {
    csr_base: u64,
    registers: &'a [RegisterDesc],
}

/// Name -> address/width/mode map of every register on the bus.
#[derive(Clone, Debug, Default)]
pub struct RegisterMap {
    base: u64,
    entries: Vec<RegisterDesc>,
    by_name: HashMap<String, usize>,
}

impl RegisterMap {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Adds entries, keeping the map ordered by address.
    pub fn extend<I: IntoIterator<Item = RegisterDesc>>(&mut self, descs: I) {
        self.entries.extend(descs);
        self.entries.sort_by_key(|d| d.addr);
        self.by_name = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();
    }

    pub fn get(&self, name: &str) -> Option<&RegisterDesc> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// The register whose words cover `addr`.
    pub fn at(&self, addr: u64) -> Option<&RegisterDesc> {
        let idx = self.entries.partition_point(|d| d.addr <= addr);
        let desc = self.entries.get(idx.checked_sub(1)?)?;
        let end = desc.addr + desc.words as u64 * CSR_WORD_BYTES;
        (addr < end).then_some(desc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisterDesc> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON document of the map.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&MapDocument {
            csr_base: self.base,
            registers: &self.entries,
        })
    }

    /// C header with `CSR_<NAME>_ADDR`, `_SIZE` and `_WIDTH` defines.
    pub fn to_c_header(&self) -> String {
        let mut out = String::new();
        out.push_str("#ifndef __GENERATED_POCKET_CSR_H\n");
        out.push_str("#define __GENERATED_POCKET_CSR_H\n\n");
        let _ = writeln!(out, "#define CSR_BASE {:#010x}L\n", self.base);

        for desc in &self.entries {
            let ident = desc.name.replace('.', "_").to_uppercase();
            let _ = writeln!(out, "#define CSR_{}_ADDR {:#010x}L", ident, desc.addr);
            let _ = writeln!(out, "#define CSR_{}_SIZE {}", ident, desc.words);
            let _ = writeln!(out, "#define CSR_{}_WIDTH {}", ident, desc.width);
            if desc.read_clear {
                let _ = writeln!(out, "#define CSR_{}_READ_CLEAR 1", ident);
            }
        }

        out.push_str("\n#endif\n");
        out
    }
}
