//! Asset Loader.
//!
//! Reads slot asset files from disk and hands them to the transfer engine.
//! Slots are given on the command line as `ID=PATH`.

use log::info;
use std::fs;

use crate::common::{CsrError, CsrResult};
use crate::sim::transfer::SlotTransferEngine;

/// Parses a `ID=PATH` slot argument.
pub fn parse_slot_arg(arg: &str) -> CsrResult<(u16, &str)> {
    let (id, path) = arg
        .split_once('=')
        .ok_or_else(|| CsrError::Config(format!("slot '{}' is not ID=PATH", arg)))?;
    let id = parse_u16(id.trim())
        .ok_or_else(|| CsrError::Config(format!("invalid slot id '{}'", id)))?;
    Ok((id, path))
}

fn parse_u16(s: &str) -> Option<u16> {
    match s.strip_prefix("0x") {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Loads a file into an engine slot.
pub fn load_slot(engine: &mut SlotTransferEngine, slot_id: u16, path: &str) -> CsrResult<usize> {
    let data = fs::read(path).map_err(|e| CsrError::Config(format!("{}: {}", path, e)))?;
    let len = data.len();
    info!("[Loader] Slot {} <- '{}' ({} bytes)", slot_id, path, len);
    engine.insert_slot(slot_id, data);
    Ok(len)
}
