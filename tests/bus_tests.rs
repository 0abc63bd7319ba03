//! Integration tests for the CSR bus and register map.

use pocket_csr::common::{AccessType, CsrError};
use pocket_csr::config::Config;
use pocket_csr::csr::AccessMode;
use pocket_csr::soc::System;

const CSR_BASE: u64 = 0xF000_0000;

fn create_system() -> System {
    System::new(&Config::default()).unwrap()
}

/// Tests the address layout of the register groups.
#[test]
fn test_register_addresses() {
    let system = create_system();
    let bus = &system.bus;

    assert_eq!(bus.address_of("bridge.request_read").unwrap(), CSR_BASE);
    assert_eq!(bus.address_of("bridge.slot_id").unwrap(), CSR_BASE + 0x04);
    assert_eq!(bus.address_of("bridge.status").unwrap(), CSR_BASE + 0x18);
    assert_eq!(bus.address_of("audio.out").unwrap(), CSR_BASE + 0x800);
    assert_eq!(bus.address_of("audio.buffer_fill").unwrap(), CSR_BASE + 0x80C);
    assert_eq!(bus.address_of("input.cont1_key").unwrap(), CSR_BASE + 0x1000);
    assert_eq!(bus.address_of("input.cont4_trig").unwrap(), CSR_BASE + 0x102C);
    assert_eq!(bus.address_of("rtc.time_bcd").unwrap(), CSR_BASE + 0x1808);
    assert_eq!(bus.address_of("video.frame_counter").unwrap(), CSR_BASE + 0x2008);
    assert_eq!(bus.address_of("id.chip_id").unwrap(), CSR_BASE + 0x2800);
}

/// Tests that the map describes every register with its mode.
#[test]
fn test_register_map_modes() {
    let system = create_system();
    let map = system.bus.register_map();

    assert_eq!(map.len(), 8 + 4 + 12 + 3 + 3 + 1);

    let status = map.get("bridge.status").unwrap();
    assert_eq!(status.mode, AccessMode::ReadOnly);
    assert!(status.read_clear);
    assert_eq!(status.width, 1);

    let slot = map.get("bridge.slot_id").unwrap();
    assert_eq!(slot.mode, AccessMode::ReadWrite);
    assert_eq!(slot.width, 16);

    let out = map.get("audio.out").unwrap();
    assert_eq!(out.mode, AccessMode::WriteOnly);
    assert!(!out.mode.can_read());

    let chip = map.get("id.chip_id").unwrap();
    assert_eq!(chip.words, 2);

    let addrs: Vec<u64> = map.iter().map(|d| d.addr).collect();
    let mut sorted = addrs.clone();
    sorted.sort();
    assert_eq!(addrs, sorted);
}

/// Tests JSON and C header export of the map.
#[test]
fn test_register_map_export() {
    let system = create_system();
    let map = system.bus.register_map();

    let json: serde_json::Value = serde_json::from_str(&map.to_json().unwrap()).unwrap();
    assert_eq!(json["csr_base"], CSR_BASE);
    let regs = json["registers"].as_array().unwrap();
    let vsync = regs
        .iter()
        .find(|r| r["name"] == "video.vsync_status")
        .unwrap();
    assert_eq!(vsync["mode"], "ro");
    assert_eq!(vsync["read_clear"], true);

    let header = map.to_c_header();
    assert!(header.contains("#define CSR_VIDEO_FRAME_COUNTER_ADDR 0xf0002008L"));
    assert!(header.contains("#define CSR_ID_CHIP_ID_SIZE 2"));
    assert!(header.contains("#define CSR_BRIDGE_STATUS_READ_CLEAR 1"));
}

/// Tests that reading a strobe register fails fast.
#[test]
fn test_read_of_strobe_is_invalid() {
    let mut system = create_system();

    let err = system.read("bridge.request_read").unwrap_err();
    assert_eq!(
        err,
        CsrError::InvalidAccess {
            name: "bridge.request_read".to_string(),
            access: AccessType::Read,
        }
    );
    assert!(system.read("audio.out").is_err());
    assert!(system.read("audio.buffer_flush").is_err());
    assert_eq!(system.bus.stats.rejected_accesses, 3);
}

/// Tests storage writes are truncated to the register width.
#[test]
fn test_storage_write_truncates() {
    let mut system = create_system();

    system.write("bridge.slot_id", 0x1_2345).unwrap();
    assert_eq!(system.read("bridge.slot_id").unwrap(), 0x2345);

    system.write("audio.playback_en", 0xFE).unwrap();
    assert_eq!(system.read("audio.playback_en").unwrap(), 0);

    system.write("bridge.transfer_length", 0xFFFF_FFFF).unwrap();
    assert_eq!(system.read("bridge.transfer_length").unwrap(), 0xFFFF_FFFF);
}

/// Tests that writes to read-only registers are dropped.
#[test]
fn test_write_to_status_is_ignored() {
    let mut system = create_system();

    system.write("rtc.unix_seconds", 1234).unwrap();
    assert_eq!(system.read("rtc.unix_seconds").unwrap(), 0);
    assert_eq!(system.bus.stats.ignored_writes, 1);
}

/// Tests a strict bus rejects writes to read-only registers.
#[test]
fn test_strict_write_to_status_is_rejected() {
    let mut config = Config::default();
    config.general.strict_access = true;
    let mut system = System::new(&config).unwrap();

    assert_eq!(
        system.write("rtc.unix_seconds", 1234),
        Err(CsrError::InvalidAccess {
            name: "rtc.unix_seconds".to_string(),
            access: AccessType::Write,
        })
    );
    assert_eq!(
        system.bus.write_u32(CSR_BASE + 0x2804, 1),
        Err(CsrError::InvalidAccess {
            name: "id.chip_id".to_string(),
            access: AccessType::Write,
        })
    );
    assert_eq!(system.bus.stats.rejected_accesses, 2);
    assert_eq!(system.bus.stats.ignored_writes, 0);

    system.write("bridge.slot_id", 7).unwrap();
    system.write("bridge.request_read", 1).unwrap();
    assert_eq!(system.read("bridge.slot_id").unwrap(), 7);
}

/// Tests unmapped, misaligned and unknown accesses.
#[test]
fn test_bad_addresses() {
    let mut system = create_system();
    let bus = &mut system.bus;

    assert_eq!(bus.read_u32(0x1000), Err(CsrError::UnmappedAddress(0x1000)));
    assert_eq!(
        bus.read_u32(CSR_BASE + 2),
        Err(CsrError::Misaligned(CSR_BASE + 2))
    );
    assert!(matches!(
        bus.read_u32(CSR_BASE + 0x7FC),
        Err(CsrError::UnmappedOffset { .. })
    ));
    assert_eq!(
        bus.read_named("bridge.nothing"),
        Err(CsrError::UnknownRegister("bridge.nothing".to_string()))
    );
    assert!(bus.is_valid_address(CSR_BASE + 0x2FFC));
    assert!(!bus.is_valid_address(CSR_BASE + 0x3000));
}

/// Tests raw word access to the 64-bit chip id.
#[test]
fn test_chip_id_words() {
    let mut system = create_system();
    let mut signals = pocket_csr::sim::ExternalSignals::default();
    signals.chip_id = 0x0123_4567_89AB_CDEF;
    system.step(&signals);

    assert_eq!(system.bus.read_u32(CSR_BASE + 0x2800).unwrap(), 0x0123_4567);
    assert_eq!(system.bus.read_u32(CSR_BASE + 0x2804).unwrap(), 0x89AB_CDEF);
    assert_eq!(system.read("id.chip_id").unwrap(), 0x0123_4567_89AB_CDEF);
}

/// Tests controller and RTC status registers follow the fabric.
#[test]
fn test_status_registers_follow_signals() {
    let mut system = create_system();
    let mut signals = pocket_csr::sim::ExternalSignals::default();
    signals.controllers[0].key = 0x8001;
    signals.controllers[2].joy = 0x1234_5678;
    signals.controllers[3].trig = 0xFFFF;
    signals.rtc.unix_seconds = 1_700_000_000;
    signals.rtc.date_bcd = 0x2023_1123;
    system.step(&signals);

    assert_eq!(system.read("input.cont1_key").unwrap(), 0x8001);
    assert_eq!(system.read("input.cont3_joy").unwrap(), 0x1234_5678);
    assert_eq!(system.read("input.cont4_trig").unwrap(), 0xFFFF);
    assert_eq!(system.read("input.cont2_key").unwrap(), 0);
    assert_eq!(system.read("rtc.unix_seconds").unwrap(), 1_700_000_000);
    assert_eq!(system.read("rtc.date_bcd").unwrap(), 0x2023_1123);

    signals.controllers[0].key = 0;
    system.step(&signals);
    assert_eq!(system.read("input.cont1_key").unwrap(), 0);
}

/// Tests that reset returns every register to zero.
#[test]
fn test_reset() {
    let mut system = create_system();
    system.write("bridge.data_offset", 0x100).unwrap();
    let mut signals = pocket_csr::sim::ExternalSignals::default();
    signals.rtc.time_bcd = 0x1200;
    system.step(&signals);

    system.reset();
    assert_eq!(system.read("bridge.data_offset").unwrap(), 0);
    assert_eq!(system.read("rtc.time_bcd").unwrap(), 0);
    assert_eq!(system.bus.stats.steps, 0);
}
