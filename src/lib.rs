//! CSR Register Bridge Simulator Library.
//!
//! This crate emulates the memory-mapped control/status registers that
//! bridge a soft CPU to the hardware of a retro handheld: file transfers,
//! audio streaming, controller input, the real-time clock and video sync.
//! Evaluation is stepped and single-threaded; every step samples the
//! hardware-side signals once and updates every register group.
//!
//! # Register kinds
//!
//! * **Strobe**: write-only, each write is a one-step pulse to the fabric.
//! * **Storage**: read-write value held for the fabric.
//! * **Status**: read-only value driven by the fabric.
//! * **Latched status**: read-only bit set by a rising edge, cleared by a read.
//!
//! # Modules
//!
//! * `common`: Shared types, constants, and error handling.
//! * `config`: Configuration loading and parsing.
//! * `csr`: Register primitives, edge latch, synchronizer, register map.
//! * `sim`: Signals, transfer engine, video timing, stepped simulator.
//! * `soc`: CSR bus, register groups, system builder.
//! * `stats`: Run statistics collection.

/// Shared types, constants and error handling.
pub mod common;

/// Configuration system for the CSR window and register groups.
///
/// Loads and parses TOML configuration files; every field has a default.
pub mod config;

/// Register primitives.
///
/// Typed registers, per-group register banks with word decoding, the
/// read-clear edge latch and the generated register map.
pub mod csr;

/// Simulation harness.
///
/// Hardware-side signal injection, the bridge transfer engine model, video
/// timing stimulus and the stepped evaluation loop.
pub mod sim;

/// System-on-Chip components.
///
/// Implements the CSR bus and the register groups (bridge, audio, input,
/// rtc, video, id) that form the register bridge.
pub mod soc;

/// Run statistics collection and reporting.
pub mod stats;
