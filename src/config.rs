use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::common::constants::{AUDIO_FIFO_DEPTH, DEFAULT_CSR_BASE, DEFAULT_REGION_SIZE};
use crate::common::{CsrError, CsrResult};

const DEFAULT_RAM_BASE: u64 = 0x4000_0000;
const DEFAULT_RAM_SIZE: usize = 0x10_0000;
const BYTES_PER_STEP: usize = 64;

const V_ACTIVE: u32 = 240;
const V_BLANKING: u32 = 15;
const V_SYNC_OFFSET: u32 = 1;
const V_SYNC_WIDTH: u32 = 8;
const VIDEO_SYNC_STAGES: usize = 0;

/// Top-level simulator configuration.
///
/// Every section and field is optional in the TOML source; missing values
/// fall back to the defaults of the 266x240 handheld SoC.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub video: VideoConfig,
}

impl Config {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(src: &str) -> CsrResult<Self> {
        toml::from_str(src).map_err(|e| CsrError::Config(e.to_string()))
    }

    /// Reads and parses a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> CsrResult<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .map_err(|e| CsrError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&src)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GeneralConfig {
    /// Log every bus access at `trace` level.
    #[serde(default)]
    pub trace_accesses: bool,

    /// Reject writes to read-only registers instead of dropping them.
    #[serde(default)]
    pub strict_access: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_csr_base")]
    pub csr_base: u64,

    #[serde(default = "default_region_size")]
    pub region_size: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            csr_base: default_csr_base(),
            region_size: default_region_size(),
        }
    }
}

/// How the transfer engine treats `transfer_length == 0xFFFF_FFFF`.
///
/// The platform documents the value as "entire file", but firmware 1.1
/// answers it as a file-size query and moves no data.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxLengthPolicy {
    #[default]
    EntireFile,
    FileSizeQuery,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BridgeConfig {
    #[serde(default)]
    pub max_length_policy: MaxLengthPolicy,

    /// Synchronizer depth for `complete_trigger`; 0 for the same clock domain.
    #[serde(default)]
    pub sync_stages: usize,

    #[serde(default = "default_bytes_per_step")]
    pub bytes_per_step: usize,

    #[serde(default = "default_ram_base")]
    pub ram_base: u64,

    #[serde(default = "default_ram_size")]
    pub ram_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_length_policy: MaxLengthPolicy::default(),
            sync_stages: 0,
            bytes_per_step: default_bytes_per_step(),
            ram_base: default_ram_base(),
            ram_size: default_ram_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    #[serde(default = "default_fifo_depth")]
    pub fifo_depth: usize,

    /// Steps between two samples consumed while playback is enabled.
    #[serde(default = "default_consume_interval")]
    pub consume_interval: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            fifo_depth: default_fifo_depth(),
            consume_interval: default_consume_interval(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoConfig {
    #[serde(default = "default_v_active")]
    pub v_active: u32,

    #[serde(default = "default_v_blanking")]
    pub v_blanking: u32,

    #[serde(default = "default_v_sync_offset")]
    pub v_sync_offset: u32,

    #[serde(default = "default_v_sync_width")]
    pub v_sync_width: u32,

    /// Synchronizer depth for `vsync` crossing from the video clock domain.
    #[serde(default = "default_video_sync_stages")]
    pub sync_stages: usize,
}

impl VideoConfig {
    /// Total lines per frame, saturating at `u32::MAX`.
    pub fn v_total(&self) -> u32 {
        self.v_active.saturating_add(self.v_blanking)
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            v_active: default_v_active(),
            v_blanking: default_v_blanking(),
            v_sync_offset: default_v_sync_offset(),
            v_sync_width: default_v_sync_width(),
            sync_stages: default_video_sync_stages(),
        }
    }
}

fn default_csr_base() -> u64 {
    DEFAULT_CSR_BASE
}

fn default_region_size() -> u64 {
    DEFAULT_REGION_SIZE
}

fn default_bytes_per_step() -> usize {
    BYTES_PER_STEP
}

fn default_ram_base() -> u64 {
    DEFAULT_RAM_BASE
}

fn default_ram_size() -> usize {
    DEFAULT_RAM_SIZE
}

fn default_fifo_depth() -> usize {
    AUDIO_FIFO_DEPTH
}

fn default_consume_interval() -> u64 {
    1
}

fn default_v_active() -> u32 {
    V_ACTIVE
}

fn default_v_blanking() -> u32 {
    V_BLANKING
}

fn default_v_sync_offset() -> u32 {
    V_SYNC_OFFSET
}

fn default_v_sync_width() -> u32 {
    V_SYNC_WIDTH
}

fn default_video_sync_stages() -> usize {
    VIDEO_SYNC_STAGES
}
