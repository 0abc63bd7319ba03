//! System-on-Chip (SoC) Builder.
//!
//! This module defines the `System` structure, the container for the CSR
//! bus and every register group. It places the groups in consecutive
//! regions of the CSR window according to the provided configuration.

use crate::common::{CsrError, CsrResult, CSR_WORD_BYTES};
use crate::config::Config;
use crate::sim::signals::{ExternalSignals, FabricOutputs};
use crate::soc::devices::{Audio, Bridge, ChipId, Input, Rtc, Video};
use crate::soc::interconnect::Bus;
use crate::soc::traits::CsrDevice;

/// The register bridge: CSR bus plus all register groups.
pub struct System {
    /// CSR bus the CPU accesses.
    pub bus: Bus,
}

impl System {
    /// Creates a new system instance with the specified configuration.
    ///
    /// Groups take consecutive regions of the CSR window in the order
    /// bridge, audio, input, rtc, video, id.
    ///
    /// # Arguments
    ///
    /// * `config` - System configuration specifying the CSR window and group parameters
    ///
    /// # Errors
    ///
    /// `CsrError::Config` when the window is misaligned, a region is too
    /// small for its group, or the window does not fit the address space.
    pub fn new(config: &Config) -> CsrResult<Self> {
        let base = config.system.csr_base;
        let region = config.system.region_size;

        if base % CSR_WORD_BYTES != 0 {
            return Err(CsrError::Config(format!(
                "csr_base {:#x} is not word aligned",
                base
            )));
        }
        if region == 0 || region % CSR_WORD_BYTES != 0 {
            return Err(CsrError::Config(format!(
                "region_size {:#x} is not a non-zero multiple of {}",
                region, CSR_WORD_BYTES
            )));
        }

        let region_base = |slot: u64| -> CsrResult<u64> {
            slot.checked_mul(region)
                .and_then(|offset| base.checked_add(offset))
                .filter(|start| start.checked_add(region).is_some())
                .ok_or_else(|| {
                    CsrError::Config(format!(
                        "region {} at {:#x} + {} * {:#x} overflows the address space",
                        slot, base, slot, region
                    ))
                })
        };

        let groups: Vec<Box<dyn CsrDevice>> = vec![
            Box::new(Bridge::new(
                region_base(0)?,
                region,
                config.bridge.sync_stages,
            )),
            Box::new(Audio::new(region_base(1)?, region, &config.audio)),
            Box::new(Input::new(region_base(2)?, region)),
            Box::new(Rtc::new(region_base(3)?, region)),
            Box::new(Video::new(region_base(4)?, region, &config.video)),
            Box::new(ChipId::new(region_base(5)?, region)),
        ];

        let mut bus = Bus::new(base);
        bus.trace = bus.trace || config.general.trace_accesses;
        bus.strict = config.general.strict_access;

        for group in groups {
            let span = group.bank().span();
            if span > region {
                return Err(CsrError::Config(format!(
                    "region_size {:#x} too small for group {} ({:#x} bytes)",
                    region,
                    group.name(),
                    span
                )));
            }
            bus.add_device(group);
        }

        Ok(Self { bus })
    }

    /// Advances the system state by one evaluation step.
    pub fn step(&mut self, signals: &ExternalSignals) {
        self.bus.step(signals);
    }

    /// Outputs driven into the fabric by the last step.
    pub fn outputs(&self) -> FabricOutputs {
        self.bus.outputs()
    }

    /// Returns every register to its power-on value.
    pub fn reset(&mut self) {
        self.bus.reset();
    }

    pub fn read(&mut self, name: &str) -> CsrResult<u64> {
        self.bus.read_named(name)
    }

    pub fn write(&mut self, name: &str, value: u64) -> CsrResult<()> {
        self.bus.write_named(name, value)
    }
}
