//! Configuration for the simulator.
//!
//! This module defines the hierarchical configuration structure. It provides:
//! 1. **Defaults:** Baseline machine behaviour (full pipeline, renaming and
//!    forwarding on, 100-cycle memory).
//! 2. **Structures:** `general`, `pipeline`, and `memory` sections.
//!
//! Configuration can be deserialized from JSON or built from
//! `Config::default()` and adjusted by the CLI flags.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Default clock throttle (0 = full speed).
    pub const SPEED: u64 = 0;

    /// Default memory latency in cycles.
    pub const MEM_LATENCY: u64 = crate::common::constants::MEM_LATENCY_CYCLES;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::default();
/// assert!(config.pipeline.rename_registers);
/// assert_eq!(config.memory.latency_cycles, 100);
///
/// let config: Config =
///     serde_json::from_str(r#"{"pipeline": {"forward_results": false}}"#).unwrap();
/// assert!(!config.pipeline.forward_results);
/// assert!(config.pipeline.pipelined);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline feature flags.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Memory timing.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Clock throttle: a wall-clock pause of `speed / 4` seconds before
    /// each tick. Purely a viewing aid; no semantic effect.
    #[serde(default = "GeneralConfig::default_speed")]
    pub speed: u64,

    /// Abort the run after this many cycles without a HALT.
    /// `None` runs until HALT; a program that never halts runs forever.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

impl GeneralConfig {
    fn default_speed() -> u64 {
        defaults::SPEED
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            speed: defaults::SPEED,
            max_cycles: None,
        }
    }
}

/// Pipeline feature flags.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// When false, the clock additionally ticks after every stage step,
    /// serialising the machine for comparison runs.
    #[serde(default = "PipelineConfig::default_true")]
    pub pipelined: bool,

    /// When false, destinations are not renamed and the destination
    /// register also participates in the hazard wait-check.
    #[serde(default = "PipelineConfig::default_true")]
    pub rename_registers: bool,

    /// When false, a queued but un-retired writeback entry does not
    /// satisfy a read; consumers wait for the physical write.
    #[serde(default = "PipelineConfig::default_true")]
    pub forward_results: bool,
}

impl PipelineConfig {
    fn default_true() -> bool {
        true
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pipelined: true,
            rename_registers: true,
            forward_results: true,
        }
    }
}

/// Memory timing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Cycles a load or store occupies the MEM stage.
    #[serde(default = "MemoryConfig::default_latency")]
    pub latency_cycles: u64,
}

impl MemoryConfig {
    fn default_latency() -> u64 {
        defaults::MEM_LATENCY
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            latency_cycles: defaults::MEM_LATENCY,
        }
    }
}
