//! Configuration loading and typed config structures for the swarm colony.
//!
//! The canonical configuration lives in `swarm-config.yaml` at the project
//! root. Every field has a default, so a missing section (or an empty file)
//! yields the stock tuning.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level colony configuration, mirroring `swarm-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SwarmConfig {
    /// Population targets and rebalancing thresholds.
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Spawn energy model.
    #[serde(default)]
    pub energy: EnergyConfig,

    /// Host loop settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SwarmConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. Blank input yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Fleet planner tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    /// Desired harvesters per energy source.
    #[serde(default = "default_harvesters_per_source")]
    pub harvesters_per_source: u32,

    /// Workers are added while `workers * worker_ratio < harvesters`.
    #[serde(default = "default_worker_ratio")]
    pub worker_ratio: u32,

    /// Ticks a refilling agent may wait before it is sent to harvest.
    #[serde(default = "default_refill_patience")]
    pub refill_patience: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            harvesters_per_source: default_harvesters_per_source(),
            worker_ratio: default_worker_ratio(),
            refill_patience: default_refill_patience(),
        }
    }
}

/// How much energy a room can put into one spawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnergyConfig {
    /// Energy available with no extensions.
    #[serde(default = "default_base_energy")]
    pub base_energy: u32,

    /// Extra energy per built extension.
    #[serde(default = "default_energy_per_extension")]
    pub energy_per_extension: u32,
}

impl EnergyConfig {
    /// Spawn energy available in a room with `extensions` built.
    pub const fn available_energy(&self, extensions: u32) -> u32 {
        self.base_energy
            .saturating_add(self.energy_per_extension.saturating_mul(extensions))
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base_energy: default_base_energy(),
            energy_per_extension: default_energy_per_extension(),
        }
    }
}

/// Host loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks. `0` runs until interrupted.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Where the memory store is written at shutdown.
    #[serde(default = "default_memory_snapshot_path")]
    pub memory_snapshot_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
            memory_snapshot_path: default_memory_snapshot_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_harvesters_per_source() -> u32 {
    3
}

const fn default_worker_ratio() -> u32 {
    2
}

const fn default_refill_patience() -> u32 {
    25
}

const fn default_base_energy() -> u32 {
    300
}

const fn default_energy_per_extension() -> u32 {
    50
}

const fn default_tick_interval_ms() -> u64 {
    500
}

const fn default_max_ticks() -> u64 {
    1500
}

fn default_memory_snapshot_path() -> PathBuf {
    PathBuf::from("swarm-memory.json")
}

fn default_log_level() -> String {
    String::from("info")
}
