//! Monitor configuration.
//!
//! Settings are layered: built-in defaults, an optional config file, then
//! `SERVER_MONITOR_*` environment variables. Command-line overrides are
//! applied by the binary on top of the loaded value.

use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::history::{DEFAULT_CADENCE, DEFAULT_HISTORY_LEN};
use crate::data::Thresholds;
use crate::source::SimTime;

/// Environment variable prefix, e.g. `SERVER_MONITOR_CADENCE=30` or
/// `SERVER_MONITOR_THRESHOLDS__ALARM=0.95`.
pub const ENV_PREFIX: &str = "SERVER_MONITOR";

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid thresholds: need 0 <= warning ({warning}) < alarm ({alarm})")]
    Thresholds { warning: f64, alarm: f64 },

    #[error("history length must be at least 1")]
    EmptyHistory,

    #[error("cadence must not be negative (got {0})")]
    NegativeCadence(SimTime),

    #[error("blink interval must be greater than zero")]
    ZeroBlinkInterval,

    #[error("load scale must be positive (got {0})")]
    LoadScale(f64),
}

/// Process-wide monitor settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub thresholds: Thresholds,
    /// Number of history slots shown in the bar chart.
    pub history_len: usize,
    /// Sim time between two history appends.
    pub cadence: SimTime,
    /// Wall time between two alarm blink toggles.
    pub blink_interval_ms: u64,
    /// Multiplier applied to each item's load requirement before rounding.
    pub load_scale: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            history_len: DEFAULT_HISTORY_LEN,
            cadence: DEFAULT_CADENCE,
            blink_interval_ms: 300,
            load_scale: 2.2,
        }
    }
}

impl MonitorConfig {
    /// Load settings from an optional file plus the environment.
    ///
    /// A missing file is not an error when `path` is `None`; an explicitly
    /// named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check invariants the core relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Thresholds { warning, alarm } = self.thresholds;
        if !(warning >= 0.0 && warning < alarm) {
            return Err(SettingsError::Thresholds { warning, alarm });
        }
        if self.history_len == 0 {
            return Err(SettingsError::EmptyHistory);
        }
        if self.cadence < 0 {
            return Err(SettingsError::NegativeCadence(self.cadence));
        }
        if self.blink_interval_ms == 0 {
            return Err(SettingsError::ZeroBlinkInterval);
        }
        if !(self.load_scale > 0.0) {
            return Err(SettingsError::LoadScale(self.load_scale));
        }
        Ok(())
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }
}
