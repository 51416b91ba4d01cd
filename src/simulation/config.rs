use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bus::DispatchPolicy;
use crate::error::ConfigError;
use crate::machine::DEFAULT_STOCK_LEVEL;

/// Largest accepted `initialStock`. Keeps simulated arithmetic far from `i64` bounds.
pub const MAX_INITIAL_STOCK: i64 = 1_000_000;

/// How low-stock and stock-ok alerts are produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alerting {
    /// Stock subscribers publish alerts themselves: a warning on every sale
    /// below the threshold, an ok on every upward crossing.
    Direct,
    /// Stock subscribers stay quiet; the latch subscribers publish once per
    /// threshold crossing. A machine that starts healthy stays silent until it
    /// has first dropped below the threshold.
    #[default]
    Latched,
}

/// Settings for a [`Simulation`](super::Simulation) run.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SimulationConfig {
    pub machine_ids: Vec<String>,
    pub initial_stock: i64,
    pub event_count: usize,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub alerting: Alerting,
    pub dispatch: DispatchPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            machine_ids: vec!["001".into(), "002".into(), "003".into()],
            initial_stock: DEFAULT_STOCK_LEVEL,
            event_count: 10,
            seed: None,
            alerting: Alerting::default(),
            dispatch: DispatchPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path` and parse it with [`SimulationConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject an empty fleet, duplicate ids and out-of-range initial stock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.machine_ids.is_empty() {
            return Err(ConfigError::Invalid("machineIds must not be empty".into()));
        }

        if !(0..=MAX_INITIAL_STOCK).contains(&self.initial_stock) {
            return Err(ConfigError::Invalid(format!(
                "initialStock must be between 0 and {MAX_INITIAL_STOCK}, got {}",
                self.initial_stock
            )));
        }

        let mut seen = HashSet::new();
        for id in &self.machine_ids {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate machine id {id:?}")));
            }
        }
        Ok(())
    }
}
