pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{CELL_WIDTH, FRAME_PERIOD_MS, MAX_CELL_WIDTH, GRAVITY_PERIOD_MS, SOFT_DROP_PERIOD_MS};
use loader::ConfigError;

// Settings read from the config file. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gravity_period_ms: u64,
    pub soft_drop_period_ms: u64,
    pub frame_period_ms: u64,
    pub cell_width: u16,
    // Fixed seed for a reproducible shape sequence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gravity_period_ms: GRAVITY_PERIOD_MS,
            soft_drop_period_ms: SOFT_DROP_PERIOD_MS,
            frame_period_ms: FRAME_PERIOD_MS,
            cell_width: CELL_WIDTH,
            seed: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn gravity_period(&self) -> Duration {
        Duration::from_millis(self.gravity_period_ms)
    }

    #[must_use]
    pub fn soft_drop_period(&self) -> Duration {
        Duration::from_millis(self.soft_drop_period_ms)
    }

    #[must_use]
    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_period_ms)
    }

    /// Rejects settings the game loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("gravity_period_ms", self.gravity_period_ms),
            ("soft_drop_period_ms", self.soft_drop_period_ms),
            ("frame_period_ms", self.frame_period_ms),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
        }
        if !(1..=MAX_CELL_WIDTH).contains(&self.cell_width) {
            return Err(ConfigError::Invalid(format!(
                "cell_width must be between 1 and {MAX_CELL_WIDTH}"
            )));
        }
        Ok(())
    }
}
