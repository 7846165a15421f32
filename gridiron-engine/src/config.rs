//! Tunable engine configuration.
//!
//! Every field has a serde default, so a partial JSON document only needs to
//! name what it changes.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playoffs::{DEFAULT_SEEDS_PER_CONFERENCE, MAX_SEEDS_PER_CONFERENCE};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub playoffs: PlayoffConfig,
    #[serde(default)]
    pub simulation: SimConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// violation for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check every section against its documented bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.playoffs.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

/// The configuration used when nothing is supplied.
#[must_use]
pub fn default_config() -> EngineConfig {
    EngineConfig::default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffConfig {
    #[serde(default = "PlayoffConfig::default_seeds_per_conference")]
    pub seeds_per_conference: usize,
}

impl PlayoffConfig {
    #[must_use]
    pub const fn default_seeds_per_conference() -> usize {
        DEFAULT_SEEDS_PER_CONFERENCE
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEEDS_PER_CONFERENCE).contains(&self.seeds_per_conference) {
            return Err(ConfigError::RangeViolation {
                field: "playoffs.seeds_per_conference",
                min: 1.0,
                max: crate::numbers::usize_to_f64(MAX_SEEDS_PER_CONFERENCE),
                value: crate::numbers::usize_to_f64(self.seeds_per_conference),
            });
        }
        Ok(())
    }
}

impl Default for PlayoffConfig {
    fn default() -> Self {
        Self {
            seeds_per_conference: Self::default_seeds_per_conference(),
        }
    }
}

/// Play-by-play model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "SimConfig::default_quarters")]
    pub quarters: u8,
    #[serde(default = "SimConfig::default_plays_per_quarter")]
    pub plays_per_quarter: u32,
    #[serde(default = "SimConfig::default_quarter_seconds")]
    pub quarter_seconds: u32,
    #[serde(default = "SimConfig::default_clock_step_min")]
    pub clock_step_min: u32,
    #[serde(default = "SimConfig::default_clock_step_max")]
    pub clock_step_max: u32,
    #[serde(default = "SimConfig::default_base_yards")]
    pub base_yards: f64,
    #[serde(default = "SimConfig::default_power_weight")]
    pub power_weight: f64,
    #[serde(default = "SimConfig::default_yard_std_dev")]
    pub yard_std_dev: f64,
    #[serde(default = "SimConfig::default_min_yards")]
    pub min_yards: i32,
    #[serde(default = "SimConfig::default_max_yards")]
    pub max_yards: i32,
    #[serde(default = "SimConfig::default_run_chance")]
    pub run_chance: f64,
    #[serde(default = "SimConfig::default_touchdown_yards")]
    pub touchdown_yards: i32,
    #[serde(default = "SimConfig::default_touchdown_chance")]
    pub touchdown_chance: f64,
    #[serde(default = "SimConfig::default_field_goal_yards")]
    pub field_goal_yards: i32,
    #[serde(default = "SimConfig::default_field_goal_chance")]
    pub field_goal_chance: f64,
    #[serde(default = "SimConfig::default_turnover_yards")]
    pub turnover_yards: i32,
    #[serde(default = "SimConfig::default_turnover_chance")]
    pub turnover_chance: f64,
}

impl SimConfig {
    #[must_use]
    pub const fn default_quarters() -> u8 {
        4
    }

    #[must_use]
    pub const fn default_plays_per_quarter() -> u32 {
        12
    }

    #[must_use]
    pub const fn default_quarter_seconds() -> u32 {
        900
    }

    #[must_use]
    pub const fn default_clock_step_min() -> u32 {
        15
    }

    #[must_use]
    pub const fn default_clock_step_max() -> u32 {
        45
    }

    #[must_use]
    pub const fn default_base_yards() -> f64 {
        4.0
    }

    #[must_use]
    pub const fn default_power_weight() -> f64 {
        0.2
    }

    #[must_use]
    pub const fn default_yard_std_dev() -> f64 {
        8.0
    }

    #[must_use]
    pub const fn default_min_yards() -> i32 {
        -10
    }

    #[must_use]
    pub const fn default_max_yards() -> i32 {
        80
    }

    #[must_use]
    pub const fn default_run_chance() -> f64 {
        0.45
    }

    #[must_use]
    pub const fn default_touchdown_yards() -> i32 {
        20
    }

    #[must_use]
    pub const fn default_touchdown_chance() -> f64 {
        0.15
    }

    #[must_use]
    pub const fn default_field_goal_yards() -> i32 {
        3
    }

    #[must_use]
    pub const fn default_field_goal_chance() -> f64 {
        0.25
    }

    #[must_use]
    pub const fn default_turnover_yards() -> i32 {
        -5
    }

    #[must_use]
    pub const fn default_turnover_chance() -> f64 {
        0.10
    }

    /// Plays in a full game.
    #[must_use]
    pub fn total_plays(&self) -> u32 {
        u32::from(self.quarters) * self.plays_per_quarter
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.quarters == 0 {
            return Err(ConfigError::MinViolation {
                field: "simulation.quarters",
                min: 1.0,
                value: 0.0,
            });
        }
        if self.clock_step_min > self.clock_step_max {
            return Err(ConfigError::ClockStepRange {
                min: self.clock_step_min,
                max: self.clock_step_max,
            });
        }
        if self.min_yards > self.max_yards {
            return Err(ConfigError::YardRange {
                min: self.min_yards,
                max: self.max_yards,
            });
        }
        if !(self.yard_std_dev.is_finite() && self.yard_std_dev > 0.0) {
            return Err(ConfigError::MinViolation {
                field: "simulation.yard_std_dev",
                min: f64::MIN_POSITIVE,
                value: self.yard_std_dev,
            });
        }
        for (field, value) in [
            ("simulation.run_chance", self.run_chance),
            ("simulation.touchdown_chance", self.touchdown_chance),
            ("simulation.field_goal_chance", self.field_goal_chance),
            ("simulation.turnover_chance", self.turnover_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            quarters: Self::default_quarters(),
            plays_per_quarter: Self::default_plays_per_quarter(),
            quarter_seconds: Self::default_quarter_seconds(),
            clock_step_min: Self::default_clock_step_min(),
            clock_step_max: Self::default_clock_step_max(),
            base_yards: Self::default_base_yards(),
            power_weight: Self::default_power_weight(),
            yard_std_dev: Self::default_yard_std_dev(),
            min_yards: Self::default_min_yards(),
            max_yards: Self::default_max_yards(),
            run_chance: Self::default_run_chance(),
            touchdown_yards: Self::default_touchdown_yards(),
            touchdown_chance: Self::default_touchdown_chance(),
            field_goal_yards: Self::default_field_goal_yards(),
            field_goal_chance: Self::default_field_goal_chance(),
            turnover_yards: Self::default_turnover_yards(),
            turnover_chance: Self::default_turnover_chance(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("clock step window invalid (min {min} > max {max})")]
    ClockStepRange { min: u32, max: u32 },
    #[error("yard clamp invalid (min {min} > max {max})")]
    YardRange { min: i32, max: i32 },
}
