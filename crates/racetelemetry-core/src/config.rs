//! Generator configuration
//!
//! Base values for the simulation, loadable from a JSON file. Every field has
//! a default, so a partial file only overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::generator::{SOC_CEILING, SOC_FLOOR};

/// Errors that can occur while loading a generator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON for this structure
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        /// Offending field name
        field: String,
        /// What the field must satisfy
        message: String,
    },
}

/// Simulation base values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RPM at full throttle in the 1.0 gear
    pub base_rpm: f64,

    /// Tire temperature before noise and wear (°C)
    pub base_tire_temp: f64,

    /// Tire pressure before noise and wear (PSI)
    pub base_tire_pressure: f64,

    /// Battery temperature at session start (°C)
    pub base_battery_temp: f64,

    /// Motor temperature at session start (°C)
    pub base_motor_temp: f64,

    /// State of charge at session start (%), at most [`SOC_CEILING`]
    pub base_soc: f64,

    /// Lower end of the per-call lap completion threshold (seconds)
    pub lap_threshold_min_secs: f64,

    /// Upper end of the per-call lap completion threshold (seconds)
    pub lap_threshold_max_secs: f64,

    /// Throttle position before the first snapshot
    pub initial_throttle: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_rpm: 8000.0,
            base_tire_temp: 85.0,
            base_tire_pressure: 2.3,
            base_battery_temp: 45.0,
            base_motor_temp: 75.0,
            base_soc: 85.0,
            lap_threshold_min_secs: 90.0,
            lap_threshold_max_secs: 120.0,
            initial_throttle: 0.5,
        }
    }
}

impl GeneratorConfig {
    /// Load and validate a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a usable simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("base_rpm", self.base_rpm),
            ("base_tire_temp", self.base_tire_temp),
            ("base_tire_pressure", self.base_tire_pressure),
            ("base_battery_temp", self.base_battery_temp),
            ("base_motor_temp", self.base_motor_temp),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, "must be a finite number"));
            }
        }

        if !(self.base_soc > SOC_FLOOR && self.base_soc <= SOC_CEILING) {
            return Err(invalid("base_soc", "must be in (5, 85]"));
        }

        let (min, max) = (self.lap_threshold_min_secs, self.lap_threshold_max_secs);
        if !(min.is_finite() && min > 0.0) {
            return Err(invalid(
                "lap_threshold_min_secs",
                "must be a positive number of seconds",
            ));
        }
        if !(max.is_finite() && max >= min) {
            return Err(invalid(
                "lap_threshold_max_secs",
                "must be at least lap_threshold_min_secs",
            ));
        }

        if !(0.0..=1.0).contains(&self.initial_throttle) {
            return Err(invalid("initial_throttle", "must be in [0, 1]"));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.to_string(),
    }
}
