//! Telemetry snapshot data model
//!
//! Plain serializable value types produced once per refresh tick. Field names
//! and units are stable; dashboards index into them directly or via JSON.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wheel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// Front left
    #[serde(rename = "FL")]
    FrontLeft,
    /// Front right
    #[serde(rename = "FR")]
    FrontRight,
    /// Rear left
    #[serde(rename = "RL")]
    RearLeft,
    /// Rear right
    #[serde(rename = "RR")]
    RearRight,
}

impl Corner {
    /// All corners in display order
    pub const ALL: [Corner; 4] = [
        Corner::FrontLeft,
        Corner::FrontRight,
        Corner::RearLeft,
        Corner::RearRight,
    ];

    /// Short label used by dashboards and status messages
    pub fn label(&self) -> &'static str {
        match self {
            Corner::FrontLeft => "FL",
            Corner::FrontRight => "FR",
            Corner::RearLeft => "RL",
            Corner::RearRight => "RR",
        }
    }

    /// Front tires work harder and get the wider noise bands
    pub fn is_front(&self) -> bool {
        matches!(self, Corner::FrontLeft | Corner::FrontRight)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Temperature and pressure of one tire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TireReading {
    /// Surface temperature in °C
    pub temperature: f64,
    /// Pressure in PSI
    pub pressure: f64,
}

/// Engine readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineReadings {
    /// Engine speed in revolutions per minute
    pub rpm: u32,
    /// Road speed in km/h
    pub speed: u32,
    /// Throttle opening, 0.0 to 1.0
    pub throttle_position: f64,
}

/// Battery and motor temperatures in °C
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalReadings {
    /// Battery pack temperature
    pub battery_temp: f64,
    /// Drive motor temperature
    pub motor_temp: f64,
}

/// Battery state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerReadings {
    /// State of charge in percent
    pub soc: f64,
    /// Power flow in kW; negative values are draw
    pub power_kw: f64,
}

/// Lap timing state at capture time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LapTimes {
    /// Seconds since the current lap started
    pub current_lap_time: f64,
    /// Fastest completed lap, if any
    pub best_lap_time: Option<f64>,
    /// Most recently completed lap, if any
    pub previous_lap_time: Option<f64>,
    /// Lap number, starting at 1
    pub current_lap: u32,
}

/// Status LED color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    /// Nominal
    Green,
    /// Warning
    Yellow,
    /// Critical
    Red,
}

impl IndicatorColor {
    /// Lowercase name as used in the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorColor::Green => "green",
            IndicatorColor::Yellow => "yellow",
            IndicatorColor::Red => "red",
        }
    }
}

impl fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the status LED bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIndicator {
    /// LED color
    pub color: IndicatorColor,
    /// Tooltip text, e.g. "FL Overheated"
    pub status: String,
}

impl StatusIndicator {
    /// Create a new indicator
    pub fn new(color: IndicatorColor, status: impl Into<String>) -> Self {
        Self {
            color,
            status: status.into(),
        }
    }

    /// True for yellow and red entries
    pub fn is_warning(&self) -> bool {
        self.color != IndicatorColor::Green
    }
}

/// Complete telemetry package for one refresh tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Tire readings keyed by corner (FL, FR, RL, RR)
    pub tires: BTreeMap<Corner, TireReading>,
    /// Engine readings
    pub engine: EngineReadings,
    /// Battery and motor temperatures
    pub thermal: ThermalReadings,
    /// Charge and power draw
    pub power: PowerReadings,
    /// Lap timing
    pub lap_times: LapTimes,
    /// Status LED bar, warnings first
    pub status_indicators: Vec<StatusIndicator>,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

/// Names of the flattened numeric channels, matching [`TelemetrySnapshot::channel_values`]
pub fn channel_names() -> Vec<String> {
    let mut names = Vec::with_capacity(20);
    for corner in Corner::ALL {
        names.push(format!("{}.temperature", corner));
        names.push(format!("{}.pressure", corner));
    }
    names.extend(
        [
            "rpm",
            "speed",
            "throttle_position",
            "battery_temp",
            "motor_temp",
            "soc",
            "power_kw",
            "current_lap_time",
            "best_lap_time",
            "previous_lap_time",
            "current_lap",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    names
}

impl TelemetrySnapshot {
    /// Tire reading for one corner
    pub fn tire(&self, corner: Corner) -> Option<&TireReading> {
        self.tires.get(&corner)
    }

    /// Flatten the numeric fields into channel order.
    ///
    /// Missing lap times are reported as NaN.
    pub fn channel_values(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(20);
        for corner in Corner::ALL {
            match self.tires.get(&corner) {
                Some(tire) => {
                    values.push(tire.temperature);
                    values.push(tire.pressure);
                }
                None => {
                    values.push(f64::NAN);
                    values.push(f64::NAN);
                }
            }
        }
        values.push(self.engine.rpm as f64);
        values.push(self.engine.speed as f64);
        values.push(self.engine.throttle_position);
        values.push(self.thermal.battery_temp);
        values.push(self.thermal.motor_temp);
        values.push(self.power.soc);
        values.push(self.power.power_kw);
        values.push(self.lap_times.current_lap_time);
        values.push(self.lap_times.best_lap_time.unwrap_or(f64::NAN));
        values.push(self.lap_times.previous_lap_time.unwrap_or(f64::NAN));
        values.push(self.lap_times.current_lap as f64);
        values
    }

    /// Iterate over the yellow and red indicators
    pub fn warnings(&self) -> impl Iterator<Item = &StatusIndicator> {
        self.status_indicators.iter().filter(|i| i.is_warning())
    }
}
