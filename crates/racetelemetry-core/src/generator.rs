//! Telemetry snapshot generator
//!
//! Synthesizes plausible race-car telemetry for dashboard prototypes. Values
//! follow simple ramps of elapsed session time with uniform noise on top, and
//! every physical quantity is clamped to its gauge range after the noise is
//! applied.
//!
//! One generator is one dashboard session. Hosts serving several clients from
//! one session should go through [`crate::shared::SharedGenerator`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ConfigError, GeneratorConfig};
use crate::lap::{seconds_since, LapTimer};
use crate::snapshot::{
    Corner, EngineReadings, PowerReadings, TelemetrySnapshot, ThermalReadings, TireReading,
};
use crate::status::{derive_status_indicators, INDICATOR_COUNT};

/// Gear ratios applied to the RPM model, picked at random per snapshot
const GEAR_FACTORS: [f64; 6] = [0.6, 0.7, 0.8, 0.9, 1.0, 1.1];

/// Throttle position bounds
pub const THROTTLE_RANGE: (f64, f64) = (0.2, 1.0);
/// Engine RPM bounds
pub const RPM_RANGE: (f64, f64) = (1000.0, 12000.0);
/// Road speed bounds (km/h)
pub const SPEED_RANGE: (f64, f64) = (0.0, 250.0);
/// Tire temperature bounds (°C)
pub const TIRE_TEMP_RANGE: (f64, f64) = (20.0, 120.0);
/// Tire pressure bounds (PSI)
pub const TIRE_PRESSURE_RANGE: (f64, f64) = (1.8, 2.8);
/// Battery temperature bounds (°C)
pub const BATTERY_TEMP_RANGE: (f64, f64) = (20.0, 80.0);
/// Motor temperature bounds (°C)
pub const MOTOR_TEMP_RANGE: (f64, f64) = (25.0, 110.0);
/// Lowest reported state of charge (%)
pub const SOC_FLOOR: f64 = 5.0;
/// Highest reported state of charge (%), also the largest allowed `base_soc`
pub const SOC_CEILING: f64 = 85.0;

/// Redline RPM used for the speed model
const SPEED_MODEL_RPM: f64 = 11000.0;
/// Speed at [`SPEED_MODEL_RPM`] in km/h
const SPEED_MODEL_KMH: f64 = 220.0;

/// Tire wear ramp: 30% over one hour, then flat
pub fn wear_factor(elapsed_secs: f64) -> f64 {
    (elapsed_secs / 3600.0).min(0.3)
}

/// Thermal buildup ramp: 0.4 over thirty minutes, then flat
pub fn thermal_buildup(elapsed_secs: f64) -> f64 {
    (elapsed_secs / 1800.0).min(0.4)
}

/// Noise-free throttle driving pattern (period of about 12.6 s)
pub fn throttle_pattern(elapsed_secs: f64) -> f64 {
    (elapsed_secs * 0.5).sin() * 0.3 + 0.7
}

/// Noise-free state of charge after `elapsed_secs` at a steady `throttle`.
///
/// Drains one percent per minute per unit of consumption rate and stays
/// within [`SOC_FLOOR`] and [`SOC_CEILING`].
pub fn state_of_charge(base_soc: f64, elapsed_secs: f64, throttle: f64) -> f64 {
    let consumption_rate = throttle * 0.8 + 0.2;
    let elapsed_minutes = elapsed_secs.max(0.0) / 60.0;
    (base_soc - elapsed_minutes * consumption_rate).clamp(SOC_FLOOR, SOC_CEILING)
}

/// Mutable session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorState {
    /// Session start
    start_time: DateTime<Utc>,
    /// Lap timing
    lap: LapTimer,
    /// Throttle from the most recent snapshot
    throttle_position: f64,
    /// Brake pedal, 0.0 to 1.0
    brake_position: f64,
}

impl GeneratorState {
    fn new(start_time: DateTime<Utc>, throttle_position: f64) -> Self {
        Self {
            start_time,
            lap: LapTimer::new(start_time),
            throttle_position,
            brake_position: 0.0,
        }
    }

    /// Session start
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Start of the running lap
    pub fn lap_start_time(&self) -> DateTime<Utc> {
        self.lap.lap_start_time()
    }

    /// Lap number of the running lap
    pub fn current_lap(&self) -> u32 {
        self.lap.current_lap()
    }

    /// Fastest completed lap, if any
    pub fn best_lap_time(&self) -> Option<f64> {
        self.lap.best_lap_time()
    }

    /// Most recently completed lap, if any
    pub fn previous_lap_time(&self) -> Option<f64> {
        self.lap.previous_lap_time()
    }

    /// Throttle drawn by the most recent snapshot
    pub fn throttle_position(&self) -> f64 {
        self.throttle_position
    }

    /// Brake pedal position
    pub fn brake_position(&self) -> f64 {
        self.brake_position
    }

    /// Lap timer backing the lap fields
    pub fn lap_timer(&self) -> &LapTimer {
        &self.lap
    }
}

/// Telemetry generator for one dashboard session
pub struct TelemetryGenerator {
    /// Simulation base values
    config: GeneratorConfig,
    /// Clock-derived session state
    state: GeneratorState,
    /// Identifies this session in logs and recordings
    session_id: Uuid,
    /// Noise source
    rng: StdRng,
}

impl Default for TelemetryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryGenerator {
    /// Create a generator with default settings, seeded from the OS
    pub fn new() -> Self {
        Self::from_parts(GeneratorConfig::default(), None)
    }

    /// Create a generator with default settings and a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_parts(GeneratorConfig::default(), Some(seed))
    }

    /// Create a generator from `config`, validating it first.
    ///
    /// The session starts now; use [`TelemetryGenerator::started_at`] to
    /// place the start elsewhere.
    pub fn with_config(config: GeneratorConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, seed))
    }

    fn from_parts(config: GeneratorConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GeneratorState::new(Utc::now(), config.initial_throttle);
        let session_id = Uuid::new_v4();

        tracing::debug!(session = %session_id, seeded = seed.is_some(), "telemetry generator created");

        Self {
            config,
            state,
            session_id,
            rng,
        }
    }

    /// Move the session start (and the first lap start) to `start`
    pub fn started_at(mut self, start: DateTime<Utc>) -> Self {
        self.state = GeneratorState::new(start, self.config.initial_throttle);
        self
    }

    /// Discard the session state and begin a new session at `now`
    pub fn reset_at(&mut self, now: DateTime<Utc>) {
        let brake = self.state.brake_position;
        self.state = GeneratorState::new(now, self.config.initial_throttle);
        self.state.brake_position = brake;
        self.session_id = Uuid::new_v4();
        tracing::debug!(session = %self.session_id, "telemetry session reset");
    }

    /// Set the brake pedal position used by the tire heating model
    pub fn set_brake_position(&mut self, brake: f64) {
        self.state.brake_position = if brake.is_nan() {
            0.0
        } else {
            brake.clamp(0.0, 1.0)
        };
    }

    /// Simulation base values in use
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Current session state
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Identifier of the current session
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Produce the snapshot for the current wall-clock time
    pub fn snapshot(&mut self) -> TelemetrySnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Produce the snapshot for capture instant `now`.
    ///
    /// Tires are computed with the throttle left by the previous call; the
    /// engine section then draws the new throttle used by the thermal and
    /// power sections. Status indicators are derived from this snapshot's own
    /// readings.
    pub fn snapshot_at(&mut self, now: DateTime<Utc>) -> TelemetrySnapshot {
        let elapsed = seconds_since(self.state.start_time, now);

        let tires = self.tire_readings(elapsed);
        let engine = self.engine_readings(elapsed);
        let thermal = self.thermal_readings(elapsed);
        let power = self.power_readings(elapsed);

        let threshold = self.lap_threshold();
        let lap_times = self.state.lap.update(now, threshold);

        let status_indicators =
            derive_status_indicators(&thermal, &tires, &power, INDICATOR_COUNT);

        TelemetrySnapshot {
            tires,
            engine,
            thermal,
            power,
            lap_times,
            status_indicators,
            timestamp: now,
        }
    }

    fn tire_readings(&mut self, elapsed: f64) -> BTreeMap<Corner, TireReading> {
        let wear = wear_factor(elapsed);
        let throttle = self.state.throttle_position;
        let brake = self.state.brake_position;

        let mut tires = BTreeMap::new();
        for corner in Corner::ALL {
            let (temp_noise, pressure_noise) = if corner.is_front() {
                (self.noise(-5.0, 15.0), self.noise(-0.1, 0.05))
            } else {
                (self.noise(-3.0, 10.0), self.noise(-0.05, 0.03))
            };

            let mut temperature = self.config.base_tire_temp + temp_noise + wear * 20.0;
            let pressure = self.config.base_tire_pressure + pressure_noise - wear * 0.2;

            if throttle > 0.7 {
                temperature += self.noise(2.0, 8.0);
            }
            if brake > 0.5 {
                temperature += self.noise(3.0, 10.0);
            }

            tires.insert(
                corner,
                TireReading {
                    temperature: clamp(temperature, TIRE_TEMP_RANGE),
                    pressure: clamp(pressure, TIRE_PRESSURE_RANGE),
                },
            );
        }
        tires
    }

    fn engine_readings(&mut self, elapsed: f64) -> EngineReadings {
        let throttle = clamp(
            throttle_pattern(elapsed) + self.noise(-0.2, 0.2),
            THROTTLE_RANGE,
        );
        self.state.throttle_position = throttle;

        let gear = GEAR_FACTORS.choose(&mut self.rng).copied().unwrap_or(1.0);
        let rpm = self.config.base_rpm * throttle * gear + self.noise(-200.0, 200.0);
        let rpm = clamp(rpm, RPM_RANGE);

        let speed = (rpm / SPEED_MODEL_RPM) * SPEED_MODEL_KMH + self.noise(-5.0, 5.0);
        let speed = clamp(speed, SPEED_RANGE);

        EngineReadings {
            rpm: rpm as u32,
            speed: speed as u32,
            throttle_position: throttle,
        }
    }

    fn thermal_readings(&mut self, elapsed: f64) -> ThermalReadings {
        let buildup = thermal_buildup(elapsed);
        let throttle = self.state.throttle_position;

        // Battery follows discharge rate, motor follows load
        let battery_load = throttle * 0.5;
        let battery_temp = self.config.base_battery_temp
            + buildup * 25.0
            + battery_load * 10.0
            + self.noise(-2.0, 3.0);

        let motor_load = throttle * 0.7;
        let motor_temp =
            self.config.base_motor_temp + buildup * 35.0 + motor_load * 15.0 + self.noise(-3.0, 5.0);

        ThermalReadings {
            battery_temp: clamp(battery_temp, BATTERY_TEMP_RANGE),
            motor_temp: clamp(motor_temp, MOTOR_TEMP_RANGE),
        }
    }

    fn power_readings(&mut self, elapsed: f64) -> PowerReadings {
        let throttle = self.state.throttle_position;
        let soc = state_of_charge(self.config.base_soc, elapsed, throttle);
        let power_kw = -(throttle * 45.0 + self.noise(5.0, 15.0));

        PowerReadings { soc, power_kw }
    }

    /// Lap completion threshold, drawn fresh on every call
    fn lap_threshold(&mut self) -> f64 {
        let min = self.config.lap_threshold_min_secs;
        let max = self.config.lap_threshold_max_secs;
        if max > min {
            self.rng.gen_range(min..=max)
        } else {
            min
        }
    }

    fn noise(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }
}

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    value.clamp(min, max)
}
