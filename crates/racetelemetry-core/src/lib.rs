//! # RaceTelemetry Core Library
//!
//! Simulated race-car telemetry for dashboard prototypes.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - A per-session telemetry snapshot generator (tires, engine, thermal,
//!   power, lap timing, status indicators)
//! - A lap timer with best/previous lap tracking
//! - Status indicator derivation and display color bands
//! - Snapshot recording with CSV and JSON-lines export
//!
//! ## Example
//!
//! ```rust,ignore
//! use racetelemetry_core::generator::TelemetryGenerator;
//!
//! let mut generator = TelemetryGenerator::new();
//!
//! // Once per refresh tick
//! let snapshot = generator.snapshot();
//! println!("RPM: {}", snapshot.engine.rpm);
//! println!("{}", serde_json::to_string(&snapshot)?);
//! ```

pub mod config;
pub mod datalog;
pub mod display;
pub mod generator;
pub mod lap;
pub mod shared;
pub mod snapshot;
pub mod status;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ConfigError, GeneratorConfig};
    pub use crate::datalog::{DataLogError, DataLogger, LogEntry, LogFormat};
    pub use crate::generator::{GeneratorState, TelemetryGenerator};
    pub use crate::lap::LapTimer;
    pub use crate::shared::SharedGenerator;
    pub use crate::snapshot::{
        Corner, EngineReadings, IndicatorColor, LapTimes, PowerReadings, StatusIndicator,
        TelemetrySnapshot, ThermalReadings, TireReading,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
