//! Status indicator derivation
//!
//! Threshold checks over one snapshot's thermal, tire and power readings,
//! padded to a fixed-length LED bar.

use std::collections::BTreeMap;

use crate::snapshot::{
    Corner, IndicatorColor, PowerReadings, StatusIndicator, ThermalReadings, TireReading,
};

/// Length of the indicator bar on every snapshot
pub const INDICATOR_COUNT: usize = 20;

/// Status text of padding entries
pub const SYSTEM_OK: &str = "System OK";

/// Battery temperature above which a yellow warning is raised (°C)
pub const BATTERY_TEMP_WARNING: f64 = 60.0;
/// Battery temperature above which a red overtemp is raised (°C)
pub const BATTERY_TEMP_CRITICAL: f64 = 70.0;
/// Motor temperature above which a yellow warning is raised (°C)
pub const MOTOR_TEMP_WARNING: f64 = 90.0;
/// Motor temperature above which a red overtemp is raised (°C)
pub const MOTOR_TEMP_CRITICAL: f64 = 100.0;
/// Tire pressure below which a corner reports low pressure (PSI)
pub const TIRE_PRESSURE_LOW: f64 = 2.0;
/// Tire temperature above which a corner reports overheating (°C)
pub const TIRE_TEMP_CRITICAL: f64 = 100.0;
/// State of charge below which a low battery warning is raised (%)
pub const SOC_LOW: f64 = 20.0;
/// State of charge below which a critical battery alarm is raised (%)
pub const SOC_CRITICAL: f64 = 10.0;

/// Build the indicator bar for one snapshot.
///
/// Warnings come first in check order (battery, motor, each corner, SOC),
/// then green [`SYSTEM_OK`] entries fill the bar. The result always has
/// exactly `count` entries.
pub fn derive_status_indicators(
    thermal: &ThermalReadings,
    tires: &BTreeMap<Corner, TireReading>,
    power: &PowerReadings,
    count: usize,
) -> Vec<StatusIndicator> {
    let mut indicators = Vec::with_capacity(count);

    if thermal.battery_temp > BATTERY_TEMP_WARNING {
        indicators.push(StatusIndicator::new(
            IndicatorColor::Yellow,
            "Battery Temp Warning",
        ));
    }
    if thermal.battery_temp > BATTERY_TEMP_CRITICAL {
        indicators.push(StatusIndicator::new(IndicatorColor::Red, "Battery Overtemp"));
    }
    if thermal.motor_temp > MOTOR_TEMP_WARNING {
        indicators.push(StatusIndicator::new(
            IndicatorColor::Yellow,
            "Motor Temp Warning",
        ));
    }
    if thermal.motor_temp > MOTOR_TEMP_CRITICAL {
        indicators.push(StatusIndicator::new(IndicatorColor::Red, "Motor Overtemp"));
    }

    for (corner, tire) in tires {
        if tire.pressure < TIRE_PRESSURE_LOW {
            indicators.push(StatusIndicator::new(
                IndicatorColor::Yellow,
                format!("{} Low Pressure", corner),
            ));
        }
        if tire.temperature > TIRE_TEMP_CRITICAL {
            indicators.push(StatusIndicator::new(
                IndicatorColor::Red,
                format!("{} Overheated", corner),
            ));
        }
    }

    if power.soc < SOC_LOW {
        indicators.push(StatusIndicator::new(IndicatorColor::Yellow, "Low Battery"));
    }
    if power.soc < SOC_CRITICAL {
        indicators.push(StatusIndicator::new(IndicatorColor::Red, "Critical Battery"));
    }

    indicators.truncate(count);
    indicators.resize_with(count, || {
        StatusIndicator::new(IndicatorColor::Green, SYSTEM_OK)
    });
    indicators
}
