//! Display helpers
//!
//! Formatting and color banding shared by the dashboard front-ends. These
//! work on snapshot values only and carry no rendering code.

use crate::snapshot::{IndicatorColor, StatusIndicator};

/// Format a lap time as `M:SS.mmm`, or `--:--.---` when there is none
pub fn format_lap_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total_ms = (s * 1000.0).round() as u64;
            let minutes = total_ms / 60_000;
            let rem_ms = total_ms % 60_000;
            format!("{}:{:02}.{:03}", minutes, rem_ms / 1000, rem_ms % 1000)
        }
        _ => "--:--.---".to_string(),
    }
}

/// Color for a value against rising warning/critical thresholds
pub fn gauge_band(value: f64, warning: f64, critical: f64) -> IndicatorColor {
    if value >= critical {
        IndicatorColor::Red
    } else if value >= warning {
        IndicatorColor::Yellow
    } else {
        IndicatorColor::Green
    }
}

/// Tire temperature color: above 100 °C red, above 85 °C yellow
pub fn tire_temperature_band(temperature: f64) -> IndicatorColor {
    if temperature > 100.0 {
        IndicatorColor::Red
    } else if temperature > 85.0 {
        IndicatorColor::Yellow
    } else {
        IndicatorColor::Green
    }
}

/// Tire pressure color: below 2.0 red, below 2.1 yellow
pub fn tire_pressure_band(pressure: f64) -> IndicatorColor {
    if pressure < 2.0 {
        IndicatorColor::Red
    } else if pressure < 2.1 {
        IndicatorColor::Yellow
    } else {
        IndicatorColor::Green
    }
}

/// State-of-charge bar color: above 30% green, above 15% yellow
pub fn soc_band(soc: f64) -> IndicatorColor {
    if soc > 30.0 {
        IndicatorColor::Green
    } else if soc > 15.0 {
        IndicatorColor::Yellow
    } else {
        IndicatorColor::Red
    }
}

/// The first `limit` non-green indicators, in bar order
pub fn active_warnings(indicators: &[StatusIndicator], limit: usize) -> Vec<&StatusIndicator> {
    indicators
        .iter()
        .filter(|i| i.is_warning())
        .take(limit)
        .collect()
}

/// Number of shift lights lit for `rpm`.
///
/// Light `i` (zero-based) is lit when `rpm / redline > i / lights`.
pub fn rpm_lights_lit(rpm: u32, redline: u32, lights: usize) -> usize {
    if redline == 0 || lights == 0 {
        return 0;
    }
    let ratio = rpm as f64 / redline as f64;
    (0..lights)
        .filter(|i| ratio > *i as f64 / lights as f64)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(None), "--:--.---");
        assert_eq!(format_lap_time(Some(85.123)), "1:25.123");
        assert_eq!(format_lap_time(Some(5.0)), "0:05.000");
        assert_eq!(format_lap_time(Some(f64::NAN)), "--:--.---");
    }

    #[test]
    fn test_bands() {
        assert_eq!(tire_temperature_band(101.0), IndicatorColor::Red);
        assert_eq!(tire_temperature_band(90.0), IndicatorColor::Yellow);
        assert_eq!(tire_temperature_band(85.0), IndicatorColor::Green);
        assert_eq!(tire_pressure_band(1.95), IndicatorColor::Red);
        assert_eq!(tire_pressure_band(2.05), IndicatorColor::Yellow);
        assert_eq!(soc_band(31.0), IndicatorColor::Green);
        assert_eq!(soc_band(20.0), IndicatorColor::Yellow);
        assert_eq!(soc_band(15.0), IndicatorColor::Red);
        assert_eq!(gauge_band(70.0, 60.0, 70.0), IndicatorColor::Red);
    }

    #[test]
    fn test_rpm_lights() {
        assert_eq!(rpm_lights_lit(0, 12000, 16), 0);
        assert_eq!(rpm_lights_lit(12000, 12000, 16), 16);
        assert_eq!(rpm_lights_lit(6000, 12000, 16), 8);
        assert_eq!(rpm_lights_lit(6000, 0, 16), 0);
    }

    #[test]
    fn test_active_warnings_limit() {
        let bar = vec![
            StatusIndicator::new(IndicatorColor::Yellow, "a"),
            StatusIndicator::new(IndicatorColor::Red, "b"),
            StatusIndicator::new(IndicatorColor::Green, "System OK"),
        ];
        let warnings = active_warnings(&bar, 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].status, "a");
    }
}
