use chrono::{Duration, Utc};
use racetelemetry_core::config::GeneratorConfig;
use racetelemetry_core::display::active_warnings;
use racetelemetry_core::generator::TelemetryGenerator;
use racetelemetry_core::snapshot::IndicatorColor;
use racetelemetry_core::status::SYSTEM_OK;

fn hot_battery_generator(seed: u64) -> (TelemetryGenerator, chrono::DateTime<Utc>) {
    let config = GeneratorConfig {
        base_battery_temp: 70.0,
        ..GeneratorConfig::default()
    };
    let now = Utc::now();
    let generator = TelemetryGenerator::with_config(config, Some(seed))
        .unwrap()
        .started_at(now - Duration::hours(2));
    (generator, now)
}

#[test]
fn test_battery_overtemp_precedes_padding() {
    let (mut generator, now) = hot_battery_generator(12);

    for i in 0..100 {
        let snapshot = generator.snapshot_at(now + Duration::seconds(i));
        assert!(snapshot.thermal.battery_temp > 70.0);

        let indicators = &snapshot.status_indicators;
        assert_eq!(indicators.len(), 20);

        let overtemp = indicators
            .iter()
            .position(|ind| ind.status == "Battery Overtemp")
            .expect("red battery indicator present");
        assert_eq!(indicators[overtemp].color, IndicatorColor::Red);
        assert_eq!(indicators[0].status, "Battery Temp Warning");
        assert_eq!(overtemp, 1);

        let first_ok = indicators
            .iter()
            .position(|ind| ind.status == SYSTEM_OK)
            .unwrap_or(indicators.len());
        assert!(overtemp < first_ok);

        // Padding is contiguous at the tail
        assert!(indicators[first_ok..]
            .iter()
            .all(|ind| ind.color == IndicatorColor::Green));
        assert!(indicators[..first_ok]
            .iter()
            .all(|ind| ind.color != IndicatorColor::Green));
    }
}

#[test]
fn test_indicators_match_snapshot_readings() {
    let start = Utc::now();
    let mut generator = TelemetryGenerator::with_seed(77).started_at(start);

    for i in 0..600 {
        let snapshot = generator.snapshot_at(start + Duration::seconds(i * 10));
        let has = |status: &str| snapshot.status_indicators.iter().any(|ind| ind.status == status);

        assert_eq!(has("Battery Temp Warning"), snapshot.thermal.battery_temp > 60.0);
        assert_eq!(has("Motor Overtemp"), snapshot.thermal.motor_temp > 100.0);
        assert_eq!(has("Low Battery"), snapshot.power.soc < 20.0);
        for (corner, tire) in &snapshot.tires {
            assert_eq!(has(format!("{corner} Overheated").as_str()), tire.temperature > 100.0);
            assert_eq!(has(format!("{corner} Low Pressure").as_str()), tire.pressure < 2.0);
        }
    }
}

#[test]
fn test_dashboard_warning_strip() {
    let (mut generator, now) = hot_battery_generator(40);
    let snapshot = generator.snapshot_at(now);

    let warnings = active_warnings(&snapshot.status_indicators, 5);
    assert!(!warnings.is_empty() && warnings.len() <= 5);
    assert_eq!(warnings[0].status, "Battery Temp Warning");
    assert_eq!(warnings.len(), snapshot.warnings().take(5).count());
}
