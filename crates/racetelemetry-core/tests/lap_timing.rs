use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use racetelemetry_core::config::GeneratorConfig;
use racetelemetry_core::generator::TelemetryGenerator;
use racetelemetry_core::snapshot::LapTimes;

#[test]
fn test_fresh_generator_immediate_query() {
    let mut generator = TelemetryGenerator::new();
    let snapshot = generator.snapshot();

    assert_eq!(snapshot.lap_times.current_lap, 1);
    assert_eq!(snapshot.lap_times.best_lap_time, None);
    assert_eq!(snapshot.lap_times.previous_lap_time, None);
    assert!(snapshot.lap_times.current_lap_time < 1.0);
}

#[test]
fn test_no_lap_before_minimum_threshold() {
    let start = Utc::now();
    let mut generator = TelemetryGenerator::with_seed(4).started_at(start);

    for secs in 0..=90 {
        let snapshot = generator.snapshot_at(start + Duration::seconds(secs));
        assert_eq!(snapshot.lap_times.current_lap, 1, "lap completed at {secs}s");
    }
    assert_eq!(generator.state().best_lap_time(), None);
}

#[test]
fn test_lap_always_completes_past_maximum_threshold() {
    let start = Utc::now();
    let mut generator = TelemetryGenerator::with_seed(4).started_at(start);

    let snapshot = generator.snapshot_at(start + Duration::milliseconds(120_500));
    assert_eq!(
        snapshot.lap_times,
        LapTimes {
            current_lap_time: 120.5,
            best_lap_time: Some(120.5),
            previous_lap_time: Some(120.5),
            current_lap: 2,
        }
    );

    let next = generator.snapshot_at(start + Duration::milliseconds(121_000));
    assert_eq!(next.lap_times.current_lap, 2);
    assert!((next.lap_times.current_lap_time - 0.5).abs() < 1e-9);
}

#[test]
fn test_lap_invariants_over_session() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("racetelemetry_core=debug")
        .with_test_writer()
        .try_init();

    let start = Utc::now();
    let mut generator = TelemetryGenerator::with_seed(31).started_at(start);

    let mut last_lap = 1;
    let mut last_best: Option<f64> = None;
    let mut last_previous: Option<f64> = None;
    let mut completions = 0;

    for secs in 0..7200 {
        let times = generator
            .snapshot_at(start + Duration::seconds(secs))
            .lap_times;

        assert!(times.current_lap >= last_lap);
        let completed = times.current_lap > last_lap;

        if completed {
            completions += 1;
            assert_eq!(times.current_lap, last_lap + 1);
            assert!(times.current_lap_time > 90.0 && times.current_lap_time <= 121.0);
            assert_eq!(times.previous_lap_time, Some(times.current_lap_time));
        } else {
            assert_eq!(times.previous_lap_time, last_previous);
            assert_eq!(times.best_lap_time, last_best);
        }

        match (last_best, times.best_lap_time) {
            (None, None) => assert_eq!(completions, 0),
            (None, Some(_)) => assert!(completed),
            (Some(prev), Some(best)) => assert!(best <= prev),
            (Some(_), None) => panic!("best lap time cleared at {secs}s"),
        }

        last_lap = times.current_lap;
        last_best = times.best_lap_time;
        last_previous = times.previous_lap_time;
    }

    // 7200 s of laps between 91 and 121 s
    assert!(completions >= 59 && completions <= 79, "{completions} laps");
    assert_eq!(generator.state().lap_timer().completed_laps(), completions);
}

#[test]
fn test_fixed_lap_window_from_config() {
    let config = GeneratorConfig {
        lap_threshold_min_secs: 30.0,
        lap_threshold_max_secs: 30.0,
        ..GeneratorConfig::default()
    };
    let start = Utc::now();
    let mut generator = TelemetryGenerator::with_config(config, Some(1))
        .unwrap()
        .started_at(start);

    assert_eq!(
        generator
            .snapshot_at(start + Duration::seconds(30))
            .lap_times
            .current_lap,
        1
    );
    assert_eq!(
        generator
            .snapshot_at(start + Duration::seconds(31))
            .lap_times
            .current_lap,
        2
    );
    assert_eq!(generator.state().best_lap_time(), Some(31.0));
}
