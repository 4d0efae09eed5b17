// Telemetry feed: polls one generator session and streams snapshots to stdout.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use racetelemetry_core::config::GeneratorConfig;
use racetelemetry_core::datalog::{DataLogger, LogFormat};
use racetelemetry_core::generator::TelemetryGenerator;
use racetelemetry_core::snapshot::TelemetrySnapshot;

const DEFAULT_INTERVAL_MS: u64 = 500;
const MIN_INTERVAL_MS: u64 = 10;
const MAX_INTERVAL_MS: u64 = 60_000;

/// Feed settings read from the environment
#[derive(Debug, Clone, PartialEq)]
struct FeedSettings {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    interval: Duration,
    record_path: Option<PathBuf>,
    max_ticks: Option<u64>,
}

impl FeedSettings {
    fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let interval_ms = lookup("FEED_INTERVAL_MS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_INTERVAL_MS)
            .clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS);

        Self {
            config_path: lookup("TELEMETRY_CONFIG").map(PathBuf::from),
            seed: lookup("TELEMETRY_SEED").and_then(|value| value.parse().ok()),
            interval: Duration::from_millis(interval_ms),
            record_path: lookup("FEED_RECORD").map(PathBuf::from),
            max_ticks: lookup("FEED_MAX_TICKS").and_then(|value| value.parse().ok()),
        }
    }

    /// Export format of the recording, if one was requested
    fn record_format(&self) -> anyhow::Result<Option<LogFormat>> {
        let Some(path) = &self.record_path else {
            return Ok(None);
        };
        match LogFormat::from_extension(path) {
            Some(format) => Ok(Some(format)),
            None => anyhow::bail!(
                "unsupported recording format for {} (expected .csv, .jsonl or .ndjson)",
                path.display()
            ),
        }
    }
}

fn load_config(settings: &FeedSettings) -> anyhow::Result<GeneratorConfig> {
    match &settings.config_path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

fn emit(out: &mut impl Write, snapshot: &TelemetrySnapshot) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = FeedSettings::from_env();
    let config = load_config(&settings)?;
    let mut generator = TelemetryGenerator::with_config(config, settings.seed)
        .context("invalid generator config")?;
    let record_format = settings.record_format()?;

    let mut logger = record_format.map(|_| {
        let mut logger = DataLogger::new();
        logger.start();
        logger
    });

    info!(
        session = %generator.session_id(),
        interval_ms = settings.interval.as_millis() as u64,
        recording = ?record_format,
        "starting telemetry feed"
    );

    let mut interval = time::interval(settings.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let stdout = io::stdout();
    let mut ticks = 0u64;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
            _ = interval.tick() => {
                let snapshot = generator.snapshot();
                if let Err(err) = emit(&mut stdout.lock(), &snapshot) {
                    warn!(?err, "failed to write snapshot");
                }
                if let Some(logger) = logger.as_mut() {
                    logger.record(&snapshot);
                }

                ticks += 1;
                if settings.max_ticks.is_some_and(|max| ticks >= max) {
                    break;
                }
            }
        }
    }

    if let (Some(logger), Some(path)) = (logger.as_ref(), settings.record_path.as_ref()) {
        if let Err(err) = logger.export(path) {
            warn!(?err, path = %path.display(), "failed to export recording");
        }
    }

    info!(
        ticks,
        laps = generator.state().lap_timer().completed_laps(),
        "telemetry feed stopped"
    );
    Ok(())
}
