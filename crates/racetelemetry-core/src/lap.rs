//! Lap timer
//!
//! Tracks the running lap and the best/previous completed lap durations.
//! A lap completes when the running time exceeds the threshold passed to
//! [`LapTimer::update`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::LapTimes;

/// Seconds from `start` to `end`, zero if `end` is earlier
pub(crate) fn seconds_since(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start)
        .to_std()
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Lap timing state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapTimer {
    /// When the running lap started
    lap_start_time: DateTime<Utc>,
    /// Lap number, starting at 1
    current_lap: u32,
    /// Fastest completed lap (seconds)
    best_lap_time: Option<f64>,
    /// Most recently completed lap (seconds)
    previous_lap_time: Option<f64>,
    /// Number of completed laps
    completed_laps: u32,
}

impl LapTimer {
    /// Start timing lap 1 at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            lap_start_time: start,
            current_lap: 1,
            best_lap_time: None,
            previous_lap_time: None,
            completed_laps: 0,
        }
    }

    /// Advance the timer to `now`.
    ///
    /// If the running lap is longer than `threshold_secs` it is completed:
    /// previous and best times are updated, the lap counter increments and a
    /// new lap starts at `now`. The returned `current_lap_time` is the running
    /// time measured before any reset, so at a boundary it equals the duration
    /// of the lap that just finished.
    pub fn update(&mut self, now: DateTime<Utc>, threshold_secs: f64) -> LapTimes {
        let current_lap_time = seconds_since(self.lap_start_time, now);

        if current_lap_time > threshold_secs {
            self.complete_lap(current_lap_time, now);
        }

        LapTimes {
            current_lap_time,
            best_lap_time: self.best_lap_time,
            previous_lap_time: self.previous_lap_time,
            current_lap: self.current_lap,
        }
    }

    fn complete_lap(&mut self, duration: f64, now: DateTime<Utc>) {
        self.previous_lap_time = Some(duration);
        self.best_lap_time = Some(match self.best_lap_time {
            Some(best) => best.min(duration),
            None => duration,
        });
        self.lap_start_time = now;
        self.current_lap += 1;
        self.completed_laps += 1;

        tracing::debug!(
            lap = self.current_lap - 1,
            duration,
            best = self.best_lap_time,
            "lap completed"
        );
    }

    /// When the running lap started
    pub fn lap_start_time(&self) -> DateTime<Utc> {
        self.lap_start_time
    }

    /// Lap number of the running lap
    pub fn current_lap(&self) -> u32 {
        self.current_lap
    }

    /// Fastest completed lap, if any
    pub fn best_lap_time(&self) -> Option<f64> {
        self.best_lap_time
    }

    /// Most recently completed lap, if any
    pub fn previous_lap_time(&self) -> Option<f64> {
        self.previous_lap_time
    }

    /// Number of laps completed so far
    pub fn completed_laps(&self) -> u32 {
        self.completed_laps
    }
}
