//! Shared generator handle
//!
//! Several callers polling one session must not interleave inside a snapshot,
//! or two of them can both see the lap threshold crossed and count the lap
//! twice. Each call holds the lock for the whole snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::generator::TelemetryGenerator;
use crate::snapshot::TelemetrySnapshot;

/// Cloneable, thread-safe handle to one generator session
#[derive(Clone)]
pub struct SharedGenerator {
    inner: Arc<Mutex<TelemetryGenerator>>,
}

impl SharedGenerator {
    /// Wrap a generator for shared use
    pub fn new(generator: TelemetryGenerator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(generator)),
        }
    }

    /// Snapshot at the current wall-clock time
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.lock().snapshot()
    }

    /// Snapshot at capture instant `now`
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> TelemetrySnapshot {
        self.lock().snapshot_at(now)
    }

    /// Run `f` with exclusive access to the generator
    pub fn with<R>(&self, f: impl FnOnce(&mut TelemetryGenerator) -> R) -> R {
        f(&mut self.lock())
    }

    // State is consistent between calls, so a panic elsewhere while holding
    // the lock leaves nothing half-updated.
    fn lock(&self) -> MutexGuard<'_, TelemetryGenerator> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<TelemetryGenerator> for SharedGenerator {
    fn from(generator: TelemetryGenerator) -> Self {
        Self::new(generator)
    }
}
