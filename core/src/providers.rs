use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use uuid::Uuid;

/// Source of fresh record and ingredient ids.
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

/// Source of record timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    // Persisted timestamps carry millisecond precision.
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Deterministic ids: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdProvider for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{n}", self.prefix)
    }
}

/// Deterministic clock that advances one second per reading.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicU64,
}

impl SteppingClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            ticks: AtomicU64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    #[allow(clippy::cast_possible_wrap)]
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(tick as i64)
    }
}
