use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Mutex;

/// Timestamps are kept at microsecond precision, the resolution PostgreSQL
/// stores for `TIMESTAMPTZ`.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Source of the current time for the session ledger.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Useful for deterministic durations.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Truncates a timestamp to the precision it will have once stored.
pub fn to_stored_precision(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(STORED_SUBSEC_DIGITS)
}

/// Whole seconds elapsed between two instants, rounded down.
///
/// Returns `None` when `end` precedes `start`.
pub fn elapsed_whole_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<i64> {
    let elapsed = end - start;
    if elapsed < chrono::Duration::zero() {
        return None;
    }
    Some(elapsed.num_seconds())
}
