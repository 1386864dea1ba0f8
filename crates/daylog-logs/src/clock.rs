//! Wall-clock source for timestamps and day buckets

use chrono::{DateTime, Local, TimeZone};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to.
///
/// Stores epoch milliseconds, so it can be shared between a [`crate::Logger`]
/// and its file sink to simulate day changes.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(epoch_secs: i64) -> Self {
        Self {
            millis: AtomicI64::new(epoch_secs * 1000),
        }
    }

    pub fn set(&self, epoch_secs: i64) {
        self.millis.store(epoch_secs * 1000, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.millis.fetch_add(secs * 1000, Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance_secs(days * daylog_core::SECONDS_PER_DAY);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        let millis = self.millis.load(Ordering::SeqCst);
        Local
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_else(Local::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(1_700_000_000);
        assert_eq!(clock.now().timestamp(), 1_700_000_000);

        clock.advance_days(2);
        assert_eq!(clock.now().timestamp(), 1_700_000_000 + 2 * 86_400);

        clock.set(42);
        assert_eq!(clock.now().timestamp(), 42);
    }
}
