//! Time sources for arrival and service timestamps.

use super::types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of [`Timestamp`]s.
pub trait Clock: Send + Sync {
    /// Returns the current time in nanoseconds.
    fn now(&self) -> Timestamp;
}

/// Wall clock with strictly increasing readings.
///
/// Two calls never return the same value, so customers registered through
/// one dispatcher never share an arrival timestamp.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Manually driven clock for tests and deterministic simulations.
///
/// Each reading returns the current value and then advances it by `step`.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
    step: u64,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self::ticking(start, 0)
    }

    /// A clock that advances by `step` after every reading.
    pub fn ticking(start: Timestamp, step: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
            step,
        }
    }

    pub fn set(&self, t: Timestamp) {
        self.now.store(t, Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.now.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_strictly_increasing() {
        let clock = SystemClock::new();
        let mut prev = clock.now();
        for _ in 0..1000 {
            let t = clock.now();
            assert!(t > prev);
            prev = t;
        }
    }

    #[test]
    fn test_manual_clock_frozen() {
        let clock = ManualClock::new(42);
        assert_eq!(clock.now(), 42);
        assert_eq!(clock.now(), 42);
        clock.advance(Duration::from_nanos(8));
        assert_eq!(clock.now(), 50);
        clock.set(7);
        assert_eq!(clock.now(), 7);
    }

    #[test]
    fn test_manual_clock_ticking() {
        let clock = ManualClock::ticking(1, 1);
        assert_eq!(clock.now(), 1);
        assert_eq!(clock.now(), 2);
        assert_eq!(clock.now(), 3);
    }
}
