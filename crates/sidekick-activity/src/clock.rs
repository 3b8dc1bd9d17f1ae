//! Time sources.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Reads tokio's clock, so paused test time is honoured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(base: Instant) -> Self {
        Self {
            base,
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }

    /// Jump to `base + offset`.
    pub fn set(&self, offset: Duration) {
        *self.offset.lock() = offset;
    }

    pub fn base(&self) -> Instant {
        self.base
    }

    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_base() {
        let base = Instant::now();
        let clock = ManualClock::starting_at(base);
        assert_eq!(clock.now(), base);
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(2));
        clock.advance(Duration::from_secs(3));
        assert_eq!(clock.now() - clock.base(), Duration::from_secs(5));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(7));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_clock_follows_paused_time() {
        let clock = TokioClock;
        let start = clock.now();
        tokio::time::advance(Duration::from_secs(4)).await;
        assert_eq!(clock.now() - start, Duration::from_secs(4));
    }
}
