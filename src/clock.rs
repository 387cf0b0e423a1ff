use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::instant::Instant;

/// Source of "now" for timers.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall-clock time of the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same reading.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    pub fn set(&self, now: Instant) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.add_millis(by.as_millis() as f64);
    }

    /// Moves the reading backwards, as a wall clock adjustment would.
    pub fn rewind(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.add_millis(-(by.as_millis() as f64));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.advance(Duration::from_millis(1500));
        assert_eq!(other.now().millis(), 1500.0);
        other.rewind(Duration::from_millis(500));
        assert_eq!(clock.now().millis(), 1000.0);
        clock.set(Instant::from_millis(42.0));
        assert_eq!(other.now().millis(), 42.0);
    }

    #[test]
    fn system_clock_moves_forward() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(a.is_valid());
        assert!(b >= a);
    }
}
