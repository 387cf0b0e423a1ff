use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};

pub const MS_PER_SECOND: f64 = 1000.0;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const MINUTES_PER_HOUR: f64 = 60.0;
pub const HOURS_PER_DAY: f64 = 24.0;

/// Largest magnitude a valid time value may have, in milliseconds.
pub const MAX_TIME_MS: f64 = 8.64e15;

/// A point in time with millisecond resolution.
///
/// Stored as milliseconds since 1970-01-01T00:00:00Z. A value that is not
/// finite, or falls outside ±[`MAX_TIME_MS`], is the invalid instant: it
/// survives arithmetic and renders as `NaN`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Instant {
    ms: f64,
}

impl Instant {
    pub const INVALID: Instant = Instant { ms: f64::NAN };

    pub const UNIX_EPOCH: Instant = Instant { ms: 0.0 };

    /// Builds an instant from a raw time value, truncating fractional
    /// milliseconds.
    pub fn from_millis(ms: f64) -> Self {
        Self { ms: time_clip(ms) }
    }

    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(f64::NAN);
        Self::from_millis(ms)
    }

    pub fn millis(self) -> f64 {
        self.ms
    }

    pub fn is_valid(self) -> bool {
        !self.ms.is_nan()
    }

    /// Shifts by `delta` milliseconds. Invalid stays invalid.
    pub fn add_millis(self, delta: f64) -> Self {
        Self::from_millis(self.ms + delta)
    }

    /// `None` for the invalid instant and for valid instants beyond the
    /// range chrono can represent.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        if !self.is_valid() {
            return None;
        }
        Utc.timestamp_millis_opt(self.ms as i64).single()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Instant {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::from_millis(dt.timestamp_millis() as f64)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => f.write_str("Invalid Date"),
        }
    }
}

fn time_clip(ms: f64) -> f64 {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        return f64::NAN;
    }
    let t = ms.trunc();
    // normalise -0
    if t == 0.0 { 0.0 } else { t }
}
