//! Fixed-multiplier date arithmetic.
//!
//! Every unit is expressed through the next finer one, down to seconds.
//! Days are always 24 hours: there is no calendar or DST awareness here.

use crate::instant::{
    HOURS_PER_DAY, Instant, MINUTES_PER_HOUR, MS_PER_SECOND, SECONDS_PER_MINUTE,
};

pub fn add_days(date: Instant, delta: f64) -> Instant {
    add_hours(date, HOURS_PER_DAY * delta)
}

pub fn add_hours(date: Instant, delta: f64) -> Instant {
    add_minutes(date, MINUTES_PER_HOUR * delta)
}

pub fn add_minutes(date: Instant, delta: f64) -> Instant {
    add_seconds(date, SECONDS_PER_MINUTE * delta)
}

pub fn add_seconds(date: Instant, delta: f64) -> Instant {
    date.add_millis(MS_PER_SECOND * delta)
}
