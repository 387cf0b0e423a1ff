//! `YYYY-MM-DDTHH:mm` rendering and parsing, the value shape of an HTML
//! `datetime-local` input.

use chrono::{Datelike, MappedLocalTime, NaiveDateTime, Timelike};

use crate::error::{Error, Result};
use crate::instant::Instant;
use crate::zone::Zone;

const FORMAT: &str = "%Y-%m-%dT%H:%M";
const NOT_A_VALUE: &str = "NaN";

/// Renders `date` in the host local zone.
pub fn datetime_format(date: Instant) -> String {
    datetime_format_in(date, &Zone::Local)
}

/// Renders `date` as `YYYY-MM-DDTHH:mm` using the wall clock of `zone`.
///
/// The year has at least four digits. Instants without local fields render
/// every field as `NaN`.
pub fn datetime_format_in(date: Instant, zone: &Zone) -> String {
    let Some(local) = zone.local_datetime(date) else {
        return format!("{n}-{n}-{n}T{n}:{n}", n = NOT_A_VALUE);
    };
    let year = local.year();
    let year = if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    };
    format!(
        "{}-{:02}-{:02}T{:02}:{:02}",
        year,
        local.month(),
        local.day(),
        local.hour(),
        local.minute()
    )
}

/// Reads a `YYYY-MM-DDTHH:mm` value as wall-clock time in `zone`.
///
/// In a fall-back overlap the earlier instant wins; a time skipped by a
/// spring-forward gap is rejected.
pub fn parse_datetime(value: &str, zone: &Zone) -> Result<Instant> {
    let value = value.trim();
    let local = NaiveDateTime::parse_from_str(value, FORMAT)
        .map_err(|_| Error::InvalidDateTime(value.to_string()))?;
    match zone.from_local_datetime(&local) {
        MappedLocalTime::Single(t) => Ok(t),
        MappedLocalTime::Ambiguous(earlier, _) => Ok(earlier),
        MappedLocalTime::None => Err(Error::NonexistentLocalTime {
            value: value.to_string(),
            zone: zone.name(),
        }),
    }
}
