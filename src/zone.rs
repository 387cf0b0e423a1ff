use std::fmt;
use std::str::FromStr;

use chrono::{Local, MappedLocalTime, NaiveDateTime, TimeZone};
use chrono_tz::{TZ_VARIANTS, Tz};
use log::warn;

use crate::error::{Error, Result};
use crate::instant::Instant;

/// Identifier of the zone the host resolves as local, e.g. `Europe/Paris`.
///
/// Falls back to `UTC` when the host does not expose one.
pub fn localtz() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|e| {
        warn!("could not resolve local time zone, using UTC: {e}");
        "UTC".to_string()
    })
}

/// The zone used to read and build local wall-clock fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Zone {
    /// Whatever the host is configured with at the time of the call.
    #[default]
    Local,
    Named(Tz),
}

impl Zone {
    pub fn utc() -> Self {
        Zone::Named(Tz::UTC)
    }

    /// Resolves an IANA name. Exact spelling is tried first, then a
    /// case-insensitive scan of the database; the canonical spelling is kept.
    pub fn from_name(name: &str) -> Result<Self> {
        if let Ok(tz) = name.parse::<Tz>() {
            return Ok(Zone::Named(tz));
        }
        TZ_VARIANTS
            .iter()
            .find(|tz| tz.name().eq_ignore_ascii_case(name))
            .map(|tz| Zone::Named(*tz))
            .ok_or_else(|| Error::UnknownZone(name.to_string()))
    }

    pub fn name(&self) -> String {
        match self {
            Zone::Local => localtz(),
            Zone::Named(tz) => tz.name().to_string(),
        }
    }

    /// Wall-clock fields of `instant` in this zone.
    pub fn local_datetime(&self, instant: Instant) -> Option<NaiveDateTime> {
        let utc = instant.to_utc()?;
        Some(match self {
            Zone::Local => utc.with_timezone(&Local).naive_local(),
            Zone::Named(tz) => utc.with_timezone(tz).naive_local(),
        })
    }

    /// Instants whose wall-clock reading in this zone is `local`: one
    /// normally, two in a fall-back overlap, none in a spring-forward gap.
    pub fn from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<Instant> {
        match self {
            Zone::Local => Local.from_local_datetime(local).map(Instant::from),
            Zone::Named(tz) => tz.from_local_datetime(local).map(Instant::from),
        }
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Zone::from_name(s)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn localtz_is_not_empty() {
        assert!(!localtz().is_empty());
        assert_eq!(Zone::Local.name(), localtz());
    }

    #[test]
    fn resolve_exact_and_case_insensitive() {
        let paris = Zone::from_name("Europe/Paris").unwrap();
        assert_eq!(paris, Zone::Named(Tz::Europe__Paris));
        assert_eq!(Zone::from_name("europe/PARIS").unwrap(), paris);
        assert_eq!(paris.name(), "Europe/Paris");
        assert_eq!("UTC".parse::<Zone>().unwrap(), Zone::utc());
    }

    #[test]
    fn unknown_zone() {
        match Zone::from_name("Mars/Olympus_Mons") {
            Err(Error::UnknownZone(name)) => assert_eq!(name, "Mars/Olympus_Mons"),
            other => panic!("expected UnknownZone, got {other:?}"),
        }
        assert!(Zone::from_name("").is_err());
    }

    #[test]
    fn local_fields_follow_offset() {
        // 2024-07-01T12:00:00Z, Paris is on CEST (+2)
        let t = Instant::from_millis(1_719_835_200_000.0);
        let paris = Zone::from_name("Europe/Paris").unwrap();
        assert_eq!(paris.local_datetime(t), Some(naive(2024, 7, 1, 14, 0)));
        assert_eq!(Zone::utc().local_datetime(t), Some(naive(2024, 7, 1, 12, 0)));
        assert_eq!(paris.local_datetime(Instant::INVALID), None);
    }

    #[test]
    fn gap_and_overlap() {
        let paris = Zone::from_name("Europe/Paris").unwrap();
        assert_eq!(
            paris.from_local_datetime(&naive(2024, 3, 31, 2, 30)),
            MappedLocalTime::None
        );
        match paris.from_local_datetime(&naive(2024, 10, 27, 2, 30)) {
            MappedLocalTime::Ambiguous(earlier, later) => {
                // 00:30Z (CEST) and 01:30Z (CET)
                assert_eq!(earlier.millis(), 1_729_989_000_000.0);
                assert_eq!(later.millis() - earlier.millis(), 3_600_000.0);
            }
            other => panic!("expected an overlap, got {other:?}"),
        }
    }
}
