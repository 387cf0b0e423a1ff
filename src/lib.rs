//! Date helpers and a polling countdown timer for dashboard forms.
//!
//! The date helpers are pure: fixed-multiplier arithmetic over [`Instant`],
//! `YYYY-MM-DDTHH:mm` formatting and parsing in a [`Zone`], and the host's
//! zone name via [`localtz`]. [`Timer`] samples a [`Clock`] in the
//! background and answers [`Timer::done`] from its last reading.

pub mod clock;
pub mod date;
pub mod error;
pub mod format;
pub mod instant;
pub mod timer;
pub mod zone;

pub use clock::{Clock, ManualClock, SystemClock};
pub use date::{add_days, add_hours, add_minutes, add_seconds};
pub use error::{Error, Result};
pub use format::{datetime_format, datetime_format_in, parse_datetime};
pub use instant::Instant;
pub use timer::{Timer, TimerOptions};
pub use zone::{Zone, localtz};
