use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown time zone {0:?}")]
    UnknownZone(String),
    #[error("invalid date/time {0:?}, expected YYYY-MM-DDTHH:mm")]
    InvalidDateTime(String),
    #[error("{value} does not exist in time zone {zone}")]
    NonexistentLocalTime { value: String, zone: String },
    #[error("failed to spawn timer sampler: {0}")]
    Sampler(#[from] io::Error),
}
