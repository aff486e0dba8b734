use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("timestamp cannot be empty")]
    Empty,
    #[error("unix timestamp out of range: {0}")]
    OutOfRange(String),
    #[error("unrecognized timestamp: {0}")]
    Unrecognized(String),
}

/// A submission timestamp in UTC with second precision.
///
/// Ordering is chronological and agrees with the lexicographic ordering of the
/// canonical string form, so callers may compare either representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreatedAt(DateTime<Utc>);

impl CreatedAt {
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(0))
    }

    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        parse_utc_timestamp(input).map(Self::from_datetime)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// ISO-8601 with an explicit `+00:00` offset, e.g. `2024-05-01T09:30:00+00:00`.
    pub fn to_canonical(&self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl Serialize for CreatedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Parses the timestamp shapes found in exported submission datasets.
///
/// Values without an offset are taken as UTC. `@<seconds>` is read as a unix
/// timestamp.
pub fn parse_utc_timestamp(input: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Some(seconds) = trimmed.strip_prefix('@') {
        let seconds: i64 = seconds
            .trim()
            .parse()
            .map_err(|_| TimeParseError::Unrecognized(trimmed.to_string()))?;
        return DateTime::<Utc>::from_timestamp(seconds, 0)
            .ok_or_else(|| TimeParseError::OutOfRange(trimmed.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    let naive_input = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed)
        .trim_end();
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive_input, fmt) {
            return Ok(dt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(naive_input, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    Err(TimeParseError::Unrecognized(trimmed.to_string()))
}
