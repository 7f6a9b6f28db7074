//! Timestamp parsing for operation dates.
//!
//! The API sends `created_at` in whatever ISO 8601 form the backend produced:
//! with an offset, as a naive wall-clock date-time, or as a bare date.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// A parsed operation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Instant with an explicit UTC offset
    Zoned(DateTime<FixedOffset>),
    /// Wall-clock date-time without offset
    Naive(NaiveDateTime),
    /// Calendar date only
    Date(NaiveDate),
}

impl Timestamp {
    /// Calendar date of this timestamp as seen from `tz`.
    ///
    /// Only zoned instants are converted; naive values are already wall-clock.
    pub fn calendar_date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        match self {
            Timestamp::Zoned(instant) => instant.with_timezone(tz).date_naive(),
            Timestamp::Naive(date_time) => date_time.date(),
            Timestamp::Date(date) => *date,
        }
    }
}

/// Parse an ISO 8601 timestamp; `None` for blank or malformed input
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(Timestamp::Zoned(instant));
    }

    if let Some(date_time) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(Timestamp::Naive(date_time));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(Timestamp::Date)
}
