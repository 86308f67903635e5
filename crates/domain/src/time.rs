//! Timestamps and their text encoding.
//!
//! Records carry microsecond precision. Anything finer is truncated when a
//! timestamp is minted so that a value survives a round-trip through either
//! storage backend unchanged.

use chrono::{DateTime, DurationRound, NaiveDateTime, SecondsFormat, TimeDelta, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to microseconds.
#[must_use]
pub fn now() -> Timestamp {
    let ts = Utc::now();
    ts.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(ts)
}

/// Render a timestamp as RFC 3339 with microseconds (`2017-03-25T02:17:06.000000Z`).
#[must_use]
pub fn format(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Offset-less ISO 8601 layout (`2017-03-25T02:17:06.000000`), read as UTC.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse an RFC 3339 timestamp into UTC. A timestamp without an offset is
/// taken to be UTC.
///
/// # Errors
///
/// Returns [`chrono::ParseError`] when `text` is neither RFC 3339 nor an
/// offset-less ISO 8601 date-time.
pub fn parse(text: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.to_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(text, NAIVE_FORMAT).map(|ts| ts.and_utc()))
}

/// Serde adapter encoding timestamps with [`format`] and decoding with [`parse`].
pub mod rfc3339 {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Timestamp;

    /// Serialize a timestamp as an RFC 3339 string with microseconds.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(ts))
    }

    /// Deserialize a timestamp with [`super::parse`].
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string or not a recognised timestamp.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse(&text).map_err(serde::de::Error::custom)
    }
}
