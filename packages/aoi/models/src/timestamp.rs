//! Serde helpers for the `YYYY-MM-DDTHH:MM:SSZ` timestamps used in dataset
//! records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize as _, Deserializer, Serializer};

/// Timestamp format written to dataset records.
pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Builds a calendar date in a `const` context.
///
/// # Panics
///
/// Panics (at compile time when used in a `const`) if the date does not exist.
#[must_use]
pub const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Midnight UTC at the start of `date`.
#[must_use]
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    NaiveDateTime::new(date, NaiveTime::MIN).and_utc()
}

/// Serializes a timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(FORMAT))
}

/// Deserializes an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns an error if the string is not a valid RFC 3339 timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ENDTIME_DATE, STARTTIME_DATE};

    #[test]
    fn window_dates_format_as_midnight_utc() {
        assert_eq!(
            midnight_utc(STARTTIME_DATE).format(FORMAT).to_string(),
            "1990-01-01T00:00:00Z"
        );
        assert_eq!(
            midnight_utc(ENDTIME_DATE).format(FORMAT).to_string(),
            "2030-01-01T00:00:00Z"
        );
    }

    #[test]
    fn window_matches_epoch_seconds() {
        assert_eq!(midnight_utc(STARTTIME_DATE).timestamp(), 631_152_000);
        assert_eq!(midnight_utc(ENDTIME_DATE).timestamp(), 1_893_456_000);
    }

    #[test]
    fn parses_written_format() {
        let parsed = DateTime::parse_from_rfc3339("1990-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(parsed, midnight_utc(STARTTIME_DATE));
    }
}
