use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a canonical `YYYY-MM-DD` day key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid date key: '{0}' (expected YYYY-MM-DD)")]
pub struct DateKeyError(pub String);

/// Canonical identifier of a calendar day, rendered as zero-padded `YYYY-MM-DD`.
///
/// Ordering follows the calendar, which is also the lexicographic order of the
/// rendered keys, so a sorted map of keys is a chronological one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Builds the key of a day given as (year, month, day), month being 1-based.
    /// Returns `None` when the triple is not a real calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Gets the calendar day this key stands for.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Key of the calendar day immediately before this one, crossing month and
    /// year boundaries.
    pub fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateKey> for NaiveDate {
    fn from(key: DateKey) -> Self {
        key.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields, the key format does not
        if s.len() != 10 {
            return Err(DateKeyError(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateKeyError(s.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padded_rendering() {
        let key = DateKey::from_ymd(2024, 3, 5).unwrap();
        assert_eq!(key.to_string(), "2024-03-05");
    }

    #[test]
    fn test_invalid_day_rejected() {
        assert!(DateKey::from_ymd(2023, 2, 29).is_none());
        assert!(DateKey::from_ymd(2024, 2, 29).is_some());
        assert!(DateKey::from_ymd(2024, 13, 1).is_none());
    }

    #[test]
    fn test_parse() {
        let key: DateKey = "2024-12-31".parse().unwrap();
        assert_eq!((key.year(), key.month(), key.day()), (2024, 12, 31));

        assert!("2024-3-1".parse::<DateKey>().is_err());
        assert!("2024-02-30".parse::<DateKey>().is_err());
        assert!("garbage".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_pred_crosses_boundaries() {
        let first_of_march = DateKey::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(first_of_march.pred().unwrap().to_string(), "2024-02-29");

        let new_year = DateKey::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(new_year.pred().unwrap().to_string(), "2024-12-31");
    }

    #[test]
    fn test_ordering_matches_string_ordering() {
        let a = DateKey::from_ymd(2024, 9, 30).unwrap();
        let b = DateKey::from_ymd(2024, 10, 1).unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
