use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::engine::EngineError;

/// A calendar year-month with no day component.
///
/// Parsed from `YYYY-MM` (what a month picker produces). `YYYY-MM-DD` is also
/// accepted because date columns and older records carry full dates; the day
/// is dropped on parse so it can never influence a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidDateFormat(format!(
                "{year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The year-month of `instant` on a wall clock `offset` from UTC.
    pub fn at(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::from_date(instant.with_timezone(&offset).date_naive())
    }

    /// The current year-month on the owner's wall clock. Month boundaries are
    /// local: at 03:00 KST on March 1st it is already March, while UTC still
    /// reads February.
    pub fn current_at(offset: FixedOffset) -> Self {
        Self::at(Utc::now(), offset)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar months from `self` to `end`. Negative when `end` precedes `self`.
    pub fn months_until(&self, end: YearMonth) -> i64 {
        let years = i64::from(end.year) - i64::from(self.year);
        let months = i64::from(end.month) - i64::from(self.month);
        years * 12 + months
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDateFormat(s.to_string());
        let trimmed = s.trim();

        if trimmed.len() == 10 {
            return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Self::from_date)
                .map_err(|_| invalid());
        }

        let (year, month) = trimmed.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
