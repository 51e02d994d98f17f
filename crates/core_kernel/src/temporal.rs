//! Local-time window handling
//!
//! This module provides the time types the ledger needs:
//! - `Timezone`: maps UTC instants onto the local calendar used by rolling
//!   withdrawal/transfer windows (daily and monthly counters reset at *local*
//!   day and month boundaries, not UTC ones)
//! - `StatementPeriod`: a validated calendar month used by statement
//!   generation and date-range transaction queries

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Timezone wrapper for the ledger's local calendar
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the local calendar date of a UTC instant
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        utc.with_timezone(&self.0).date_naive()
    }

    /// Returns the local (year, month) of a UTC instant
    pub fn local_month(&self, utc: DateTime<Utc>) -> (i32, u32) {
        let local = utc.with_timezone(&self.0);
        (local.year(), local.month())
    }

    /// Returns true if both instants fall on the same local calendar day
    pub fn same_local_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local_date(a) == self.local_date(b)
    }

    /// Returns true if both instants fall in the same local calendar month
    pub fn same_local_month(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local_month(a) == self.local_month(b)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month: {month}. Month must be between 1 and 12")]
    InvalidMonth { month: u32 },

    #[error("Invalid date: {year}-{month:02}-01")]
    InvalidDate { year: i32, month: u32 },
}

/// A validated calendar month, the unit of statement generation
///
/// The period covers `[start, end_exclusive)` in UTC: from the first instant
/// of the month to the first instant of the following month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    year: i32,
    month: u32,
}

impl StatementPeriod {
    /// Creates a period for the given year and month (1-12)
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth { month });
        }
        // Both bounds must be representable: the exclusive end lives in the
        // following month, which overflows chrono's range one month earlier
        // than the start does
        let (next_year, next_month) = Self::following(year, month);
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(next_year, next_month, 1).is_none()
        {
            return Err(TemporalError::InvalidDate { year, month });
        }
        Ok(Self { year, month })
    }

    fn following(year: i32, month: u32) -> (i32, u32) {
        if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        }
    }

    /// Returns the period containing the given instant
    pub fn containing(instant: DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month (inclusive)
    pub fn start(&self) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated on construction")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc()
    }

    /// First instant of the following month (exclusive bound)
    pub fn end_exclusive(&self) -> DateTime<Utc> {
        let (year, month) = Self::following(self.year, self.month);
        NaiveDate::from_ymd_opt(year, month, 1)
            .expect("validated on construction")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc()
    }

    /// Returns true if the instant falls within this period
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start() && instant < self.end_exclusive()
    }
}

impl std::fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
