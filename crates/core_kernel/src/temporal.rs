//! Calendar date handling for the book
//!
//! This module provides the date utility every other part of the system
//! consumes:
//! - Parsing of loosely formatted date input into `NaiveDate`
//! - Inclusive range containment with optionally open bounds
//! - Canonical `YYYY-MM-DD` formatting

use chrono::{DateTime, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical date format used for parsing and display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },
}

/// Parses a date from text
///
/// Accepts `YYYY-MM-DD`, the compact `YYYYMMDD` form and RFC 3339
/// timestamps, of which only the date part is kept.
///
/// # Errors
///
/// Returns `TemporalError::InvalidDate` when the text matches none of the
/// accepted forms.
pub fn parse_date(text: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = text.trim();

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, COMPACT_DATE_FORMAT))
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| TemporalError::InvalidDate(text.to_string()))
}

/// Formats a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns true if `date` lies within `[from, to]`
///
/// A missing bound leaves that side of the range open.
pub fn is_within_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
}

/// Returns true if `later` is exactly one calendar day after `earlier`
pub fn is_day_after(later: NaiveDate, earlier: NaiveDate) -> bool {
    earlier.checked_add_days(Days::new(1)) == Some(later)
}

/// Conversion of caller supplied date input into a calendar date
///
/// Book operations take `impl IntoDate` so callers can pass either a parsed
/// `NaiveDate` or date text.
pub trait IntoDate {
    fn into_date(self) -> Result<NaiveDate, TemporalError>;
}

impl IntoDate for NaiveDate {
    fn into_date(self) -> Result<NaiveDate, TemporalError> {
        Ok(self)
    }
}

impl IntoDate for &NaiveDate {
    fn into_date(self) -> Result<NaiveDate, TemporalError> {
        Ok(*self)
    }
}

impl IntoDate for &str {
    fn into_date(self) -> Result<NaiveDate, TemporalError> {
        parse_date(self)
    }
}

impl IntoDate for String {
    fn into_date(self) -> Result<NaiveDate, TemporalError> {
        parse_date(&self)
    }
}

impl IntoDate for &String {
    fn into_date(self) -> Result<NaiveDate, TemporalError> {
        parse_date(self)
    }
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: format_date(start),
                end: format_date(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        is_within_range(date, Some(self.start), Some(self.end))
    }

    /// Number of days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if `next` starts on the day after this range ends
    pub fn is_followed_by(&self, next: &DateRange) -> bool {
        is_day_after(next.start, self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", format_date(self.start), format_date(self.end))
    }
}
