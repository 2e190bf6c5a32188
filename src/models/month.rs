//! Calendar month model.
//!
//! This module contains [`RosterMonth`], the validated (year, month) pair a
//! roster is computed for.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single calendar month in the facility-local calendar.
///
/// Serializes as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use roster_engine::models::RosterMonth;
///
/// let month: RosterMonth = "2028-02".parse().unwrap();
/// assert_eq!(month.days_in_month(), 29);
/// assert_eq!(month.to_string(), "2028-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RosterMonth {
    year: i32,
    month: u32,
    first_day: NaiveDate,
}

impl RosterMonth {
    /// Creates a month, rejecting month numbers outside 1..=12 and
    /// years chrono cannot represent.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::InvalidMonth { year, month })?;
        // The month after must also exist for `last_day` to be computable.
        next_month_start(year, month).ok_or(EngineError::InvalidMonth { year, month })?;
        Ok(Self {
            year,
            month,
            first_day,
        })
    }

    /// Returns the month containing `date`.
    pub fn containing(date: NaiveDate) -> EngineResult<Self> {
        Self::new(date.year(), date.month())
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day + chrono::Duration::days(i64::from(self.days_in_month()) - 1)
    }

    /// Returns the number of days in the month.
    pub fn days_in_month(&self) -> u32 {
        next_month_start(self.year, self.month)
            .map(|next| next.signed_duration_since(self.first_day).num_days() as u32)
            .unwrap_or(31)
    }

    /// Returns the date for a 1-based day number, if it exists in the month.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Returns true if `date` lies within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Iterates over every date in the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month()).filter_map(move |day| self.date(day))
    }
}

fn next_month_start(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
}

impl fmt::Display for RosterMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for RosterMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || EngineError::InvalidMonth { year: 0, month: 0 };
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for RosterMonth {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<RosterMonth> for String {
    fn from(month: RosterMonth) -> Self {
        month.to_string()
    }
}
