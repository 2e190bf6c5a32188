//! Manual override records.
//!
//! This module contains the three override layers applied on top of the base
//! cycle: per-date custom shifts, leave intervals and facility holidays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::DutyCode;

fn default_override_code() -> DutyCode {
    DutyCode::WholeDay
}

/// An explicit duty code set by hand for one staff member on one date.
///
/// Records that omit the code are treated as whole-day duty.
///
/// # Example
///
/// ```
/// use roster_engine::models::{CustomShiftOverride, DutyCode};
///
/// let json = r#"{ "date": "2026-03-10" }"#;
/// let custom: CustomShiftOverride = serde_json::from_str(json).unwrap();
/// assert_eq!(custom.code, DutyCode::WholeDay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomShiftOverride {
    /// The date the override applies to.
    pub date: NaiveDate,
    /// The duty code to apply.
    #[serde(default = "default_override_code")]
    pub code: DutyCode,
}

/// An inclusive range of days a staff member is on leave.
///
/// # Example
///
/// ```
/// use roster_engine::models::LeaveInterval;
/// use chrono::NaiveDate;
///
/// let leave = LeaveInterval::single_day(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());
/// assert!(leave.contains(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()));
/// assert!(!leave.contains(NaiveDate::from_ymd_opt(2026, 3, 21).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaveInterval {
    /// The first day of leave (inclusive).
    pub start_date: NaiveDate,
    /// The last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Optional leave category such as "annual" or "sick".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
}

impl LeaveInterval {
    /// Creates a leave interval covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
            leave_type: None,
        }
    }

    /// Returns true if `date` falls within the interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the interval shares at least one day with `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// Rejects intervals that end before they start.
    pub fn validate(&self, staff_id: &str) -> EngineResult<()> {
        if self.start_date > self.end_date {
            return Err(EngineError::InvalidLeaveInterval {
                staff_id: staff_id.to_string(),
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }
}

/// A facility-wide holiday.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Independence Day").
    #[serde(default)]
    pub name: String,
}
