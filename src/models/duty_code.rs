//! Duty code model.
//!
//! A [`DutyCode`] is the resolved schedule state of one staff member on one
//! calendar day. The set is closed so that every consumer can match on it
//! exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single day's resolved schedule state for one staff member.
///
/// # Example
///
/// ```
/// use roster_engine::models::DutyCode;
///
/// let code: DutyCode = "NS".parse().unwrap();
/// assert_eq!(code, DutyCode::Night);
/// assert!(code.is_on_duty());
/// assert_eq!(code.short_code(), "NS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyCode {
    /// On duty for the whole day.
    #[serde(alias = "WD")]
    WholeDay,
    /// On the morning shift slot.
    #[serde(alias = "MS")]
    Morning,
    /// On the afternoon shift slot.
    #[serde(alias = "AS")]
    Afternoon,
    /// On the night shift slot.
    #[serde(alias = "NS")]
    Night,
    /// A regular off day of the cycle.
    #[serde(alias = "OF")]
    Off,
    /// A facility-wide holiday.
    #[serde(alias = "HO")]
    Holiday,
    /// Covered by a leave interval.
    #[serde(alias = "LV")]
    Leave,
    /// The staff member's cycle has not started yet.
    #[serde(alias = "NA")]
    NotAvailable,
}

impl DutyCode {
    /// Every duty code, in declaration order.
    pub const ALL: [DutyCode; 8] = [
        DutyCode::WholeDay,
        DutyCode::Morning,
        DutyCode::Afternoon,
        DutyCode::Night,
        DutyCode::Off,
        DutyCode::Holiday,
        DutyCode::Leave,
        DutyCode::NotAvailable,
    ];

    /// Returns true if a staff member holding this code covers the day.
    pub fn is_on_duty(self) -> bool {
        match self {
            DutyCode::WholeDay | DutyCode::Morning | DutyCode::Afternoon | DutyCode::Night => true,
            DutyCode::Off | DutyCode::Holiday | DutyCode::Leave | DutyCode::NotAvailable => false,
        }
    }

    /// Returns the two-letter code used by stored override records.
    pub fn short_code(self) -> &'static str {
        match self {
            DutyCode::WholeDay => "WD",
            DutyCode::Morning => "MS",
            DutyCode::Afternoon => "AS",
            DutyCode::Night => "NS",
            DutyCode::Off => "OF",
            DutyCode::Holiday => "HO",
            DutyCode::Leave => "LV",
            DutyCode::NotAvailable => "NA",
        }
    }

    fn name(self) -> &'static str {
        match self {
            DutyCode::WholeDay => "whole_day",
            DutyCode::Morning => "morning",
            DutyCode::Afternoon => "afternoon",
            DutyCode::Night => "night",
            DutyCode::Off => "off",
            DutyCode::Holiday => "holiday",
            DutyCode::Leave => "leave",
            DutyCode::NotAvailable => "not_available",
        }
    }
}

impl fmt::Display for DutyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DutyCode {
    type Err = EngineError;

    /// Parses either the snake_case name or the two-letter code, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DutyCode::ALL
            .into_iter()
            .find(|code| {
                code.short_code().eq_ignore_ascii_case(trimmed)
                    || code.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| EngineError::InvalidDutyCode {
                code: s.to_string(),
            })
    }
}
