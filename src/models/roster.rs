//! Roster result models.
//!
//! This module contains the derived outputs of a month computation: each
//! staff member's day-to-code sequence, the coverage audit, and the
//! non-fatal issues collected along the way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DutyCode, RosterMonth, StaffScheduleConfig};

/// The layer that produced a day's final duty code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeSource {
    /// The base active/off cycle.
    Cycle,
    /// A manual per-date override.
    CustomOverride,
    /// A leave interval.
    Leave,
    /// A facility holiday.
    Holiday,
}

/// One staff member's resolved code for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterDay {
    /// The 1-based day of the month.
    pub day: u32,
    /// The final duty code.
    pub code: DutyCode,
    /// The layer that produced `code`.
    pub source: CodeSource,
}

/// A staff member's full-month roster.
///
/// `days` holds every day of the month. `sources` only records days whose
/// code came from an override layer rather than the base cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRoster {
    /// The staff member this roster belongs to.
    pub staff_id: String,
    /// Day number to final duty code.
    pub days: BTreeMap<u32, DutyCode>,
    /// Day number to override layer, for overridden days only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<u32, CodeSource>,
    /// True when overrides could not be fetched and only the base cycle applies.
    #[serde(default)]
    pub degraded: bool,
}

impl StaffRoster {
    /// Creates an empty roster for `staff_id`.
    pub fn new(staff_id: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            days: BTreeMap::new(),
            sources: BTreeMap::new(),
            degraded: false,
        }
    }

    /// Records the resolved code for one day.
    pub fn push(&mut self, roster_day: RosterDay) {
        self.days.insert(roster_day.day, roster_day.code);
        if roster_day.source != CodeSource::Cycle {
            self.sources.insert(roster_day.day, roster_day.source);
        }
    }

    /// Returns the code for a day number, if the day was computed.
    pub fn code(&self, day: u32) -> Option<DutyCode> {
        self.days.get(&day).copied()
    }

    /// Returns the layer that produced a day's code.
    pub fn source(&self, day: u32) -> Option<CodeSource> {
        if !self.days.contains_key(&day) {
            return None;
        }
        Some(self.sources.get(&day).copied().unwrap_or(CodeSource::Cycle))
    }

    /// Counts how many days carry each duty code.
    pub fn code_counts(&self) -> BTreeMap<DutyCode, u32> {
        let mut counts = BTreeMap::new();
        for code in self.days.values() {
            *counts.entry(*code).or_insert(0) += 1;
        }
        counts
    }
}

/// The category of a non-fatal failure collected during a month computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// No schedule configuration existed; a default was synthesized.
    ConfigMissing,
    /// The schedule configuration could not be fetched; the staff member was skipped.
    ConfigFetchFailed,
    /// Overrides or leaves could not be fetched; the base cycle was used.
    OverrideFetchFailed,
    /// The schedule configuration cannot drive the cycle; the staff member was skipped.
    DegenerateCycleConfig,
    /// A leave interval ended before it started and was ignored.
    InvalidLeaveInterval,
    /// Holidays could not be fetched; no holiday overrides were applied.
    HolidayFetchFailed,
}

/// A non-fatal failure reported alongside a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterIssue {
    /// The affected staff member, or `None` for facility-wide issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    /// What went wrong.
    pub kind: IssueKind,
    /// A human-readable description.
    pub message: String,
}

impl RosterIssue {
    /// Creates an issue affecting one staff member.
    pub fn for_staff(staff_id: &str, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            staff_id: Some(staff_id.to_string()),
            kind,
            message: message.into(),
        }
    }

    /// Creates a facility-wide issue.
    pub fn facility(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            staff_id: None,
            kind,
            message: message.into(),
        }
    }
}

/// A default configuration synthesized for a staff member who had none.
///
/// Callers are expected to persist these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultedConfig {
    /// The staff member the default was created for.
    pub staff_id: String,
    /// The synthesized configuration.
    pub config: StaffScheduleConfig,
}

/// The published result of one month computation.
///
/// # Example
///
/// ```
/// use roster_engine::models::{MonthRoster, RosterMonth};
///
/// let month = RosterMonth::new(2026, 3).unwrap();
/// let roster = MonthRoster::empty(month);
/// assert!(roster.rosters.is_empty());
/// assert!(roster.conflict_days.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRoster {
    /// The month the rosters cover.
    pub month: RosterMonth,
    /// Rosters in visible staff order. Staff that could not be computed are absent.
    pub rosters: Vec<StaffRoster>,
    /// Ascending day numbers on which nobody is on duty.
    pub conflict_days: Vec<u32>,
    /// On-duty headcount for every day of the month.
    pub daily_coverage: BTreeMap<u32, usize>,
    /// Non-fatal failures encountered while computing.
    pub issues: Vec<RosterIssue>,
    /// Default configurations synthesized for staff without one.
    pub defaulted_configs: Vec<DefaultedConfig>,
}

impl MonthRoster {
    /// Creates a result with no rosters and no audit data.
    pub fn empty(month: RosterMonth) -> Self {
        Self {
            month,
            rosters: Vec::new(),
            conflict_days: Vec::new(),
            daily_coverage: BTreeMap::new(),
            issues: Vec::new(),
            defaulted_configs: Vec::new(),
        }
    }

    /// Looks up a staff member's roster.
    pub fn roster(&self, staff_id: &str) -> Option<&StaffRoster> {
        self.rosters.iter().find(|r| r.staff_id == staff_id)
    }

    /// Looks up a staff member's code for one day.
    pub fn code(&self, staff_id: &str, day: u32) -> Option<DutyCode> {
        self.roster(staff_id).and_then(|r| r.code(day))
    }

    /// Returns the issues reported for one staff member.
    pub fn issues_for<'a>(&'a self, staff_id: &'a str) -> impl Iterator<Item = &'a RosterIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.staff_id.as_deref() == Some(staff_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: u32, code: DutyCode, source: CodeSource) -> RosterDay {
        RosterDay { day, code, source }
    }

    #[test]
    fn test_push_only_records_override_sources() {
        let mut roster = StaffRoster::new("dr_001");
        roster.push(day(1, DutyCode::WholeDay, CodeSource::Cycle));
        roster.push(day(2, DutyCode::Leave, CodeSource::Leave));

        assert_eq!(roster.days.len(), 2);
        assert_eq!(roster.sources.len(), 1);
        assert_eq!(roster.source(1), Some(CodeSource::Cycle));
        assert_eq!(roster.source(2), Some(CodeSource::Leave));
        assert_eq!(roster.source(3), None);
    }

    #[test]
    fn test_code_counts() {
        let mut roster = StaffRoster::new("dr_001");
        roster.push(day(1, DutyCode::Morning, CodeSource::Cycle));
        roster.push(day(2, DutyCode::Morning, CodeSource::Cycle));
        roster.push(day(3, DutyCode::Off, CodeSource::Cycle));

        let counts = roster.code_counts();
        assert_eq!(counts.get(&DutyCode::Morning), Some(&2));
        assert_eq!(counts.get(&DutyCode::Off), Some(&1));
        assert_eq!(counts.get(&DutyCode::Night), None);
    }

    #[test]
    fn test_roster_serializes_day_numbers_as_keys() {
        let mut roster = StaffRoster::new("dr_001");
        roster.push(day(1, DutyCode::Night, CodeSource::CustomOverride));

        let json = serde_json::to_value(&roster).unwrap();
        assert_eq!(json["days"]["1"], "night");
        assert_eq!(json["sources"]["1"], "custom_override");
        assert_eq!(json["degraded"], false);
    }

    #[test]
    fn test_issue_constructors() {
        let staff = RosterIssue::for_staff("dr_001", IssueKind::ConfigMissing, "defaulted");
        assert_eq!(staff.staff_id.as_deref(), Some("dr_001"));

        let facility = RosterIssue::facility(IssueKind::HolidayFetchFailed, "timeout");
        assert!(facility.staff_id.is_none());

        let json = serde_json::to_value(&facility).unwrap();
        assert_eq!(json["kind"], "holiday_fetch_failed");
        assert!(json.get("staff_id").is_none());
    }

    #[test]
    fn test_month_roster_lookups() {
        let month = RosterMonth::new(2026, 3).unwrap();
        let mut result = MonthRoster::empty(month);
        let mut roster = StaffRoster::new("dr_001");
        roster.push(day(5, DutyCode::Afternoon, CodeSource::Cycle));
        result.rosters.push(roster);
        result.issues.push(RosterIssue::for_staff(
            "dr_001",
            IssueKind::OverrideFetchFailed,
            "timeout",
        ));

        assert_eq!(result.code("dr_001", 5), Some(DutyCode::Afternoon));
        assert_eq!(result.code("dr_002", 5), None);
        assert_eq!(result.issues_for("dr_001").count(), 1);
        assert_eq!(result.issues_for("dr_002").count(), 0);
    }
}
