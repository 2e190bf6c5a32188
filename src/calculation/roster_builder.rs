//! Roster building.
//!
//! This module drives the cycle calculator and the override resolver across
//! every day of a month for one staff member.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    CustomShiftOverride, DutyCode, Holiday, LeaveInterval, RosterDay, RosterMonth,
    ScheduleDefaults, StaffRoster, StaffScheduleConfig,
};

use super::cycle::{CycleParams, base_duty_code};
use super::override_resolution::{DayOverrides, resolve_duty_code};

/// The per-staff override records fetched for a month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffOverrides {
    /// Manual per-date codes. When several share a date, the last one wins.
    #[serde(default)]
    pub custom_overrides: Vec<CustomShiftOverride>,
    /// Leave intervals overlapping the month.
    #[serde(default)]
    pub leave_intervals: Vec<LeaveInterval>,
}

/// The outcome of building one staff member's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterBuild {
    /// The full-month roster.
    pub roster: StaffRoster,
    /// The configuration synthesized when the staff member had none.
    pub defaulted_config: Option<StaffScheduleConfig>,
}

/// Builds a full-month roster for one staff member.
///
/// Days are processed in ascending order. For each day the base cycle code is
/// computed and then resolved against the overrides that fall on that date.
/// Overrides, leave days and holidays outside `month` are ignored.
///
/// # Arguments
///
/// * `staff_id` - The staff member being rostered
/// * `month` - The month to build
/// * `config` - The staff member's cycle configuration, if one exists
/// * `defaults` - Parameters used when `config` is `None`; the synthesized
///   cycle is anchored on the first day of `month`
/// * `overrides` - The staff member's custom shifts and leave intervals
/// * `holidays` - Facility holidays
///
/// # Errors
///
/// Returns `DegenerateCycleConfig` if the configuration (or the defaults)
/// has a zero cycle length or rotation frequency.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{build_staff_roster, StaffOverrides};
/// use roster_engine::models::{DutyCode, RosterMonth, ScheduleDefaults};
///
/// let month = RosterMonth::new(2026, 4).unwrap();
/// let build = build_staff_roster(
///     "dr_001",
///     month,
///     None,
///     &ScheduleDefaults::default(),
///     &StaffOverrides::default(),
///     &[],
/// )
/// .unwrap();
///
/// assert!(build.defaulted_config.is_some());
/// assert_eq!(build.roster.code(1), Some(DutyCode::WholeDay));
/// assert_eq!(build.roster.code(6), Some(DutyCode::Off));
/// ```
pub fn build_staff_roster(
    staff_id: &str,
    month: RosterMonth,
    config: Option<&StaffScheduleConfig>,
    defaults: &ScheduleDefaults,
    overrides: &StaffOverrides,
    holidays: &[Holiday],
) -> EngineResult<RosterBuild> {
    let (params, defaulted_config) = match config {
        Some(config) => (CycleParams::new(config, staff_id)?, None),
        None => {
            let synthesized = defaults.anchored_at(month.first_day());
            (CycleParams::new(&synthesized, staff_id)?, Some(synthesized))
        }
    };

    let custom_by_day = custom_codes_by_day(month, &overrides.custom_overrides);
    let leave_days = leave_days_in_month(month, &overrides.leave_intervals);
    let holiday_days = holiday_days_in_month(month, holidays);

    let mut roster = StaffRoster::new(staff_id);
    for date in month.days() {
        let day = date.day();
        let base = base_duty_code(date, &params);
        let resolved = resolve_duty_code(
            base,
            &DayOverrides {
                custom: custom_by_day.get(&day).copied(),
                on_leave: leave_days.contains(&day),
                holiday: holiday_days.contains(&day),
            },
        );
        roster.push(RosterDay {
            day,
            code: resolved.code,
            source: resolved.source,
        });
    }

    debug!(
        staff_id = %staff_id,
        month = %month,
        defaulted = defaulted_config.is_some(),
        overridden_days = roster.sources.len(),
        "Built staff roster"
    );

    Ok(RosterBuild {
        roster,
        defaulted_config,
    })
}

/// Builds a roster from the base cycle only, ignoring every override layer.
pub fn build_base_roster(
    staff_id: &str,
    month: RosterMonth,
    config: Option<&StaffScheduleConfig>,
    defaults: &ScheduleDefaults,
) -> EngineResult<RosterBuild> {
    build_staff_roster(
        staff_id,
        month,
        config,
        defaults,
        &StaffOverrides::default(),
        &[],
    )
}

fn custom_codes_by_day(
    month: RosterMonth,
    custom_overrides: &[CustomShiftOverride],
) -> BTreeMap<u32, DutyCode> {
    custom_overrides
        .iter()
        .filter(|custom| month.contains(custom.date))
        .map(|custom| (custom.date.day(), custom.code))
        .collect()
}

fn leave_days_in_month(month: RosterMonth, leaves: &[LeaveInterval]) -> BTreeSet<u32> {
    let (first, last) = (month.first_day(), month.last_day());
    leaves
        .iter()
        .filter(|leave| leave.start_date <= leave.end_date && leave.overlaps(first, last))
        .flat_map(|leave| {
            let start = leave.start_date.max(first);
            let end = leave.end_date.min(last);
            days_between(start, end)
        })
        .collect()
}

fn holiday_days_in_month(month: RosterMonth, holidays: &[Holiday]) -> BTreeSet<u32> {
    holidays
        .iter()
        .filter(|holiday| month.contains(holiday.date))
        .map(|holiday| holiday.date.day())
        .collect()
}

fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = u32> {
    start
        .iter_days()
        .take_while(move |date| *date <= end)
        .map(|date| date.day())
}
