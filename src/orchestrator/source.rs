//! Roster input collaborators.
//!
//! This module defines the read-only interface the orchestrator pulls its
//! inputs through, and an in-memory implementation of it.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    CustomShiftOverride, Holiday, LeaveInterval, StaffFilter, StaffMember, StaffScheduleConfig,
};

/// Read-only access to the records a month computation consumes.
///
/// Every call may fail independently. The orchestrator decides how each
/// failure degrades the result.
pub trait RosterSource {
    /// Returns a staff member's cycle configuration, or `None` if they have none.
    fn schedule_config(&self, staff_id: &str) -> EngineResult<Option<StaffScheduleConfig>>;

    /// Returns a staff member's custom shifts dated within `[start, end]`.
    fn custom_overrides(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<CustomShiftOverride>>;

    /// Returns a staff member's leave intervals overlapping `[start, end]`.
    fn leave_intervals(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveInterval>>;

    /// Returns facility holidays dated within `[start, end]`.
    fn holidays(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<Holiday>>;

    /// Returns the ids of staff matching `filter`, in display order.
    fn visible_staff(&self, filter: &StaffFilter) -> EngineResult<Vec<String>>;
}

/// A [`RosterSource`] backed by owned collections.
///
/// # Example
///
/// ```
/// use roster_engine::models::{StaffFilter, StaffMember};
/// use roster_engine::orchestrator::{InMemorySource, RosterSource};
///
/// let source = InMemorySource::new().with_staff(StaffMember {
///     id: "dr_001".to_string(),
///     display_name: "Amara Okafor".to_string(),
///     department_id: None,
///     department_name: None,
/// });
///
/// let visible = source.visible_staff(&StaffFilter::default()).unwrap();
/// assert_eq!(visible, vec!["dr_001".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    staff: Vec<StaffMember>,
    configs: HashMap<String, StaffScheduleConfig>,
    custom_overrides: HashMap<String, Vec<CustomShiftOverride>>,
    leave_intervals: HashMap<String, Vec<LeaveInterval>>,
    holidays: Vec<Holiday>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a staff member to the directory.
    pub fn with_staff(mut self, member: StaffMember) -> Self {
        self.add_staff(member);
        self
    }

    /// Sets a staff member's cycle configuration.
    pub fn with_config(mut self, staff_id: &str, config: StaffScheduleConfig) -> Self {
        self.set_config(staff_id, config);
        self
    }

    /// Adds a custom shift for a staff member.
    pub fn with_custom_override(mut self, staff_id: &str, custom: CustomShiftOverride) -> Self {
        self.add_custom_override(staff_id, custom);
        self
    }

    /// Adds a leave interval for a staff member.
    pub fn with_leave(mut self, staff_id: &str, leave: LeaveInterval) -> Self {
        self.add_leave(staff_id, leave);
        self
    }

    /// Adds a facility holiday.
    pub fn with_holiday(mut self, holiday: Holiday) -> Self {
        self.add_holiday(holiday);
        self
    }

    /// Adds a staff member, replacing any existing record with the same id.
    pub fn add_staff(&mut self, member: StaffMember) {
        match self.staff.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => self.staff.push(member),
        }
    }

    /// Sets a staff member's cycle configuration, replacing any previous one.
    pub fn set_config(&mut self, staff_id: &str, config: StaffScheduleConfig) {
        self.configs.insert(staff_id.to_string(), config);
    }

    /// Removes a staff member's cycle configuration.
    pub fn remove_config(&mut self, staff_id: &str) -> Option<StaffScheduleConfig> {
        self.configs.remove(staff_id)
    }

    /// Adds a custom shift for a staff member.
    pub fn add_custom_override(&mut self, staff_id: &str, custom: CustomShiftOverride) {
        self.custom_overrides
            .entry(staff_id.to_string())
            .or_default()
            .push(custom);
    }

    /// Removes every custom shift a staff member has on `date`.
    pub fn remove_custom_overrides_on(&mut self, staff_id: &str, date: NaiveDate) {
        if let Some(overrides) = self.custom_overrides.get_mut(staff_id) {
            overrides.retain(|custom| custom.date != date);
        }
    }

    /// Adds a leave interval for a staff member.
    pub fn add_leave(&mut self, staff_id: &str, leave: LeaveInterval) {
        self.leave_intervals
            .entry(staff_id.to_string())
            .or_default()
            .push(leave);
    }

    /// Adds a facility holiday.
    pub fn add_holiday(&mut self, holiday: Holiday) {
        self.holidays.push(holiday);
    }

    /// Replaces the facility holiday list.
    pub fn set_holidays(&mut self, holidays: Vec<Holiday>) {
        self.holidays = holidays;
    }
}

impl RosterSource for InMemorySource {
    fn schedule_config(&self, staff_id: &str) -> EngineResult<Option<StaffScheduleConfig>> {
        Ok(self.configs.get(staff_id).cloned())
    }

    fn custom_overrides(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<CustomShiftOverride>> {
        Ok(self
            .custom_overrides
            .get(staff_id)
            .map(|overrides| {
                overrides
                    .iter()
                    .filter(|custom| custom.date >= start && custom.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn leave_intervals(
        &self,
        staff_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveInterval>> {
        Ok(self
            .leave_intervals
            .get(staff_id)
            .map(|leaves| {
                leaves
                    .iter()
                    // Inverted intervals are passed through so the orchestrator can report them.
                    .filter(|leave| leave.start_date > leave.end_date || leave.overlaps(start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn holidays(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<Holiday>> {
        Ok(self
            .holidays
            .iter()
            .filter(|holiday| holiday.date >= start && holiday.date <= end)
            .cloned()
            .collect())
    }

    fn visible_staff(&self, filter: &StaffFilter) -> EngineResult<Vec<String>> {
        Ok(self
            .staff
            .iter()
            .filter(|member| filter.matches(member))
            .map(|member| member.id.clone())
            .collect())
    }
}
