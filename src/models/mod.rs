//! Core data models for the roster engine.
//!
//! This module contains all the domain models used throughout the engine.

mod duty_code;
mod month;
mod overrides;
mod roster;
mod schedule_config;
mod staff;

pub use duty_code::DutyCode;
pub use month::RosterMonth;
pub use overrides::{CustomShiftOverride, Holiday, LeaveInterval};
pub use roster::{
    CodeSource, DefaultedConfig, IssueKind, MonthRoster, RosterDay, RosterIssue, StaffRoster,
};
pub use schedule_config::{ScheduleDefaults, ShiftPattern, StaffScheduleConfig};
pub use staff::{StaffFilter, StaffMember};
