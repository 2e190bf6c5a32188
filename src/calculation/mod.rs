//! Calculation logic for the roster engine.
//!
//! This module contains the pure roster computations: mapping a date onto a
//! staff member's active/off cycle, resolving manual overrides on top of the
//! base code, building a staff member's full-month roster, and auditing
//! daily coverage across all rosters.

mod coverage;
mod cycle;
mod override_resolution;
mod roster_builder;

pub use coverage::{CoverageReport, audit_coverage, find_conflict_days};
pub use cycle::{CycleParams, CyclePosition, base_duty_code, cycle_position};
pub use override_resolution::{DayOverrides, ResolvedCode, resolve_duty_code};
pub use roster_builder::{RosterBuild, StaffOverrides, build_base_roster, build_staff_roster};
