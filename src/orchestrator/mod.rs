//! Month orchestration over pluggable input sources.
//!
//! The orchestrator pulls configurations, overrides, leave and holidays
//! through a [`RosterSource`], builds every visible staff member's roster for
//! the active month, audits coverage, and republishes when inputs change.

mod month;
mod source;

pub use month::{
    MonthInputs, MonthOrchestrator, Refresh, StaffInputs, compute_month_roster,
    compute_month_roster_with,
};
pub use source::{InMemorySource, RosterSource};
