//! Month orchestration.
//!
//! A month computation runs in two phases. The fetch phase pulls every input
//! for the visible staff set from a [`RosterSource`] into a [`MonthInputs`]
//! snapshot, recording each failed fetch instead of aborting. The compute
//! phase turns a complete snapshot into a [`MonthRoster`] without further I/O.
//! [`MonthOrchestrator`] keeps the last snapshot and only recomputes when a
//! fresh one differs.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::calculation::{StaffOverrides, audit_coverage, build_staff_roster};
use crate::error::EngineResult;
use crate::models::{
    DefaultedConfig, Holiday, IssueKind, MonthRoster, RosterIssue, RosterMonth,
    ScheduleDefaults, StaffFilter, StaffScheduleConfig,
};

use super::source::RosterSource;

/// Everything fetched for one staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffInputs {
    /// The staff member.
    pub staff_id: String,
    /// The configuration fetch outcome. `Ok(None)` means no configuration exists.
    pub config: EngineResult<Option<StaffScheduleConfig>>,
    /// The combined custom shift and leave fetch outcome.
    pub overrides: EngineResult<StaffOverrides>,
}

/// A complete input snapshot for one month computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthInputs {
    /// The month being computed.
    pub month: RosterMonth,
    /// Per-staff inputs, in visible staff order with duplicates removed.
    pub staff: Vec<StaffInputs>,
    /// The holiday fetch outcome.
    pub holidays: EngineResult<Vec<Holiday>>,
}

impl MonthInputs {
    /// Fetches every input needed to roster `staff` for `month`.
    ///
    /// Fetch failures are captured per unit; this never fails as a whole.
    pub fn fetch<S: RosterSource + ?Sized>(
        source: &S,
        staff: &[String],
        month: RosterMonth,
    ) -> Self {
        let (start, end) = (month.first_day(), month.last_day());
        let mut seen = HashSet::new();

        let staff = staff
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .map(|staff_id| {
                let config = source.schedule_config(staff_id);
                let overrides = source
                    .custom_overrides(staff_id, start, end)
                    .and_then(|custom_overrides| {
                        let leave_intervals = source.leave_intervals(staff_id, start, end)?;
                        Ok(StaffOverrides {
                            custom_overrides,
                            leave_intervals,
                        })
                    });
                StaffInputs {
                    staff_id: staff_id.clone(),
                    config,
                    overrides,
                }
            })
            .collect();

        Self {
            month,
            staff,
            holidays: source.holidays(start, end),
        }
    }

    /// Computes the month's rosters and coverage audit from this snapshot.
    ///
    /// # Degradation
    ///
    /// - Missing configuration: `defaults` anchored on the first of the month
    ///   are used and reported as `ConfigMissing`
    /// - Configuration fetch failure: the staff member is skipped
    /// - Override fetch failure: the staff member gets the base cycle only,
    ///   with no custom shift, leave or holiday applied
    /// - Degenerate configuration: the staff member is skipped and so adds
    ///   no coverage on any day
    /// - Inverted leave interval: that interval is ignored
    /// - Holiday fetch failure: the month proceeds without holidays
    pub fn compute(&self, defaults: &ScheduleDefaults) -> MonthRoster {
        let start_time = Instant::now();
        let month = self.month;
        let mut result = MonthRoster::empty(month);

        let holidays: &[Holiday] = match &self.holidays {
            Ok(holidays) => holidays,
            Err(err) => {
                warn!(month = %month, error = %err, "Holiday fetch failed, continuing without holidays");
                result.issues.push(RosterIssue::facility(
                    IssueKind::HolidayFetchFailed,
                    err.to_string(),
                ));
                &[]
            }
        };

        for inputs in &self.staff {
            let staff_id = inputs.staff_id.as_str();

            let config = match &inputs.config {
                Ok(config) => config.as_ref(),
                Err(err) => {
                    warn!(staff_id = %staff_id, error = %err, "Schedule config fetch failed");
                    result.issues.push(RosterIssue::for_staff(
                        staff_id,
                        IssueKind::ConfigFetchFailed,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            let (overrides, degraded) = match &inputs.overrides {
                Ok(overrides) => (valid_overrides(staff_id, overrides, &mut result.issues), false),
                Err(err) => {
                    warn!(staff_id = %staff_id, error = %err, "Override fetch failed, using base cycle");
                    result.issues.push(RosterIssue::for_staff(
                        staff_id,
                        IssueKind::OverrideFetchFailed,
                        err.to_string(),
                    ));
                    (StaffOverrides::default(), true)
                }
            };
            let staff_holidays = if degraded { &[][..] } else { holidays };

            match build_staff_roster(
                staff_id,
                month,
                config,
                defaults,
                &overrides,
                staff_holidays,
            ) {
                Ok(build) => {
                    if let Some(config) = build.defaulted_config {
                        result.issues.push(RosterIssue::for_staff(
                            staff_id,
                            IssueKind::ConfigMissing,
                            format!(
                                "no schedule configuration; default cycle anchored on {}",
                                config.cycle_anchor
                            ),
                        ));
                        result.defaulted_configs.push(DefaultedConfig {
                            staff_id: staff_id.to_string(),
                            config,
                        });
                    }
                    let mut roster = build.roster;
                    roster.degraded = degraded;
                    result.rosters.push(roster);
                }
                Err(err) => {
                    warn!(staff_id = %staff_id, error = %err, "Roster computation failed");
                    result.issues.push(RosterIssue::for_staff(
                        staff_id,
                        IssueKind::DegenerateCycleConfig,
                        err.to_string(),
                    ));
                }
            }
        }

        let coverage = audit_coverage(month, &result.rosters);
        result.daily_coverage = coverage.daily_coverage;
        result.conflict_days = coverage.conflict_days;

        info!(
            month = %month,
            staff_count = self.staff.len(),
            rostered = result.rosters.len(),
            conflict_days = result.conflict_days.len(),
            issues = result.issues.len(),
            duration_us = start_time.elapsed().as_micros() as u64,
            "Month roster computed"
        );

        result
    }
}

fn valid_overrides(
    staff_id: &str,
    overrides: &StaffOverrides,
    issues: &mut Vec<RosterIssue>,
) -> StaffOverrides {
    let mut leave_intervals = Vec::with_capacity(overrides.leave_intervals.len());
    for leave in &overrides.leave_intervals {
        match leave.validate(staff_id) {
            Ok(()) => leave_intervals.push(leave.clone()),
            Err(err) => {
                warn!(staff_id = %staff_id, error = %err, "Ignoring leave interval");
                issues.push(RosterIssue::for_staff(
                    staff_id,
                    IssueKind::InvalidLeaveInterval,
                    err.to_string(),
                ));
            }
        }
    }
    StaffOverrides {
        custom_overrides: overrides.custom_overrides.clone(),
        leave_intervals,
    }
}

/// Computes rosters and coverage for `staff` in `month` using the standard
/// onboarding defaults for staff without a configuration.
///
/// Repeated calls with unchanged source data return identical results.
///
/// # Example
///
/// ```
/// use roster_engine::models::{DutyCode, RosterMonth};
/// use roster_engine::orchestrator::{InMemorySource, compute_month_roster};
///
/// let month = RosterMonth::new(2026, 6).unwrap();
/// let staff = vec!["dr_001".to_string()];
/// let result = compute_month_roster(&InMemorySource::new(), &staff, month);
///
/// assert_eq!(result.code("dr_001", 1), Some(DutyCode::WholeDay));
/// assert_eq!(result.conflict_days, vec![6, 7, 13, 14, 20, 21, 27, 28]);
/// assert_eq!(result.defaulted_configs.len(), 1);
/// ```
pub fn compute_month_roster<S: RosterSource + ?Sized>(
    source: &S,
    staff: &[String],
    month: RosterMonth,
) -> MonthRoster {
    compute_month_roster_with(source, staff, month, &ScheduleDefaults::default())
}

/// Like [`compute_month_roster`], with explicit defaults for staff without a
/// configuration.
pub fn compute_month_roster_with<S: RosterSource + ?Sized>(
    source: &S,
    staff: &[String],
    month: RosterMonth,
    defaults: &ScheduleDefaults,
) -> MonthRoster {
    MonthInputs::fetch(source, staff, month).compute(defaults)
}

/// The outcome of [`MonthOrchestrator::refresh`].
#[derive(Debug, Clone, Copy)]
pub struct Refresh<'a> {
    /// The currently published result.
    pub roster: &'a MonthRoster,
    /// True if the inputs changed and the result was recomputed.
    pub recomputed: bool,
}

/// Owns the visible staff set and month, and republishes rosters when any
/// input changes.
///
/// # Example
///
/// ```
/// use roster_engine::models::RosterMonth;
/// use roster_engine::orchestrator::{InMemorySource, MonthOrchestrator};
///
/// let source = InMemorySource::new();
/// let month = RosterMonth::new(2026, 6).unwrap();
/// let mut orchestrator = MonthOrchestrator::new(month, vec!["dr_001".to_string()]);
///
/// assert!(orchestrator.refresh(&source).recomputed);
/// assert!(!orchestrator.refresh(&source).recomputed);
/// ```
#[derive(Debug, Clone)]
pub struct MonthOrchestrator {
    month: RosterMonth,
    staff: Vec<String>,
    defaults: ScheduleDefaults,
    last_inputs: Option<MonthInputs>,
    published: Option<MonthRoster>,
}

impl MonthOrchestrator {
    /// Creates an orchestrator for `month` showing `staff`.
    pub fn new(month: RosterMonth, staff: Vec<String>) -> Self {
        Self {
            month,
            staff,
            defaults: ScheduleDefaults::default(),
            last_inputs: None,
            published: None,
        }
    }

    /// Uses `defaults` for staff without a configuration.
    pub fn with_defaults(mut self, defaults: ScheduleDefaults) -> Self {
        self.set_defaults(defaults);
        self
    }

    /// Returns the active month.
    pub fn month(&self) -> RosterMonth {
        self.month
    }

    /// Returns the visible staff set.
    pub fn staff(&self) -> &[String] {
        &self.staff
    }

    /// Returns the last published result, if any.
    pub fn published(&self) -> Option<&MonthRoster> {
        self.published.as_ref()
    }

    /// Switches the active month.
    pub fn set_month(&mut self, month: RosterMonth) {
        self.month = month;
    }

    /// Replaces the visible staff set.
    pub fn set_staff(&mut self, staff: Vec<String>) {
        self.staff = staff;
    }

    /// Replaces the defaults and forces the next refresh to recompute.
    pub fn set_defaults(&mut self, defaults: ScheduleDefaults) {
        if self.defaults != defaults {
            self.defaults = defaults;
            self.last_inputs = None;
        }
    }

    /// Replaces the visible staff set with the staff matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the staff directory cannot be read; the
    /// current staff set is left unchanged.
    pub fn load_visible_staff<S: RosterSource + ?Sized>(
        &mut self,
        source: &S,
        filter: &StaffFilter,
    ) -> EngineResult<()> {
        self.staff = source.visible_staff(filter)?;
        Ok(())
    }

    /// Fetches a fresh input snapshot and recomputes if it differs from the
    /// one behind the published result.
    pub fn refresh<S: RosterSource + ?Sized>(&mut self, source: &S) -> Refresh<'_> {
        let inputs = MonthInputs::fetch(source, &self.staff, self.month);

        if self.published.is_none() || self.last_inputs.as_ref() != Some(&inputs) {
            let roster = inputs.compute(&self.defaults);
            self.last_inputs = Some(inputs);
            return Refresh {
                roster: self.published.insert(roster),
                recomputed: true,
            };
        }

        debug!(month = %self.month, "Roster inputs unchanged, keeping published result");
        let month = self.month;
        Refresh {
            roster: self
                .published
                .get_or_insert_with(|| MonthRoster::empty(month)),
            recomputed: false,
        }
    }
}
