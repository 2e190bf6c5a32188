//! Coverage auditing.
//!
//! Counts on-duty staff per day across every roster of a month and flags
//! the days nobody covers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{RosterMonth, StaffRoster};

/// The coverage audit for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    /// On-duty headcount for every day of the month, zeros included.
    pub daily_coverage: BTreeMap<u32, usize>,
    /// Ascending day numbers whose headcount is zero.
    pub conflict_days: Vec<u32>,
}

/// Audits coverage for `month` across `rosters`.
///
/// A staff member counts towards a day only when their code for that day is
/// on duty (whole day, morning, afternoon or night). Staff without a roster
/// contribute nothing.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::audit_coverage;
/// use roster_engine::models::{CodeSource, DutyCode, RosterDay, RosterMonth, StaffRoster};
///
/// let month = RosterMonth::new(2026, 2).unwrap();
/// let mut roster = StaffRoster::new("dr_001");
/// for day in 1..=28 {
///     let code = if day == 6 { DutyCode::Off } else { DutyCode::WholeDay };
///     roster.push(RosterDay { day, code, source: CodeSource::Cycle });
/// }
///
/// let report = audit_coverage(month, &[roster]);
/// assert_eq!(report.conflict_days, vec![6]);
/// assert_eq!(report.daily_coverage[&1], 1);
/// ```
pub fn audit_coverage(month: RosterMonth, rosters: &[StaffRoster]) -> CoverageReport {
    let mut daily_coverage: BTreeMap<u32, usize> =
        (1..=month.days_in_month()).map(|day| (day, 0)).collect();

    for roster in rosters {
        for (day, code) in &roster.days {
            if !code.is_on_duty() {
                continue;
            }
            if let Some(count) = daily_coverage.get_mut(day) {
                *count += 1;
            }
        }
    }

    let conflict_days = daily_coverage
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(day, _)| *day)
        .collect();

    CoverageReport {
        daily_coverage,
        conflict_days,
    }
}

/// Returns the ascending day numbers of `month` on which nobody is on duty.
pub fn find_conflict_days(month: RosterMonth, rosters: &[StaffRoster]) -> Vec<u32> {
    audit_coverage(month, rosters).conflict_days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeSource, DutyCode, RosterDay};
    use proptest::prelude::*;

    fn month() -> RosterMonth {
        RosterMonth::new(2026, 4).unwrap()
    }

    fn roster_from(staff_id: &str, codes: &[DutyCode]) -> StaffRoster {
        let mut roster = StaffRoster::new(staff_id);
        for (index, code) in codes.iter().enumerate() {
            roster.push(RosterDay {
                day: index as u32 + 1,
                code: *code,
                source: CodeSource::Cycle,
            });
        }
        roster
    }

    fn uniform(staff_id: &str, code: DutyCode) -> StaffRoster {
        roster_from(staff_id, &[code; 30])
    }

    #[test]
    fn test_no_rosters_means_every_day_conflicts() {
        let report = audit_coverage(month(), &[]);
        assert_eq!(report.conflict_days, (1..=30).collect::<Vec<_>>());
        assert!(report.daily_coverage.values().all(|count| *count == 0));
    }

    #[test]
    fn test_single_staff_off_day_is_a_conflict() {
        let mut codes = [DutyCode::WholeDay; 30];
        codes[5] = DutyCode::Off;
        let report = audit_coverage(month(), &[roster_from("dr_001", &codes)]);
        assert_eq!(report.conflict_days, vec![6]);
    }

    #[test]
    fn test_excluded_codes_do_not_cover() {
        for code in [
            DutyCode::Off,
            DutyCode::Holiday,
            DutyCode::Leave,
            DutyCode::NotAvailable,
        ] {
            let report = audit_coverage(month(), &[uniform("dr_001", code)]);
            assert_eq!(report.conflict_days.len(), 30, "code {}", code);
        }
    }

    #[test]
    fn test_any_on_duty_code_covers() {
        for code in [
            DutyCode::WholeDay,
            DutyCode::Morning,
            DutyCode::Afternoon,
            DutyCode::Night,
        ] {
            let report = audit_coverage(month(), &[uniform("dr_001", code)]);
            assert!(report.conflict_days.is_empty(), "code {}", code);
        }
    }

    #[test]
    fn test_headcount_sums_across_staff() {
        let mut first = [DutyCode::Morning; 30];
        first[9] = DutyCode::Leave;
        let second = [DutyCode::Night; 30];

        let report = audit_coverage(
            month(),
            &[roster_from("dr_001", &first), roster_from("dr_002", &second)],
        );
        assert_eq!(report.daily_coverage[&1], 2);
        assert_eq!(report.daily_coverage[&10], 1);
        assert!(report.conflict_days.is_empty());
    }

    #[test]
    fn test_find_conflict_days_matches_report() {
        let mut codes = [DutyCode::Off; 30];
        codes[0] = DutyCode::WholeDay;
        let rosters = [roster_from("dr_001", &codes)];
        assert_eq!(
            find_conflict_days(month(), &rosters),
            audit_coverage(month(), &rosters).conflict_days
        );
    }

    fn code_strategy() -> impl Strategy<Value = DutyCode> {
        prop::sample::select(DutyCode::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_conflict_days_are_exactly_the_uncovered_days(
            staff in prop::collection::vec(prop::collection::vec(code_strategy(), 30), 0..6),
        ) {
            let rosters: Vec<StaffRoster> = staff
                .iter()
                .enumerate()
                .map(|(i, codes)| roster_from(&format!("dr_{i:03}"), codes))
                .collect();
            let report = audit_coverage(month(), &rosters);

            let mut previous = 0;
            for day in &report.conflict_days {
                prop_assert!(*day > previous, "conflict days must be ascending and unique");
                previous = *day;
            }

            for day in 1..=30u32 {
                let covered = staff.iter().any(|codes| codes[(day - 1) as usize].is_on_duty());
                prop_assert_eq!(report.conflict_days.contains(&day), !covered);
            }
        }
    }
}
