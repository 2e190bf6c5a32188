//! Request types for the roster engine API.
//!
//! This module defines the JSON request structures for the `/roster` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    CustomShiftOverride, Holiday, LeaveInterval, RosterMonth, ScheduleDefaults, StaffMember,
    StaffScheduleConfig,
};
use crate::orchestrator::InMemorySource;

/// Request body for the `/roster` endpoint.
///
/// The request carries every input for one month, so the server keeps no
/// per-staff state between calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRequest {
    /// The month to compute, as `YYYY-MM`.
    pub month: String,
    /// The visible staff, in display order.
    pub staff: Vec<StaffRequest>,
    /// Facility holidays. The configured calendar is used when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Vec<Holiday>>,
    /// Defaults for staff without a schedule. The configured defaults are
    /// used when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schedule: Option<ScheduleDefaults>,
}

/// One staff member's inputs in a roster request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRequest {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// The staff member's cycle configuration, if one exists.
    #[serde(default)]
    pub schedule: Option<StaffScheduleConfig>,
    /// Manual per-date codes.
    #[serde(default)]
    pub custom_overrides: Vec<CustomShiftOverride>,
    /// Leave intervals.
    #[serde(default)]
    pub leave_intervals: Vec<LeaveInterval>,
}

impl RosterRequest {
    /// Parses the requested month.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` if `month` is not a valid `YYYY-MM` value.
    pub fn roster_month(&self) -> EngineResult<RosterMonth> {
        self.month.parse()
    }

    /// Returns the staff ids in request order.
    pub fn staff_ids(&self) -> Vec<String> {
        self.staff.iter().map(|staff| staff.id.clone()).collect()
    }

    /// Builds an in-memory source holding the request's records.
    ///
    /// `fallback_holidays` are used when the request lists none.
    pub fn into_source(self, fallback_holidays: &[Holiday]) -> InMemorySource {
        let mut source = InMemorySource::new();
        source.set_holidays(
            self.holidays
                .unwrap_or_else(|| fallback_holidays.to_vec()),
        );

        for staff in self.staff {
            source.add_staff(StaffMember {
                display_name: staff.display_name.unwrap_or_else(|| staff.id.clone()),
                id: staff.id.clone(),
                department_id: None,
                department_name: None,
            });
            if let Some(schedule) = staff.schedule {
                source.set_config(&staff.id, schedule);
            }
            for custom in staff.custom_overrides {
                source.add_custom_override(&staff.id, custom);
            }
            for leave in staff.leave_intervals {
                source.add_leave(&staff.id, leave);
            }
        }

        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{DutyCode, StaffFilter};
    use crate::orchestrator::RosterSource;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn test_minimal_request_deserializes() {
        let json = r#"{"month": "2026-04", "staff": [{"id": "dr_001"}]}"#;
        let request: RosterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.roster_month().unwrap(), RosterMonth::new(2026, 4).unwrap());
        assert_eq!(request.staff_ids(), vec!["dr_001"]);
        assert!(request.staff[0].schedule.is_none());
        assert!(request.holidays.is_none());
    }

    #[test]
    fn test_legacy_schedule_fields_accepted() {
        let json = r#"{
            "month": "2026-04",
            "staff": [{
                "id": "dr_001",
                "schedule": {
                    "active_days": 4,
                    "off_days": 2,
                    "shift_type": 2,
                    "rotation_frequency": 2,
                    "cycle_anchor": "2026-03-30"
                },
                "custom_overrides": [{"date": "2026-04-03", "code": "NS"}]
            }]
        }"#;
        let request: RosterRequest = serde_json::from_str(json).unwrap();
        let staff = &request.staff[0];
        assert_eq!(staff.schedule.as_ref().unwrap().active_days, 4);
        assert_eq!(staff.custom_overrides[0].code, DutyCode::Night);
    }

    #[test]
    fn test_invalid_month_rejected() {
        let request = RosterRequest {
            month: "2026-13".to_string(),
            staff: vec![],
            holidays: None,
            default_schedule: None,
        };
        assert_eq!(
            request.roster_month(),
            Err(EngineError::InvalidMonth {
                year: 2026,
                month: 13
            })
        );
    }

    #[test]
    fn test_into_source_uses_fallback_holidays_only_when_omitted() {
        let fallback = vec![Holiday {
            date: date(4, 10),
            name: "Configured".to_string(),
        }];

        let omitted: RosterRequest =
            serde_json::from_str(r#"{"month": "2026-04", "staff": []}"#).unwrap();
        let source = omitted.into_source(&fallback);
        assert_eq!(source.holidays(date(4, 1), date(4, 30)).unwrap(), fallback);

        let explicit: RosterRequest =
            serde_json::from_str(r#"{"month": "2026-04", "staff": [], "holidays": []}"#).unwrap();
        let source = explicit.into_source(&fallback);
        assert!(source.holidays(date(4, 1), date(4, 30)).unwrap().is_empty());
    }

    #[test]
    fn test_into_source_carries_staff_records() {
        let json = r#"{
            "month": "2026-04",
            "staff": [
                {"id": "dr_002", "leave_intervals": [{"start_date": "2026-04-01", "end_date": "2026-04-03"}]},
                {"id": "dr_001", "display_name": "Amara Okafor"}
            ]
        }"#;
        let request: RosterRequest = serde_json::from_str(json).unwrap();
        let source = request.into_source(&[]);

        assert_eq!(
            source.visible_staff(&StaffFilter::default()).unwrap(),
            vec!["dr_002", "dr_001"]
        );
        assert_eq!(
            source
                .leave_intervals("dr_002", date(4, 1), date(4, 30))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(source.schedule_config("dr_001").unwrap(), None);
    }
}
