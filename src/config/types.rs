//! Configuration types for the facility.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{DutyCode, Holiday, RosterMonth, ScheduleDefaults};

/// Metadata about the facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityMetadata {
    /// Short facility code (e.g., "GEN-01").
    pub code: String,
    /// The human-readable name of the facility.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// The clock times a shift runs between.
///
/// A window whose end is not after its start runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Shift start time.
    #[serde(with = "hh_mm")]
    pub start: NaiveTime,
    /// Shift end time.
    #[serde(with = "hh_mm")]
    pub end: NaiveTime,
}

impl ShiftWindow {
    fn at(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }

    /// Returns true if the shift ends on the following day.
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// Returns the shift length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        let minutes = (self.end - self.start).num_minutes();
        if self.crosses_midnight() {
            minutes + 24 * 60
        } else {
            minutes
        }
    }
}

/// Facility shift windows. These are informational and never affect codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimings {
    /// Morning shift window.
    pub morning: ShiftWindow,
    /// Afternoon shift window.
    pub afternoon: ShiftWindow,
    /// Night shift window.
    pub night: ShiftWindow,
}

impl Default for ShiftTimings {
    fn default() -> Self {
        Self {
            morning: ShiftWindow::at(8, 14),
            afternoon: ShiftWindow::at(14, 20),
            night: ShiftWindow::at(20, 8),
        }
    }
}

impl ShiftTimings {
    /// Returns the window for a shift code, or `None` for codes without one.
    pub fn window(&self, code: DutyCode) -> Option<&ShiftWindow> {
        match code {
            DutyCode::Morning => Some(&self.morning),
            DutyCode::Afternoon => Some(&self.afternoon),
            DutyCode::Night => Some(&self.night),
            DutyCode::WholeDay
            | DutyCode::Off
            | DutyCode::Holiday
            | DutyCode::Leave
            | DutyCode::NotAvailable => None,
        }
    }
}

/// Structure of `facility.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilityFile {
    /// Facility metadata.
    pub facility: FacilityMetadata,
    /// Shift windows; the standard windows apply when omitted.
    #[serde(default)]
    pub shift_timings: ShiftTimings,
    /// Cycle parameters for staff without a configuration.
    #[serde(default)]
    pub default_schedule: ScheduleDefaults,
}

/// Structure of a holiday calendar file under `holidays/`.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayCalendar {
    /// The holidays listed in the file.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete facility configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct FacilityConfig {
    metadata: FacilityMetadata,
    shift_timings: ShiftTimings,
    default_schedule: ScheduleDefaults,
    /// Sorted by date, one entry per date.
    holidays: Vec<Holiday>,
}

impl FacilityConfig {
    /// Creates a configuration from its parts.
    ///
    /// Holidays are sorted by date. When several share a date, the first
    /// one listed is kept.
    pub fn new(
        metadata: FacilityMetadata,
        shift_timings: ShiftTimings,
        default_schedule: ScheduleDefaults,
        holidays: Vec<Holiday>,
    ) -> Self {
        let mut holidays = holidays;
        holidays.sort_by_key(|holiday| holiday.date);
        holidays.dedup_by_key(|holiday| holiday.date);
        Self {
            metadata,
            shift_timings,
            default_schedule,
            holidays,
        }
    }

    /// Returns the facility metadata.
    pub fn facility(&self) -> &FacilityMetadata {
        &self.metadata
    }

    /// Returns the shift windows.
    pub fn shift_timings(&self) -> &ShiftTimings {
        &self.shift_timings
    }

    /// Returns the default schedule.
    pub fn default_schedule(&self) -> &ScheduleDefaults {
        &self.default_schedule
    }

    /// Returns every configured holiday, sorted by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns the holidays dated within `[start, end]`.
    pub fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> &[Holiday] {
        let from = self.holidays.partition_point(|holiday| holiday.date < start);
        let to = self.holidays.partition_point(|holiday| holiday.date <= end);
        &self.holidays[from..to.max(from)]
    }

    /// Returns the holidays falling in `month`.
    pub fn holidays_in(&self, month: RosterMonth) -> &[Holiday] {
        self.holidays_between(month.first_day(), month.last_day())
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
