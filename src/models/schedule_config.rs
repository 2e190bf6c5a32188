//! Staff schedule configuration.
//!
//! This module defines the per-staff cycle parameters consumed by the cycle
//! calculator, along with the facility defaults used when a staff member has
//! no configuration yet.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How a staff member's active days are divided into shift slots.
///
/// Deserializes from either its snake_case name or the numeric encoding
/// used by bulk import files (`1` whole day, `2` two shifts, `3` three
/// shifts; stored records also use `0` for whole day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "RawShiftPattern")]
pub enum ShiftPattern {
    /// Every active day is a whole-day duty.
    WholeDay,
    /// Active days alternate between morning and night blocks.
    TwoShift,
    /// Active days cycle through morning, afternoon and night blocks.
    ThreeShift,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawShiftPattern {
    Number(u32),
    Name(String),
}

impl TryFrom<RawShiftPattern> for ShiftPattern {
    type Error = String;

    fn try_from(raw: RawShiftPattern) -> Result<Self, Self::Error> {
        match raw {
            RawShiftPattern::Number(value) => {
                ShiftPattern::try_from(value).map_err(|e| e.to_string())
            }
            RawShiftPattern::Name(name) => match name.as_str() {
                "whole_day" => Ok(ShiftPattern::WholeDay),
                "two_shift" => Ok(ShiftPattern::TwoShift),
                "three_shift" => Ok(ShiftPattern::ThreeShift),
                other => Err(format!("unknown shift pattern '{other}'")),
            },
        }
    }
}

impl TryFrom<u32> for ShiftPattern {
    type Error = EngineError;

    fn try_from(value: u32) -> EngineResult<Self> {
        match value {
            0 | 1 => Ok(ShiftPattern::WholeDay),
            2 => Ok(ShiftPattern::TwoShift),
            3 => Ok(ShiftPattern::ThreeShift),
            _ => Err(EngineError::InvalidShiftPattern { value }),
        }
    }
}

impl fmt::Display for ShiftPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftPattern::WholeDay => write!(f, "whole_day"),
            ShiftPattern::TwoShift => write!(f, "two_shift"),
            ShiftPattern::ThreeShift => write!(f, "three_shift"),
        }
    }
}

/// A staff member's repeating active/off cycle.
///
/// The cycle length is `active_days + off_days`. Shift slots change every
/// `rotation_frequency` active days, counted from `cycle_anchor`.
///
/// # Example
///
/// ```
/// use roster_engine::models::{ShiftPattern, StaffScheduleConfig};
/// use chrono::NaiveDate;
///
/// let config = StaffScheduleConfig {
///     active_days: 4,
///     off_days: 3,
///     shift_pattern: ShiftPattern::TwoShift,
///     rotation_frequency: 4,
///     cycle_anchor: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
/// };
/// assert_eq!(config.cycle_length(), 7);
/// assert!(config.validate("dr_001").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffScheduleConfig {
    /// Number of working days at the start of each cycle.
    pub active_days: u32,
    /// Number of off days closing each cycle.
    pub off_days: u32,
    /// How active days are split into shift slots.
    #[serde(alias = "shift_type")]
    pub shift_pattern: ShiftPattern,
    /// Active days worked before the shift slot changes.
    pub rotation_frequency: u32,
    /// The date the cycle begins.
    pub cycle_anchor: NaiveDate,
}

impl StaffScheduleConfig {
    /// Returns the number of days in one active/off cycle.
    pub fn cycle_length(&self) -> u32 {
        self.active_days.saturating_add(self.off_days)
    }

    /// Rejects configurations that cannot drive the cycle calculator.
    ///
    /// A zero-length cycle or a zero rotation frequency would otherwise
    /// divide by zero.
    pub fn validate(&self, staff_id: &str) -> EngineResult<()> {
        if self.cycle_length() == 0 {
            return Err(EngineError::DegenerateCycleConfig {
                staff_id: staff_id.to_string(),
                message: "active days plus off days must be greater than zero".to_string(),
            });
        }
        if self.rotation_frequency == 0 {
            return Err(EngineError::DegenerateCycleConfig {
                staff_id: staff_id.to_string(),
                message: "rotation frequency must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Cycle parameters applied when a staff member has no configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleDefaults {
    /// Default number of active days.
    pub active_days: u32,
    /// Default number of off days.
    pub off_days: u32,
    /// Default shift pattern.
    pub shift_pattern: ShiftPattern,
    /// Default rotation frequency.
    pub rotation_frequency: u32,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            active_days: 5,
            off_days: 2,
            shift_pattern: ShiftPattern::WholeDay,
            rotation_frequency: 5,
        }
    }
}

impl ScheduleDefaults {
    /// Builds a full configuration whose cycle begins on `anchor`.
    pub fn anchored_at(&self, anchor: NaiveDate) -> StaffScheduleConfig {
        StaffScheduleConfig {
            active_days: self.active_days,
            off_days: self.off_days,
            shift_pattern: self.shift_pattern,
            rotation_frequency: self.rotation_frequency,
            cycle_anchor: anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(active_days: u32, off_days: u32, rotation_frequency: u32) -> StaffScheduleConfig {
        StaffScheduleConfig {
            active_days,
            off_days,
            shift_pattern: ShiftPattern::WholeDay,
            rotation_frequency,
            cycle_anchor: date(2026, 1, 1),
        }
    }

    #[test]
    fn test_validate_rejects_zero_cycle_length() {
        match config(0, 0, 5).validate("dr_001") {
            Err(EngineError::DegenerateCycleConfig { staff_id, message }) => {
                assert_eq!(staff_id, "dr_001");
                assert!(message.contains("off days"));
            }
            other => panic!("Expected DegenerateCycleConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_rotation_frequency() {
        match config(5, 2, 0).validate("dr_001") {
            Err(EngineError::DegenerateCycleConfig { message, .. }) => {
                assert!(message.contains("rotation frequency"));
            }
            other => panic!("Expected DegenerateCycleConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_all_off_cycle() {
        assert!(config(0, 3, 1).validate("dr_001").is_ok());
    }

    #[test]
    fn test_defaults_match_onboarding_values() {
        let defaults = ScheduleDefaults::default();
        let anchored = defaults.anchored_at(date(2026, 10, 1));
        assert_eq!(anchored.active_days, 5);
        assert_eq!(anchored.off_days, 2);
        assert_eq!(anchored.shift_pattern, ShiftPattern::WholeDay);
        assert_eq!(anchored.rotation_frequency, 5);
        assert_eq!(anchored.cycle_anchor, date(2026, 10, 1));
    }

    #[test]
    fn test_shift_pattern_from_legacy_numbers() {
        assert_eq!(ShiftPattern::try_from(0).unwrap(), ShiftPattern::WholeDay);
        assert_eq!(ShiftPattern::try_from(1).unwrap(), ShiftPattern::WholeDay);
        assert_eq!(ShiftPattern::try_from(2).unwrap(), ShiftPattern::TwoShift);
        assert_eq!(ShiftPattern::try_from(3).unwrap(), ShiftPattern::ThreeShift);
        assert!(matches!(
            ShiftPattern::try_from(4),
            Err(EngineError::InvalidShiftPattern { value: 4 })
        ));
    }

    #[test]
    fn test_deserialize_config_with_numeric_shift_type() {
        let json = r#"{
            "active_days": 4,
            "off_days": 4,
            "shift_type": 3,
            "rotation_frequency": 2,
            "cycle_anchor": "2026-02-01"
        }"#;

        let config: StaffScheduleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shift_pattern, ShiftPattern::ThreeShift);
        assert_eq!(config.cycle_length(), 8);
        assert_eq!(config.cycle_anchor, date(2026, 2, 1));
    }

    #[test]
    fn test_deserialize_config_with_named_shift_pattern() {
        let json = r#"{
            "active_days": 5,
            "off_days": 2,
            "shift_pattern": "two_shift",
            "rotation_frequency": 5,
            "cycle_anchor": "2026-02-01"
        }"#;

        let config: StaffScheduleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.shift_pattern, ShiftPattern::TwoShift);
    }

    #[test]
    fn test_deserialize_rejects_unknown_shift_pattern() {
        let json = r#"{
            "active_days": 5,
            "off_days": 2,
            "shift_pattern": 7,
            "rotation_frequency": 5,
            "cycle_anchor": "2026-02-01"
        }"#;

        assert!(serde_json::from_str::<StaffScheduleConfig>(json).is_err());
    }

    #[test]
    fn test_serialize_shift_pattern_as_name() {
        assert_eq!(
            serde_json::to_string(&ShiftPattern::ThreeShift).unwrap(),
            "\"three_shift\""
        );
    }
}
