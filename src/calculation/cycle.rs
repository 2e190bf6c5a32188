//! Cycle calculation.
//!
//! This module maps a calendar date onto a staff member's repeating
//! active/off cycle and derives the base duty code for that date, before any
//! override is applied.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{DutyCode, ShiftPattern, StaffScheduleConfig};

/// Cycle parameters that have passed validation.
///
/// Holding a `CycleParams` guarantees a non-zero cycle length and rotation
/// frequency, so the calculation itself cannot fail.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{base_duty_code, CycleParams};
/// use roster_engine::models::{DutyCode, ShiftPattern, StaffScheduleConfig};
/// use chrono::NaiveDate;
///
/// let config = StaffScheduleConfig {
///     active_days: 5,
///     off_days: 2,
///     shift_pattern: ShiftPattern::WholeDay,
///     rotation_frequency: 5,
///     cycle_anchor: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
/// };
/// let params = CycleParams::new(&config, "dr_001").unwrap();
///
/// let day_6 = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
/// assert_eq!(base_duty_code(day_6, &params), DutyCode::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleParams {
    active_days: u32,
    cycle_length: NonZeroU32,
    rotation_frequency: NonZeroU32,
    shift_pattern: ShiftPattern,
    cycle_anchor: NaiveDate,
}

impl CycleParams {
    /// Validates `config` and captures its cycle parameters.
    ///
    /// Returns `DegenerateCycleConfig` when the cycle length or rotation
    /// frequency is zero.
    pub fn new(config: &StaffScheduleConfig, staff_id: &str) -> EngineResult<Self> {
        config.validate(staff_id)?;
        // validate() has already rejected both zero cases.
        let cycle_length = NonZeroU32::new(config.cycle_length()).unwrap_or(NonZeroU32::MIN);
        let rotation_frequency =
            NonZeroU32::new(config.rotation_frequency).unwrap_or(NonZeroU32::MIN);
        Ok(Self {
            active_days: config.active_days,
            cycle_length,
            rotation_frequency,
            shift_pattern: config.shift_pattern,
            cycle_anchor: config.cycle_anchor,
        })
    }

    /// Returns the date the cycle begins.
    pub fn cycle_anchor(&self) -> NaiveDate {
        self.cycle_anchor
    }
}

/// Where a date falls within a staff member's cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclePosition {
    /// Whole days elapsed since the cycle anchor.
    pub days_since_anchor: u64,
    /// Offset within the current cycle, in `0..cycle_length`.
    pub cycle_index: u32,
    /// Ordinal of this date among active days since the anchor, or `None`
    /// when the date is an off day.
    pub active_day_index: Option<u64>,
}

/// Locates `date` within the cycle.
///
/// Returns `None` for dates before the cycle anchor.
pub fn cycle_position(date: NaiveDate, params: &CycleParams) -> Option<CyclePosition> {
    let elapsed = date.signed_duration_since(params.cycle_anchor).num_days();
    let days_since_anchor = u64::try_from(elapsed).ok()?;

    let cycle_length = u64::from(params.cycle_length.get());
    let cycle_index = days_since_anchor % cycle_length;
    let active_days = u64::from(params.active_days);

    let active_day_index = if cycle_index >= active_days {
        None
    } else {
        let full_cycles = days_since_anchor / cycle_length;
        Some(full_cycles * active_days + cycle_index)
    };

    Some(CyclePosition {
        days_since_anchor,
        // cycle_index < cycle_length, which fits in u32.
        cycle_index: cycle_index as u32,
        active_day_index,
    })
}

/// Computes the base duty code for `date` from the cycle alone.
///
/// # Behavior
///
/// - Dates before the anchor are [`DutyCode::NotAvailable`]
/// - Dates in the off portion of the cycle are [`DutyCode::Off`]
/// - Active dates follow the shift pattern. Slots rotate every
///   `rotation_frequency` active days, so off days never advance the rotation:
///   - whole day: always [`DutyCode::WholeDay`]
///   - two shifts: [`DutyCode::Morning`] and [`DutyCode::Night`] blocks alternate
///   - three shifts: [`DutyCode::Morning`], [`DutyCode::Afternoon`], [`DutyCode::Night`] blocks
pub fn base_duty_code(date: NaiveDate, params: &CycleParams) -> DutyCode {
    let Some(position) = cycle_position(date, params) else {
        return DutyCode::NotAvailable;
    };
    let Some(active_day_index) = position.active_day_index else {
        return DutyCode::Off;
    };

    let block = active_day_index / u64::from(params.rotation_frequency.get());

    match params.shift_pattern {
        ShiftPattern::WholeDay => DutyCode::WholeDay,
        ShiftPattern::TwoShift => {
            if block % 2 == 0 {
                DutyCode::Morning
            } else {
                DutyCode::Night
            }
        }
        ShiftPattern::ThreeShift => match block % 3 {
            0 => DutyCode::Morning,
            1 => DutyCode::Afternoon,
            _ => DutyCode::Night,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use chrono::Duration;
    use proptest::prelude::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn params(
        active_days: u32,
        off_days: u32,
        shift_pattern: ShiftPattern,
        rotation_frequency: u32,
    ) -> CycleParams {
        let config = StaffScheduleConfig {
            active_days,
            off_days,
            shift_pattern,
            rotation_frequency,
            cycle_anchor: anchor(),
        };
        CycleParams::new(&config, "dr_001").unwrap()
    }

    fn codes_for(params: &CycleParams, days: u32) -> Vec<DutyCode> {
        (0..days)
            .map(|offset| base_duty_code(anchor() + Duration::days(offset as i64), params))
            .collect()
    }

    #[test]
    fn test_degenerate_config_is_rejected() {
        let config = StaffScheduleConfig {
            active_days: 0,
            off_days: 0,
            shift_pattern: ShiftPattern::WholeDay,
            rotation_frequency: 5,
            cycle_anchor: anchor(),
        };
        assert!(matches!(
            CycleParams::new(&config, "dr_001"),
            Err(EngineError::DegenerateCycleConfig { .. })
        ));
    }

    #[test]
    fn test_zero_rotation_frequency_is_rejected() {
        let config = StaffScheduleConfig {
            active_days: 5,
            off_days: 2,
            shift_pattern: ShiftPattern::TwoShift,
            rotation_frequency: 0,
            cycle_anchor: anchor(),
        };
        assert!(CycleParams::new(&config, "dr_001").is_err());
    }

    #[test]
    fn test_dates_before_anchor_are_not_available() {
        let p = params(5, 2, ShiftPattern::WholeDay, 5);
        let day_before = anchor() - Duration::days(1);
        assert_eq!(base_duty_code(day_before, &p), DutyCode::NotAvailable);
        assert!(cycle_position(day_before, &p).is_none());
    }

    #[test]
    fn test_whole_day_five_two_over_thirty_days() {
        let p = params(5, 2, ShiftPattern::WholeDay, 5);
        let codes = codes_for(&p, 30);

        for (offset, code) in codes.iter().enumerate() {
            let day = offset + 1;
            let expected = if (offset % 7) < 5 {
                DutyCode::WholeDay
            } else {
                DutyCode::Off
            };
            assert_eq!(*code, expected, "day {}", day);
        }
        assert_eq!(codes[5], DutyCode::Off); // day 6
        assert_eq!(codes[6], DutyCode::Off); // day 7
        assert_eq!(codes[7], DutyCode::WholeDay); // day 8
        assert_eq!(codes[29], DutyCode::WholeDay); // day 30
    }

    #[test]
    fn test_two_shift_rotation_skips_off_days() {
        // 5 on, 2 off, rotate every 5 active days: each working week flips.
        let p = params(5, 2, ShiftPattern::TwoShift, 5);
        let codes = codes_for(&p, 21);

        assert!(codes[0..5].iter().all(|c| *c == DutyCode::Morning));
        assert_eq!(&codes[5..7], &[DutyCode::Off, DutyCode::Off]);
        assert!(codes[7..12].iter().all(|c| *c == DutyCode::Night));
        assert_eq!(&codes[12..14], &[DutyCode::Off, DutyCode::Off]);
        assert!(codes[14..19].iter().all(|c| *c == DutyCode::Morning));
    }

    #[test]
    fn test_two_shift_rotation_inside_a_cycle() {
        // Rotation shorter than the active run switches mid-cycle.
        let p = params(4, 1, ShiftPattern::TwoShift, 3);
        let codes = codes_for(&p, 10);
        assert_eq!(
            codes,
            vec![
                DutyCode::Morning, // adi 0
                DutyCode::Morning, // adi 1
                DutyCode::Morning, // adi 2
                DutyCode::Night,   // adi 3
                DutyCode::Off,
                DutyCode::Night,   // adi 4
                DutyCode::Night,   // adi 5
                DutyCode::Morning, // adi 6
                DutyCode::Morning, // adi 7
                DutyCode::Off,
            ]
        );
    }

    #[test]
    fn test_three_shift_rotation() {
        let p = params(2, 1, ShiftPattern::ThreeShift, 2);
        let codes = codes_for(&p, 9);
        assert_eq!(
            codes,
            vec![
                DutyCode::Morning,
                DutyCode::Morning,
                DutyCode::Off,
                DutyCode::Afternoon,
                DutyCode::Afternoon,
                DutyCode::Off,
                DutyCode::Night,
                DutyCode::Night,
                DutyCode::Off,
            ]
        );
    }

    #[test]
    fn test_all_off_cycle_never_works() {
        let p = params(0, 3, ShiftPattern::WholeDay, 1);
        assert!(codes_for(&p, 9).iter().all(|c| *c == DutyCode::Off));
    }

    #[test]
    fn test_cycle_position_reports_active_day_index() {
        let p = params(5, 2, ShiftPattern::WholeDay, 5);
        let position = cycle_position(anchor() + Duration::days(8), &p).unwrap();
        assert_eq!(position.days_since_anchor, 8);
        assert_eq!(position.cycle_index, 1);
        assert_eq!(position.active_day_index, Some(6));

        let off = cycle_position(anchor() + Duration::days(13), &p).unwrap();
        assert_eq!(off.cycle_index, 6);
        assert_eq!(off.active_day_index, None);
    }

    fn pattern_strategy() -> impl Strategy<Value = ShiftPattern> {
        prop_oneof![
            Just(ShiftPattern::WholeDay),
            Just(ShiftPattern::TwoShift),
            Just(ShiftPattern::ThreeShift),
        ]
    }

    proptest! {
        #[test]
        fn prop_whole_day_pattern_repeats_with_cycle_length(
            active_days in 0u32..10,
            off_days in 0u32..10,
            rotation_frequency in 1u32..10,
            offset in 0i64..2000,
        ) {
            prop_assume!(active_days + off_days > 0);
            let p = params(active_days, off_days, ShiftPattern::WholeDay, rotation_frequency);
            let date = anchor() + Duration::days(offset);
            let code = base_duty_code(date, &p);

            let cycle_index = (offset as u64) % u64::from(active_days + off_days);
            let expected = if cycle_index < u64::from(active_days) {
                DutyCode::WholeDay
            } else {
                DutyCode::Off
            };
            prop_assert_eq!(code, expected);

            let next_cycle = date + Duration::days(i64::from(active_days + off_days));
            prop_assert_eq!(base_duty_code(next_cycle, &p), code);
        }

        #[test]
        fn prop_before_anchor_is_always_not_available(
            active_days in 0u32..10,
            off_days in 1u32..10,
            rotation_frequency in 1u32..10,
            pattern in pattern_strategy(),
            days_before in 1i64..2000,
        ) {
            let p = params(active_days, off_days, pattern, rotation_frequency);
            let date = anchor() - Duration::days(days_before);
            prop_assert_eq!(base_duty_code(date, &p), DutyCode::NotAvailable);
        }

        #[test]
        fn prop_two_shift_slot_follows_active_day_index(
            active_days in 1u32..10,
            off_days in 0u32..10,
            offset in 0i64..2000,
        ) {
            let p = params(active_days, off_days, ShiftPattern::TwoShift, 5);
            let date = anchor() + Duration::days(offset);
            let position = cycle_position(date, &p).unwrap();
            let code = base_duty_code(date, &p);

            match position.active_day_index {
                None => prop_assert_eq!(code, DutyCode::Off),
                Some(index) if (index / 5) % 2 == 0 => prop_assert_eq!(code, DutyCode::Morning),
                Some(_) => prop_assert_eq!(code, DutyCode::Night),
            }
        }
    }
}
