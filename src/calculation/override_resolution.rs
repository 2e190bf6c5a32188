//! Override resolution.
//!
//! Merges the three manual override layers onto a base cycle code. The
//! precedence, highest first, is: custom shift, leave, holiday, base cycle.
//! A day before the cycle anchor stays [`DutyCode::NotAvailable`] unless a
//! custom shift is set on it.

use crate::models::{CodeSource, DutyCode};

/// The overrides that apply to a single staff member on a single date.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{resolve_duty_code, DayOverrides};
/// use roster_engine::models::{CodeSource, DutyCode};
///
/// let overrides = DayOverrides {
///     custom: None,
///     on_leave: true,
///     holiday: true,
/// };
/// let resolved = resolve_duty_code(DutyCode::WholeDay, &overrides);
/// assert_eq!(resolved.code, DutyCode::Leave);
/// assert_eq!(resolved.source, CodeSource::Leave);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayOverrides {
    /// A manually chosen code for the date.
    pub custom: Option<DutyCode>,
    /// True if a leave interval covers the date.
    pub on_leave: bool,
    /// True if the date is a facility holiday.
    pub holiday: bool,
}

/// A final duty code together with the layer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCode {
    /// The final duty code.
    pub code: DutyCode,
    /// The layer that produced `code`.
    pub source: CodeSource,
}

/// Applies the override layers to `base` in precedence order.
pub fn resolve_duty_code(base: DutyCode, overrides: &DayOverrides) -> ResolvedCode {
    if let Some(code) = overrides.custom {
        return ResolvedCode {
            code,
            source: CodeSource::CustomOverride,
        };
    }

    let from_cycle = ResolvedCode {
        code: base,
        source: CodeSource::Cycle,
    };

    match base {
        // A schedule that has not started cannot be on leave or on holiday.
        DutyCode::NotAvailable => from_cycle,
        DutyCode::WholeDay
        | DutyCode::Morning
        | DutyCode::Afternoon
        | DutyCode::Night
        | DutyCode::Off
        | DutyCode::Holiday
        | DutyCode::Leave => {
            if overrides.on_leave {
                ResolvedCode {
                    code: DutyCode::Leave,
                    source: CodeSource::Leave,
                }
            } else if overrides.holiday {
                ResolvedCode {
                    code: DutyCode::Holiday,
                    source: CodeSource::Holiday,
                }
            } else {
                from_cycle
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(custom: Option<DutyCode>, on_leave: bool, holiday: bool) -> DayOverrides {
        DayOverrides {
            custom,
            on_leave,
            holiday,
        }
    }

    #[test]
    fn test_no_overrides_keeps_base_code() {
        let resolved = resolve_duty_code(DutyCode::Afternoon, &DayOverrides::default());
        assert_eq!(resolved.code, DutyCode::Afternoon);
        assert_eq!(resolved.source, CodeSource::Cycle);
    }

    #[test]
    fn test_custom_override_beats_everything() {
        for base in DutyCode::ALL {
            let resolved =
                resolve_duty_code(base, &overrides(Some(DutyCode::Night), true, true));
            assert_eq!(resolved.code, DutyCode::Night, "base {}", base);
            assert_eq!(resolved.source, CodeSource::CustomOverride);
        }
    }

    #[test]
    fn test_custom_override_replaces_off_day() {
        let resolved =
            resolve_duty_code(DutyCode::Off, &overrides(Some(DutyCode::Night), false, false));
        assert_eq!(resolved.code, DutyCode::Night);
    }

    #[test]
    fn test_leave_beats_holiday() {
        let resolved = resolve_duty_code(DutyCode::WholeDay, &overrides(None, true, true));
        assert_eq!(resolved.code, DutyCode::Leave);
        assert_eq!(resolved.source, CodeSource::Leave);
    }

    #[test]
    fn test_holiday_replaces_working_and_off_days() {
        for base in [DutyCode::Morning, DutyCode::Off] {
            let resolved = resolve_duty_code(base, &overrides(None, false, true));
            assert_eq!(resolved.code, DutyCode::Holiday);
            assert_eq!(resolved.source, CodeSource::Holiday);
        }
    }

    #[test]
    fn test_not_available_ignores_leave_and_holiday() {
        let resolved = resolve_duty_code(DutyCode::NotAvailable, &overrides(None, true, true));
        assert_eq!(resolved.code, DutyCode::NotAvailable);
        assert_eq!(resolved.source, CodeSource::Cycle);
    }

    #[test]
    fn test_custom_override_applies_before_anchor() {
        let resolved = resolve_duty_code(
            DutyCode::NotAvailable,
            &overrides(Some(DutyCode::WholeDay), false, true),
        );
        assert_eq!(resolved.code, DutyCode::WholeDay);
        assert_eq!(resolved.source, CodeSource::CustomOverride);
    }
}
