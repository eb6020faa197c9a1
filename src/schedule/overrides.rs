use std::borrow::Cow;

use chrono::NaiveDate;

use super::types::{DayPlan, OverrideKind, OverrideTable, ShiftRequirement};

/// Effective shift plan for one date
///
/// A `Closed` override yields no shifts. A `Special` override replaces the
/// whole recurring plan for that date with its single shift. Without an
/// override the recurring plan is used as is.
pub fn resolve_day<'a>(
    date: NaiveDate,
    overrides: &'a OverrideTable,
    recurring: &'a [ShiftRequirement],
) -> DayPlan<'a> {
    match overrides.get(&date) {
        Some(OverrideKind::Closed) => DayPlan::Closed,
        Some(OverrideKind::Special(special)) => {
            DayPlan::Shifts(Cow::Borrowed(std::slice::from_ref(special)))
        }
        None => DayPlan::Shifts(Cow::Borrowed(recurring)),
    }
}
