use chrono::Weekday;

use super::calendar::is_weekend;
use super::types::{Employee, OVER_TARGET_PENALTY, WEEKEND_REPEAT_PENALTY};

/// Fairness score of one candidate for a shift; lower is better
pub fn fairness_score(employee: &Employee, weekday: Weekday, week_index: usize) -> f64 {
    let mut score = employee.hours_worked;

    let previous_week = week_index.checked_sub(1);
    if is_weekend(weekday) && previous_week.is_some() && employee.last_weekend_worked == previous_week {
        score += WEEKEND_REPEAT_PENALTY;
    }
    if employee.has_met_target() {
        score += OVER_TARGET_PENALTY;
    }

    score
}

/// Picks the best-fit employee for one shift slot
///
/// Scans the roster in load order, skipping anyone already placed in this
/// shift, and returns the position of the lowest score. Ties go to the
/// earliest employee. `None` when nobody is left.
pub fn find_suitable_employee(
    employees: &[Employee],
    weekday: Weekday,
    already_assigned: &[String],
    week_index: usize,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, employee) in employees.iter().enumerate() {
        if already_assigned.iter().any(|name| *name == employee.name) {
            continue;
        }

        let score = fairness_score(employee, weekday, week_index);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    best.map(|(idx, _)| idx)
}
