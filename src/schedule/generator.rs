use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::calendar::{day_abbr, is_weekend, month_grid, WEEKDAYS};
use super::duration::shift_duration;
use super::overrides::resolve_day;
use super::selector::find_suitable_employee;
use super::types::{
    AssignmentIndex, DayPlan, Employee, GeneratedSchedule, OverrideTable, SlotKey, TimelineEntry,
    WeeklyPlan, CLOSED_MARKER, UNFILLED_PLACEHOLDER,
};
use crate::error::{RosterError, RosterResult};

/// Generates the schedule for one month
///
/// Walks the month grid week by week, Monday first, filling every required
/// slot with `find_suitable_employee`. Each pick updates the employee's hours
/// (and weekend marker on Saturdays and Sundays) before the next pick, so the
/// walk order decides who gets what. `employees` is left holding the month's
/// totals.
pub fn generate_schedule(
    employees: &mut [Employee],
    plan: &WeeklyPlan,
    overrides: &OverrideTable,
    year: i32,
    month: u32,
) -> RosterResult<GeneratedSchedule> {
    log::info!("Starting schedule generation for {}/{}...", month, year);

    let grid = month_grid(year, month)?;

    let mut assignments = AssignmentIndex::new();
    let mut timelines: BTreeMap<String, Vec<TimelineEntry>> = employees
        .iter()
        .map(|e| (e.name.clone(), Vec::new()))
        .collect();

    for (week_index, week) in grid.iter().enumerate() {
        for (column, cell) in week.iter().enumerate() {
            let Some(day) = *cell else {
                continue;
            };
            let weekday = WEEKDAYS[column];
            let date = NaiveDate::from_ymd_opt(year, month, day)
                .ok_or(RosterError::InvalidMonth { year, month })?;

            let shifts = match resolve_day(date, overrides, plan.shifts_for(weekday)) {
                DayPlan::Closed => {
                    log::debug!("{} is closed", date);
                    assignments.insert(SlotKey::closed(day), CLOSED_MARKER.to_string());
                    continue;
                }
                DayPlan::Shifts(shifts) => shifts,
            };

            for requirement in shifts.iter() {
                let duration = shift_duration(&requirement.shift);
                let mut assigned_names: Vec<String> = Vec::new();
                let mut slot_values: Vec<String> = Vec::new();

                for _ in 0..requirement.required_staff {
                    match find_suitable_employee(employees, weekday, &assigned_names, week_index) {
                        Some(idx) => {
                            let employee = &mut employees[idx];
                            employee.hours_worked += duration;
                            if is_weekend(weekday) {
                                employee.last_weekend_worked = Some(week_index);
                            }

                            timelines
                                .entry(employee.name.clone())
                                .or_default()
                                .push(TimelineEntry {
                                    day,
                                    day_abbr: day_abbr(weekday).to_string(),
                                    shift: requirement.shift.clone(),
                                    duration,
                                });

                            log::debug!("{} {}: {}", date, requirement.shift, employee.name);
                            assigned_names.push(employee.name.clone());
                            slot_values.push(employee.name.clone());
                        }
                        None => {
                            log::debug!("{} {}: slot left unfilled", date, requirement.shift);
                            slot_values.push(UNFILLED_PLACEHOLDER.to_string());
                        }
                    }
                }

                assignments.insert(SlotKey::new(day, requirement.shift.as_str()), slot_values.join(", "));
            }
        }
    }

    for timeline in timelines.values_mut() {
        timeline.sort_by_key(|entry| entry.day);
    }

    log::info!("...Schedules calculated.");
    log::info!("--- Monthly Hours Summary ---");
    for employee in employees.iter() {
        log::info!(
            "{}: {} hours / {} target",
            employee.name,
            employee.hours_worked,
            employee.target_monthly_hours
        );
    }

    Ok(GeneratedSchedule {
        year,
        month,
        assignments,
        timelines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{OverrideKind, ShiftRequirement};
    use chrono::Weekday;

    fn roster(names: &[(&str, u32)]) -> Vec<Employee> {
        names.iter().map(|(name, target)| Employee::new(*name, *target)).collect()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn alternates_between_equal_employees() {
        let mut employees = roster(&[("Anna", 160), ("Marco", 160)]);
        let plan = WeeklyPlan::new().with_shift(Weekday::Mon, "09:00 - 13:00", 1);

        let schedule =
            generate_schedule(&mut employees, &plan, &OverrideTable::new(), 2025, 11).unwrap();

        // Mondays in November 2025: 3, 10, 17, 24
        assert_eq!(schedule.assignments[&SlotKey::new(3, "09:00 - 13:00")], "Anna");
        assert_eq!(schedule.assignments[&SlotKey::new(10, "09:00 - 13:00")], "Marco");
        assert_eq!(schedule.assignments[&SlotKey::new(17, "09:00 - 13:00")], "Anna");
        assert_eq!(schedule.assignments[&SlotKey::new(24, "09:00 - 13:00")], "Marco");
        assert_eq!(schedule.assignments.len(), 4);
        assert_eq!(employees[0].hours_worked, 8.0);
        assert_eq!(employees[1].hours_worked, 8.0);
    }

    #[test]
    fn unfilled_slots_get_placeholder() {
        let mut employees = roster(&[("Anna", 160)]);
        let plan = WeeklyPlan::new().with_shift(Weekday::Tue, "09:00 - 17:00", 3);

        let schedule =
            generate_schedule(&mut employees, &plan, &OverrideTable::new(), 2025, 11).unwrap();

        assert_eq!(schedule.assignments[&SlotKey::new(4, "09:00 - 17:00")], "Anna, ???, ???");
        // Four Tuesdays, eight hours each, counted once per shift
        assert_eq!(employees[0].hours_worked, 32.0);
        assert_eq!(schedule.timeline("Anna").len(), 4);
    }

    #[test]
    fn empty_roster_fills_everything_with_placeholders() {
        let mut employees: Vec<Employee> = Vec::new();
        let plan = WeeklyPlan::new().with_shift(Weekday::Wed, "10:00 - 14:00", 2);

        let schedule =
            generate_schedule(&mut employees, &plan, &OverrideTable::new(), 2025, 11).unwrap();

        assert!(schedule.assignments.values().all(|v| v == "???, ???"));
        assert!(schedule.timelines.is_empty());
    }

    #[test]
    fn closed_day_leaves_state_untouched() {
        let mut employees = roster(&[("Anna", 160)]);
        let plan = WeeklyPlan::new().with_shift(Weekday::Sat, "09:00 - 13:00", 1);
        let mut overrides = OverrideTable::new();
        for day in [1, 8, 15, 22, 29] {
            overrides.insert(date(2025, 11, day), OverrideKind::Closed);
        }

        let schedule = generate_schedule(&mut employees, &plan, &overrides, 2025, 11).unwrap();

        assert_eq!(employees[0].hours_worked, 0.0);
        assert_eq!(employees[0].last_weekend_worked, None);
        assert!(schedule.is_closed(15));
        assert_eq!(schedule.entries_for_day(15).count(), 1);
    }

    #[test]
    fn weekend_marker_tracks_week_index() {
        let mut employees = roster(&[("Anna", 160)]);
        let plan = WeeklyPlan::new().with_shift(Weekday::Sun, "10:00 - 14:00", 1);

        generate_schedule(&mut employees, &plan, &OverrideTable::new(), 2025, 11).unwrap();

        // Last Sunday, the 30th, sits in week row 4
        assert_eq!(employees[0].last_weekend_worked, Some(4));
    }

    #[test]
    fn weekend_rotation_avoids_back_to_back() {
        let mut employees = roster(&[("Anna", 160), ("Marco", 160)]);
        let plan = WeeklyPlan::new()
            .with_shift(Weekday::Sat, "09:00 - 13:00", 1)
            .with_shift(Weekday::Mon, "09:00 - 17:00", 1);

        let schedule =
            generate_schedule(&mut employees, &plan, &OverrideTable::new(), 2025, 11).unwrap();

        // Nov 1 (week 0): Anna. Nov 3 Monday: Marco (fewer hours).
        // Nov 8 (week 1): Anna has 4h, Marco 8h, but Anna worked week 0's weekend.
        assert_eq!(schedule.assignments[&SlotKey::new(1, "09:00 - 13:00")], "Anna");
        assert_eq!(schedule.assignments[&SlotKey::new(3, "09:00 - 17:00")], "Marco");
        assert_eq!(schedule.assignments[&SlotKey::new(8, "09:00 - 13:00")], "Marco");
    }

    #[test]
    fn special_override_on_unplanned_weekday() {
        let mut employees = roster(&[("Anna", 160), ("Marco", 160)]);
        let plan = WeeklyPlan::new().with_shift(Weekday::Mon, "09:00 - 13:00", 1);
        let mut overrides = OverrideTable::new();
        overrides.insert(
            date(2025, 11, 20),
            OverrideKind::Special(ShiftRequirement::new("10:00 - 14:00", 2)),
        );

        let schedule = generate_schedule(&mut employees, &plan, &overrides, 2025, 11).unwrap();

        assert_eq!(
            schedule.assignments[&SlotKey::new(20, "10:00 - 14:00")],
            "Anna, Marco"
        );
    }

    #[test]
    fn invalid_month_is_an_error() {
        let mut employees = roster(&[("Anna", 160)]);
        let result = generate_schedule(
            &mut employees,
            &WeeklyPlan::new(),
            &OverrideTable::new(),
            2025,
            13,
        );
        assert!(result.is_err());
    }
}
