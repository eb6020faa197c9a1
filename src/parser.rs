use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{RosterError, RosterResult};
use crate::schedule::calendar::parse_day_name;
use crate::schedule::{Employee, OverrideKind, OverrideTable, ShiftRequirement, WeeklyPlan, CLOSED_MARKER};

const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];

/// Reads comma separated rows, skipping blank lines. Returns (line number, record).
fn read_rows(text: &str) -> RosterResult<Vec<(usize, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        rows.push((line, record));
    }
    Ok(rows)
}

fn expect_fields(line: usize, record: &StringRecord, expected: usize) -> RosterResult<()> {
    if record.len() != expected {
        return Err(RosterError::parse(
            line,
            format!("expected {} fields, found {}", expected, record.len()),
        ));
    }
    Ok(())
}

/// Parses a non-negative whole number field
fn parse_count(line: usize, value: &str, what: &str) -> RosterResult<u32> {
    value
        .parse()
        .map_err(|_| RosterError::parse(line, format!("{} '{}' is not a whole number", what, value)))
}

/// Parses a date as DD/MM/YYYY or YYYY-MM-DD
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value.trim(), format).ok())
}

/// Parses roster rows of the form `name,target_monthly_hours`
pub fn try_parse_employees(text: &str) -> RosterResult<Vec<Employee>> {
    let mut employees = Vec::new();
    let mut seen = HashSet::new();

    for (line, record) in read_rows(text)? {
        expect_fields(line, &record, 2)?;
        let name = &record[0];
        if name.is_empty() {
            return Err(RosterError::parse(line, "employee name is empty"));
        }
        if !seen.insert(name.to_string()) {
            return Err(RosterError::DuplicateEmployee(name.to_string()));
        }
        let target = parse_count(line, &record[1], "monthly hours")?;
        employees.push(Employee::new(name, target));
    }

    Ok(employees)
}

/// Parses plan rows of the form `Day,HH:MM - HH:MM,required_staff`
pub fn try_parse_schedules(text: &str) -> RosterResult<WeeklyPlan> {
    let mut plan = WeeklyPlan::new();

    for (line, record) in read_rows(text)? {
        expect_fields(line, &record, 3)?;
        let weekday = parse_day_name(&record[0])
            .ok_or_else(|| RosterError::parse(line, format!("unknown day '{}'", &record[0])))?;
        let shift = &record[1];
        if shift.is_empty() {
            return Err(RosterError::parse(line, "shift label is empty"));
        }
        let staff = parse_count(line, &record[2], "required staff")?;
        plan.add_shift(weekday, ShiftRequirement::new(shift, staff));
    }

    Ok(plan)
}

/// Parses override rows: `DD/MM/YYYY, CLOSED` or `DD/MM/YYYY, HH:MM - HH:MM, staff`
pub fn try_parse_holidays(text: &str) -> RosterResult<OverrideTable> {
    let mut overrides = OverrideTable::new();

    for (line, record) in read_rows(text)? {
        let date = parse_date(&record[0])
            .ok_or_else(|| RosterError::parse(line, format!("invalid date '{}'", &record[0])))?;

        let kind = match record.len() {
            2 if record[1].eq_ignore_ascii_case(CLOSED_MARKER) => OverrideKind::Closed,
            3 if !record[1].is_empty() => {
                let staff = parse_count(line, &record[2], "required staff")?;
                OverrideKind::Special(ShiftRequirement::new(&record[1], staff))
            }
            _ => {
                return Err(RosterError::parse(
                    line,
                    "expected 'date, CLOSED' or 'date, HH:MM - HH:MM, staff'",
                ))
            }
        };
        overrides.insert(date, kind);
    }

    Ok(overrides)
}

/// Roster from text; any malformed row yields an empty roster
pub fn parse_employees(text: &str) -> Vec<Employee> {
    try_parse_employees(text).unwrap_or_else(|e| {
        log::warn!("Error parsing employees: {}", e);
        Vec::new()
    })
}

/// Weekly plan from text; any malformed row yields an empty plan
pub fn parse_schedules(text: &str) -> WeeklyPlan {
    try_parse_schedules(text).unwrap_or_else(|e| {
        log::warn!("Error parsing schedules: {}", e);
        WeeklyPlan::new()
    })
}

/// Overrides from text; any malformed row yields no overrides
pub fn parse_holidays(text: &str) -> OverrideTable {
    try_parse_holidays(text).unwrap_or_else(|e| {
        log::warn!("Error parsing holidays: {}", e);
        OverrideTable::new()
    })
}

pub fn load_employees<P: AsRef<Path>>(path: P) -> RosterResult<Vec<Employee>> {
    try_parse_employees(&std::fs::read_to_string(path)?)
}

pub fn load_schedules<P: AsRef<Path>>(path: P) -> RosterResult<WeeklyPlan> {
    try_parse_schedules(&std::fs::read_to_string(path)?)
}

pub fn load_holidays<P: AsRef<Path>>(path: P) -> RosterResult<OverrideTable> {
    try_parse_holidays(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn employees_in_load_order() {
        let employees = parse_employees("Anna,160\n\n  Marco , 120 \n");
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0], Employee::new("Anna", 160));
        assert_eq!(employees[1].name, "Marco");
        assert_eq!(employees[1].target_monthly_hours, 120);
        assert_eq!(employees[1].hours_worked, 0.0);
        assert_eq!(employees[1].last_weekend_worked, None);
    }

    #[test]
    fn malformed_employee_row_empties_the_batch() {
        assert!(parse_employees("Anna,160\nMarco,lots").is_empty());
        assert!(parse_employees("Anna,160\nMarco").is_empty());
        assert!(parse_employees("Anna,-4").is_empty());
        assert!(parse_employees(",40").is_empty());
        assert!(parse_employees("").is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        assert!(matches!(
            try_parse_employees("Anna,160\nAnna,80"),
            Err(RosterError::DuplicateEmployee(name)) if name == "Anna"
        ));
    }

    #[test]
    fn parse_errors_report_the_line() {
        match try_parse_employees("Anna,160\nMarco,x") {
            Err(RosterError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn schedules_keep_row_order_per_day() {
        let plan = parse_schedules(
            "Monday,09:00 - 13:00,1\nTuesday,08:00 - 12:00,2\nMonday,13:00 - 17:00,2",
        );
        assert_eq!(
            plan.shifts_for(Weekday::Mon),
            &[
                ShiftRequirement::new("09:00 - 13:00", 1),
                ShiftRequirement::new("13:00 - 17:00", 2),
            ]
        );
        assert_eq!(plan.shifts_for(Weekday::Tue).len(), 1);
        assert!(plan.shifts_for(Weekday::Sun).is_empty());
    }

    #[test]
    fn malformed_schedule_row_empties_the_plan() {
        assert!(parse_schedules("Monday,09:00 - 13:00,1\nFunday,09:00 - 13:00,1").is_empty());
        assert!(parse_schedules("Monday,09:00 - 13:00").is_empty());
        assert!(parse_schedules("Monday,09:00 - 13:00,two").is_empty());
    }

    #[test]
    fn holidays_closed_and_special() {
        let overrides = parse_holidays("15/11/2025, CLOSED\n17/11/2025, 10:00 - 12:00, 1\n2025-11-20, closed");
        let date = |d| NaiveDate::from_ymd_opt(2025, 11, d).unwrap();
        assert_eq!(overrides.len(), 3);
        assert_eq!(overrides[&date(15)], OverrideKind::Closed);
        assert_eq!(
            overrides[&date(17)],
            OverrideKind::Special(ShiftRequirement::new("10:00 - 12:00", 1))
        );
        assert_eq!(overrides[&date(20)], OverrideKind::Closed);
    }

    #[test]
    fn malformed_holiday_row_empties_the_table() {
        assert!(parse_holidays("15/11/2025, CLOSED\n32/11/2025, CLOSED").is_empty());
        assert!(parse_holidays("15/11/2025, OPEN").is_empty());
        assert!(parse_holidays("17/11/2025, 10:00 - 12:00").is_empty());
        assert!(parse_holidays("17/11/2025, 10:00 - 12:00, x").is_empty());
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 5);
        assert_eq!(parse_date("05/11/2025"), expected);
        assert_eq!(parse_date("2025-11-05"), expected);
        assert_eq!(parse_date("11/05/2025 10:00"), None);
    }
}
