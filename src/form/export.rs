use std::io::Write;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::WriterBuilder;
use serde::Serialize;

use crate::error::{RosterError, RosterResult};
use crate::schedule::calendar::{day_abbr, days_in_month, is_weekend, month_name};
use crate::schedule::{Employee, GeneratedSchedule};

/// Cell text for a day an employee does not work
pub const OFF_MARKER: &str = "OFF";

/// One calendar day of the daily roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    pub date_label: String,
    pub day_abbr: String,
    pub is_weekend: bool,
    /// One cell per employee, in roster order
    pub cells: Vec<String>,
}

/// Day-by-employee view of a generated month, with a totals row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRoster {
    pub title: String,
    pub employee_names: Vec<String>,
    pub rows: Vec<RosterRow>,
    pub total_hours: Vec<f64>,
}

/// Builds the daily roster from the employee timelines
///
/// Columns follow the roster's load order. A day with several shifts for the
/// same employee lists every label, separated by " / ".
pub fn build_daily_roster(schedule: &GeneratedSchedule, employees: &[Employee]) -> RosterResult<DailyRoster> {
    let (year, month) = (schedule.year, schedule.month);
    let month_label = month_name(month).ok_or(RosterError::InvalidMonth { year, month })?;
    let short_month = &month_label[..3];

    let mut rows = Vec::new();
    for day in 1..=days_in_month(year, month)? {
        let weekday = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(RosterError::InvalidMonth { year, month })?
            .weekday();

        let cells = employees
            .iter()
            .map(|employee| {
                let shifts: Vec<&str> = schedule
                    .timeline(&employee.name)
                    .iter()
                    .filter(|entry| entry.day == day)
                    .map(|entry| entry.shift.as_str())
                    .collect();
                if shifts.is_empty() {
                    OFF_MARKER.to_string()
                } else {
                    shifts.join(" / ")
                }
            })
            .collect();

        rows.push(RosterRow {
            date_label: format!("{} {}", day, short_month),
            day_abbr: day_abbr(weekday).to_string(),
            is_weekend: is_weekend(weekday),
            cells,
        });
    }

    Ok(DailyRoster {
        title: format!("Roster {} {}", month_label, year),
        employee_names: employees.iter().map(|e| e.name.clone()).collect(),
        rows,
        total_hours: employees.iter().map(|e| e.hours_worked).collect(),
    })
}

/// Download name, e.g. `roster_november_2025.csv`
pub fn roster_file_name(year: i32, month: u32) -> String {
    let month_label = month_name(month).unwrap_or("unknown").to_lowercase();
    format!("roster_{}_{}.csv", month_label, year)
}

/// Writes the roster as CSV: header, one row per day, a blank row, then totals
pub fn write_daily_roster_csv<W: Write>(roster: &DailyRoster, writer: W) -> RosterResult<W> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    let width = roster.employee_names.len() + 2;

    let mut header = vec!["Date".to_string(), "Day".to_string()];
    header.extend(roster.employee_names.iter().cloned());
    wtr.write_record(&header)?;

    for row in &roster.rows {
        let mut record = vec![row.date_label.clone(), row.day_abbr.clone()];
        record.extend(row.cells.iter().cloned());
        wtr.write_record(&record)?;
    }

    wtr.write_record(vec![""; width])?;

    let mut totals = vec![String::new(), "Total Hours:".to_string()];
    totals.extend(roster.total_hours.iter().map(|hours| hours.to_string()));
    wtr.write_record(&totals)?;

    wtr.flush()?;
    wtr.into_inner().map_err(|e| RosterError::Io(e.into_error()))
}

pub fn daily_roster_csv_bytes(roster: &DailyRoster) -> RosterResult<Vec<u8>> {
    write_daily_roster_csv(roster, Vec::new())
}

/// Writes the roster CSV to a file
pub fn export_daily_roster<P: AsRef<Path>>(roster: &DailyRoster, path: P) -> RosterResult<()> {
    let file = std::fs::File::create(path)?;
    write_daily_roster_csv(roster, file)?;
    Ok(())
}
