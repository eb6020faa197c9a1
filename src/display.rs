use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::error::RosterResult;
use crate::schedule::calendar::{day_abbr, days_in_month, month_name};
use crate::schedule::{Employee, GeneratedSchedule, CLOSED_MARKER};

/// Writes the schedule day by day: `DD Ddd  shift: assignees`
pub fn write_schedule<W: Write>(schedule: &GeneratedSchedule, out: &mut W) -> RosterResult<()> {
    let month = month_name(schedule.month).unwrap_or("?");
    writeln!(out, "** {} {} **", month, schedule.year)?;

    for day in 1..=days_in_month(schedule.year, schedule.month)? {
        let abbr = NaiveDate::from_ymd_opt(schedule.year, schedule.month, day)
            .map(|date| day_abbr(date.weekday()))
            .unwrap_or("");

        if schedule.is_closed(day) {
            writeln!(out, "{:02} {} {}", day, abbr, CLOSED_MARKER)?;
            continue;
        }

        let mut entries = schedule.entries_for_day(day).peekable();
        if entries.peek().is_none() {
            writeln!(out, "{:02} {} [NO SHIFTS]", day, abbr)?;
        }
        for (key, assigned) in entries {
            writeln!(out, "{:02} {} {}: {}", day, abbr, key.shift, assigned)?;
        }
    }

    Ok(())
}

/// Writes the month totals, one employee per line
pub fn write_hours_summary<W: Write>(employees: &[Employee], out: &mut W) -> RosterResult<()> {
    writeln!(out, "--- Monthly Hours Summary ---")?;
    for employee in employees {
        writeln!(
            out,
            "{}: {} hours / {} target",
            employee.name, employee.hours_worked, employee.target_monthly_hours
        )?;
    }
    Ok(())
}

/// Prints the schedule and hours summary to stdout
pub fn print_month_schedule(schedule: &GeneratedSchedule, employees: &[Employee]) -> RosterResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_schedule(schedule, &mut out)?;
    writeln!(out)?;
    write_hours_summary(employees, &mut out)
}

/// Writes the schedule and hours summary to a text file
pub fn write_schedule_to_file<P: AsRef<Path>>(
    schedule: &GeneratedSchedule,
    employees: &[Employee],
    path: P,
) -> RosterResult<()> {
    let mut file = File::create(path)?;
    write_schedule(schedule, &mut file)?;
    writeln!(file)?;
    write_hours_summary(employees, &mut file)
}
