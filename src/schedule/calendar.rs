use chrono::{Datelike, Months, NaiveDate, Weekday};

use crate::error::{RosterError, RosterResult};

/// One row of the month grid, Monday first. `None` pads the first and last week.
pub type Week = [Option<u32>; 7];

/// Weekdays in grid column order
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// First day of the month, or `InvalidMonth`
pub fn first_of_month(year: i32, month: u32) -> RosterResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(RosterError::InvalidMonth { year, month })
}

pub fn days_in_month(year: i32, month: u32) -> RosterResult<u32> {
    let first = first_of_month(year, month)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or(RosterError::InvalidMonth { year, month })?;
    Ok(last.day())
}

/// Lays the month out in calendar weeks starting on Monday
pub fn month_grid(year: i32, month: u32) -> RosterResult<Vec<Week>> {
    let first = first_of_month(year, month)?;
    let last_day = days_in_month(year, month)?;
    let offset = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut column = offset;
    for day in 1..=last_day {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }
    if column > 0 {
        weeks.push(week);
    }
    Ok(weeks)
}

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Full English name, e.g. "Monday"
pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Three letter abbreviation, e.g. "Mon"
pub fn day_abbr(weekday: Weekday) -> &'static str {
    &day_name(weekday)[..3]
}

/// Parses a full weekday name; case and surrounding spaces are ignored
pub fn parse_day_name(name: &str) -> Option<Weekday> {
    let name = name.trim();
    DAY_NAMES
        .iter()
        .position(|day| day.eq_ignore_ascii_case(name))
        .map(|idx| WEEKDAYS[idx])
}

pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(idx).copied()
}
