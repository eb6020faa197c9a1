use serde::{Deserialize, Serialize};

use crate::error::{RosterError, RosterResult};
use crate::parser::{parse_date, parse_employees, parse_holidays, parse_schedules};
use crate::schedule::calendar::parse_day_name;
use crate::schedule::duration::parse_time_to_minutes;
use crate::schedule::{format_shift_label, Employee, OverrideKind, OverrideTable, ShiftRequirement, WeeklyPlan};

/// One recurring shift row from the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRow {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub staff_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HolidayType {
    Closed,
    Special,
}

/// One holiday row from the form. Times and staff are only used for SPECIAL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRow {
    pub date: String,
    pub holiday_type: HolidayType,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub staff: Option<u32>,
}

/// Generation request from the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub employees_input: String,
    /// Free-text plan rows (`Day,HH:MM - HH:MM,staff`), read before `shifts`
    #[serde(default)]
    pub schedule_input: Option<String>,
    #[serde(default)]
    pub shifts: Vec<ShiftRow>,
    /// Free-text override rows, read before `holidays`
    #[serde(default)]
    pub holidays_input: Option<String>,
    #[serde(default)]
    pub holidays: Vec<HolidayRow>,
    pub month: u32,
    pub year: i32,
}

/// Fresh, parsed inputs for one generation run
#[derive(Debug, Clone)]
pub struct GenerationInputs {
    pub employees: Vec<Employee>,
    pub plan: WeeklyPlan,
    pub overrides: OverrideTable,
    pub year: i32,
    pub month: u32,
}

fn validate_times(start: &str, end: &str, context: &str) -> Result<(), String> {
    let start_minutes = parse_time_to_minutes(start)
        .ok_or_else(|| format!("{}: invalid start time '{}'", context, start))?;
    let end_minutes = parse_time_to_minutes(end)
        .ok_or_else(|| format!("{}: invalid end time '{}'", context, end))?;
    if end_minutes < start_minutes {
        return Err(format!("{}: end time must not be before start time", context));
    }
    Ok(())
}

/// Validates a generation request
pub fn validate_request(req: &GenerateRequest) -> Result<(), String> {
    if !(1..=12).contains(&req.month) {
        return Err(format!("Invalid month: {}", req.month));
    }
    if !(1000..=9999).contains(&req.year) {
        return Err(format!("Invalid year: {}", req.year));
    }

    if req.employees_input.trim().is_empty() {
        return Err("At least one employee is required".to_string());
    }

    for (idx, row) in req.shifts.iter().enumerate() {
        let context = format!("Shift row {}", idx + 1);
        if parse_day_name(&row.day).is_none() {
            return Err(format!("{}: unknown day '{}'", context, row.day));
        }
        validate_times(&row.start_time, &row.end_time, &context)?;
    }

    for (idx, row) in req.holidays.iter().enumerate() {
        let context = format!("Holiday row {}", idx + 1);
        if parse_date(&row.date).is_none() {
            return Err(format!("{}: invalid date '{}'", context, row.date));
        }
        if row.holiday_type == HolidayType::Special {
            let start = row.start.as_deref().unwrap_or("");
            let end = row.end.as_deref().unwrap_or("");
            validate_times(start, end, &context)?;
            if row.staff.is_none() {
                return Err(format!("{}: staff count is required for a special day", context));
            }
        }
    }

    Ok(())
}

impl GenerateRequest {
    /// Parses the request into fresh generation inputs
    ///
    /// Free-text sections follow the lenient policy: a malformed section
    /// becomes empty. Structured rows must have passed `validate_request`.
    pub fn into_inputs(self) -> RosterResult<GenerationInputs> {
        validate_request(&self).map_err(RosterError::Validation)?;

        let employees = parse_employees(&self.employees_input);

        let mut plan = self
            .schedule_input
            .as_deref()
            .map(parse_schedules)
            .unwrap_or_default();
        for row in &self.shifts {
            let weekday = parse_day_name(&row.day)
                .ok_or_else(|| RosterError::Validation(format!("unknown day '{}'", row.day)))?;
            plan.add_shift(
                weekday,
                ShiftRequirement::new(format_shift_label(&row.start_time, &row.end_time), row.staff_count),
            );
        }

        let mut overrides = self
            .holidays_input
            .as_deref()
            .map(parse_holidays)
            .unwrap_or_default();
        for row in &self.holidays {
            let date = parse_date(&row.date)
                .ok_or_else(|| RosterError::Validation(format!("invalid date '{}'", row.date)))?;
            let kind = match row.holiday_type {
                HolidayType::Closed => OverrideKind::Closed,
                HolidayType::Special => OverrideKind::Special(ShiftRequirement::new(
                    format_shift_label(
                        row.start.as_deref().unwrap_or(""),
                        row.end.as_deref().unwrap_or(""),
                    ),
                    row.staff.unwrap_or(0),
                )),
            };
            overrides.insert(date, kind);
        }

        Ok(GenerationInputs {
            employees,
            plan,
            overrides,
            year: self.year,
            month: self.month,
        })
    }
}
