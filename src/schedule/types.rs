use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Value recorded for a closed day, used both as the shift key and the assignee text
pub const CLOSED_MARKER: &str = "CLOSED";
/// Placeholder for a shift slot nobody could fill
pub const UNFILLED_PLACEHOLDER: &str = "???";
/// Added to the score of someone who worked the previous week's weekend
pub const WEEKEND_REPEAT_PENALTY: f64 = 1000.0;
/// Added to the score of someone who already reached their monthly target
pub const OVER_TARGET_PENALTY: f64 = 500.0;

/// An employee and the running state the generator mutates during one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub target_monthly_hours: u32,
    pub hours_worked: f64,
    /// Week index of the latest Saturday/Sunday assignment, `None` if never
    pub last_weekend_worked: Option<usize>,
}

impl Employee {
    pub fn new(name: impl Into<String>, target_monthly_hours: u32) -> Self {
        Self {
            name: name.into(),
            target_monthly_hours,
            hours_worked: 0.0,
            last_weekend_worked: None,
        }
    }

    pub fn has_met_target(&self) -> bool {
        self.hours_worked >= f64::from(self.target_monthly_hours)
    }
}

/// One recurring shift: its time-range label and how many people it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequirement {
    pub shift: String,
    pub required_staff: u32,
}

impl ShiftRequirement {
    pub fn new(shift: impl Into<String>, required_staff: u32) -> Self {
        Self {
            shift: shift.into(),
            required_staff,
        }
    }
}

/// Recurring weekly plan. Shift order within a weekday is the fill order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    days: HashMap<Weekday, Vec<ShiftRequirement>>,
}

impl WeeklyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shift(&mut self, weekday: Weekday, requirement: ShiftRequirement) {
        self.days.entry(weekday).or_default().push(requirement);
    }

    pub fn with_shift(mut self, weekday: Weekday, shift: &str, required_staff: u32) -> Self {
        self.add_shift(weekday, ShiftRequirement::new(shift, required_staff));
        self
    }

    /// Shifts for a weekday, empty if the plan has nothing that day
    pub fn shifts_for(&self, weekday: Weekday) -> &[ShiftRequirement] {
        self.days.get(&weekday).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }
}

/// What a date-specific override does to the recurring plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideKind {
    Closed,
    Special(ShiftRequirement),
}

/// Overrides keyed by exact calendar date
pub type OverrideTable = HashMap<NaiveDate, OverrideKind>;

/// Effective plan for one concrete date after overrides are applied
#[derive(Debug, Clone, PartialEq)]
pub enum DayPlan<'a> {
    Closed,
    Shifts(Cow<'a, [ShiftRequirement]>),
}

/// Key of the assignment index: day of month plus shift label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub day: u32,
    pub shift: String,
}

impl SlotKey {
    pub fn new(day: u32, shift: impl Into<String>) -> Self {
        Self {
            day,
            shift: shift.into(),
        }
    }

    pub fn closed(day: u32) -> Self {
        Self::new(day, CLOSED_MARKER)
    }
}

/// (day, shift) -> comma-joined assignees, "???" placeholders or "CLOSED"
pub type AssignmentIndex = BTreeMap<SlotKey, String>;

/// One shift in an employee's month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub day: u32,
    pub day_abbr: String,
    pub shift: String,
    pub duration: f64,
}

/// Output of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchedule {
    pub year: i32,
    pub month: u32,
    pub assignments: AssignmentIndex,
    pub timelines: BTreeMap<String, Vec<TimelineEntry>>,
}

impl GeneratedSchedule {
    pub fn is_closed(&self, day: u32) -> bool {
        self.assignments.contains_key(&SlotKey::closed(day))
    }

    /// Index entries for one day, in shift-label order
    pub fn entries_for_day(&self, day: u32) -> impl Iterator<Item = (&SlotKey, &String)> {
        self.assignments.iter().filter(move |(key, _)| key.day == day)
    }

    pub fn timeline(&self, name: &str) -> &[TimelineEntry] {
        self.timelines.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
