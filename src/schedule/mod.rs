pub mod types;
pub mod calendar;
pub mod duration;
pub mod selector;
pub mod overrides;
pub mod generator;

pub use types::{
    AssignmentIndex, DayPlan, Employee, GeneratedSchedule, OverrideKind, OverrideTable,
    ShiftRequirement, SlotKey, TimelineEntry, WeeklyPlan, CLOSED_MARKER, UNFILLED_PLACEHOLDER,
};
pub use duration::{format_shift_label, shift_duration};
pub use selector::find_suitable_employee;
pub use overrides::resolve_day;
pub use generator::generate_schedule;
