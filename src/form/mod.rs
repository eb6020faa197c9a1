pub mod submission;
pub mod export;

pub use submission::{validate_request, GenerateRequest, GenerationInputs, HolidayRow, HolidayType, ShiftRow};
pub use export::{build_daily_roster, daily_roster_csv_bytes, export_daily_roster, roster_file_name, DailyRoster};
