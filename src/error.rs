use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid month: {month}/{year}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Duplicate employee name '{0}'")]
    DuplicateEmployee(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        RosterError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
