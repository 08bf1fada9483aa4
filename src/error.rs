use std::fmt;

use thiserror::Error;

use crate::calendar::CalendarDate;

pub type Result<T> = std::result::Result<T, ClimateError>;

/// Why a date string was refused by the calendar validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRejection {
    NotAString,
    Malformed,
    MonthOutOfRange(u32),
    DayOutOfRange { day: u32, max: u32 },
}

impl fmt::Display for DateRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRejection::NotAString => write!(f, "date must be given as a string"),
            DateRejection::Malformed => write!(f, "expected the YYYY-MM-DD format"),
            DateRejection::MonthOutOfRange(month) => {
                write!(f, "month {} does not exist", month)
            }
            DateRejection::DayOutOfRange { day, max } => {
                write!(f, "day {} is outside 1..={} for that month", day, max)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: DateRejection },

    #[error("Invalid date range: start {start} is later than end {end}")]
    InvalidRange {
        start: CalendarDate,
        end: CalendarDate,
    },

    #[error("No data available: {context}")]
    NoData { context: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Table '{table}' is missing expected columns: {}", .missing.join(", "))]
    SchemaMismatch { table: String, missing: Vec<String> },

    #[error("Corrupt stored row, {value}: {reason}")]
    CorruptRow { value: String, reason: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ClimateError {
    pub fn no_data(context: impl Into<String>) -> Self {
        ClimateError::NoData {
            context: context.into(),
        }
    }

    /// Short machine-readable name used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            ClimateError::InvalidDate { .. } => "invalid_date",
            ClimateError::InvalidRange { .. } => "invalid_range",
            ClimateError::NoData { .. } => "no_data",
            ClimateError::Database(_) => "database",
            ClimateError::Io(_) => "io",
            ClimateError::Csv(_) => "csv",
            ClimateError::Config(_) => "config",
            ClimateError::Validation(_) => "validation",
            ClimateError::SchemaMismatch { .. } => "schema_mismatch",
            ClimateError::CorruptRow { .. } => "corrupt_row",
            ClimateError::InvalidFormat(_) => "invalid_format",
        }
    }

    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClimateError::InvalidDate { .. }
                | ClimateError::InvalidRange { .. }
                | ClimateError::NoData { .. }
        )
    }
}
