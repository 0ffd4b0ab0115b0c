use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid date range: end month {end} is before start month {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid month '{input}': expected YYYY-MM or YYYY-MM-DD")]
    InvalidMonth { input: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate region name '{name}'")]
    DuplicateRegion { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
