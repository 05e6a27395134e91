//! Declaration error types.

use chrono::NaiveDate;
use declara_shared::AppError;
use thiserror::Error;

/// Errors that can abort a declaration run.
///
/// Missing codes, rates or optional amounts are not errors; they contribute zero.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// The record store could not deliver the lines for the period.
    #[error("Failed to fetch {kind} records: {reason}")]
    Source {
        /// Record kind being fetched.
        kind: &'static str,
        /// Underlying failure.
        reason: String,
    },

    /// A record failed validation at the ingestion boundary.
    #[error("Malformed {kind} record: {reason}")]
    MalformedRecord {
        /// Record kind.
        kind: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Period start is after its end.
    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Year/month pair does not name a calendar month.
    #[error("Invalid filing month {year}-{month}")]
    InvalidMonth {
        /// Year.
        year: i32,
        /// Month.
        month: u32,
    },

    /// The filing document could not be written.
    #[error("Failed to render declaration document: {0}")]
    Serialization(String),
}

impl From<DeclarationError> for AppError {
    fn from(err: DeclarationError) -> Self {
        match err {
            DeclarationError::Source { .. } => Self::ExternalService(err.to_string()),
            DeclarationError::MalformedRecord { .. }
            | DeclarationError::InvalidPeriod { .. }
            | DeclarationError::InvalidMonth { .. } => Self::Validation(err.to_string()),
            DeclarationError::Serialization(_) => Self::Serialization(err.to_string()),
        }
    }
}
