//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Domain crates keep their own error enums and convert into this one at the
/// boundary, so a failed declaration run surfaces as a single reportable error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Upstream record store error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Document rendering error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the stable error code reported to callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true if the caller may retry the failed operation as-is.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::ExternalService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            AppError::Database(String::new()).error_code(),
            "DATABASE_ERROR"
        );
        assert_eq!(
            AppError::ExternalService(String::new()).error_code(),
            "EXTERNAL_SERVICE_ERROR"
        );
        assert_eq!(
            AppError::Serialization(String::new()).error_code(),
            "SERIALIZATION_ERROR"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(AppError::Database("timeout".into()).is_retryable());
        assert!(AppError::ExternalService("unreachable".into()).is_retryable());
        assert!(!AppError::Validation("bad rate".into()).is_retryable());
        assert!(!AppError::Serialization("io".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::ExternalService("msg".into()).to_string(),
            "External service error: msg"
        );
        assert_eq!(
            AppError::Serialization("msg".into()).to_string(),
            "Serialization error: msg"
        );
    }
}
