use std::fmt;
use thiserror::Error;

/// Error reported by the `slotbook` binary.
///
/// Each crate keeps its own error enum (`GcalError`, `ApiError`, ...) and
/// converts into this one where a command finishes, so every failure is
/// printed the same way.
#[derive(Error, Debug)]
pub enum SlotbookError {
    /// Transport failure talking to the backend or Google
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// A response body or argument could not be parsed
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The backend or provider rejected our credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// The requested slot is taken
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Rate limited: {0}")]
    RateLimitError(String),
}

impl From<reqwest::Error> for SlotbookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SlotbookError::TimeoutError(err.to_string())
        } else {
            SlotbookError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SlotbookError {
    fn from(err: serde_json::Error) -> Self {
        SlotbookError::ParseError(err.to_string())
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> SlotbookError {
    SlotbookError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> SlotbookError {
    SlotbookError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
