// --- File: crates/slotbook_common/src/http.rs ---
use crate::error::SlotbookError;

// Include the client module
pub mod client;

/// Maps a non-success HTTP status from the backend onto a [`SlotbookError`],
/// carrying the response body as message.
pub fn status_error(status: u16, message: impl Into<String>) -> SlotbookError {
    let message = message.into();
    match status {
        400 | 422 => SlotbookError::ValidationError(message),
        401 | 403 => SlotbookError::AuthError(message),
        404 => SlotbookError::NotFoundError(message),
        409 => SlotbookError::ConflictError(message),
        408 | 504 => SlotbookError::TimeoutError(message),
        429 => SlotbookError::RateLimitError(message),
        _ => SlotbookError::ExternalServiceError {
            service_name: "backend".to_string(),
            message: format!("status {}: {}", status, message),
        },
    }
}
