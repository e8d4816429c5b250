// --- File: crates/slotbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared value types
pub mod services; // Service abstractions


// Re-export error types and utilities for easier access
pub use error::{external_service_error, validation_error, SlotbookError};

pub use http::{
    client::create_client,
    status_error,
};

pub use logging::{init_with_level, log_error, parse_level};

pub use models::{BookingRequest, InvalidInterval, TimeInterval};
pub use services::{BookingSubmitter, BoxFuture, CalendarProvider, TokenProvider};
