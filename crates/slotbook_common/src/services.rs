// --- File: crates/slotbook_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! The availability logic only ever sees a list of busy intervals, and the
//! booking flow only ever sees an event id. These traits keep it that way, so
//! the Google implementation can be swapped for a mock in tests.

use crate::models::{BookingRequest, TimeInterval};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Supplies the busy intervals of one calendar.
pub trait CalendarProvider: Send + Sync {
    /// Error type returned by provider operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Busy intervals intersecting `[start_time, end_time)`, in no guaranteed order.
    fn fetch_busy_intervals(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<TimeInterval>, Self::Error>;
}

/// Creates booking events with a calendar provider.
pub trait BookingSubmitter: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates the event and returns the provider-assigned event id.
    fn submit_booking(
        &self,
        calendar_id: &str,
        request: BookingRequest,
    ) -> BoxFuture<'_, String, Self::Error>;
}

/// Supplies the bearer credential used against a provider.
pub trait TokenProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn access_token(&self) -> BoxFuture<'_, String, Self::Error>;
}
