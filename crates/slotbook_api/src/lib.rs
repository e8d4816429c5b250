// --- File: crates/slotbook_api/src/lib.rs ---
//! Client for the slotbook backend: session token, calendar endpoints and
//! the client-side calendar store.

pub mod calendar;
pub mod client;
pub mod store;
pub mod token;

#[cfg(test)]
mod store_test;

pub use calendar::{
    ApiSlot, AuthUrlResponse, BookEventRequest, BookingResponse, CalendarApi, CalendarStatus,
    HttpCalendarApi, SlotsResponse,
};
pub use client::{ApiClient, ApiError};
pub use store::{normalize_date, CalendarState, CalendarStore};
pub use token::TokenStore;
