// --- File: crates/slotbook_api/src/store.rs ---
//! Client-side calendar state.
//!
//! `CalendarStore` wraps a [`CalendarApi`] and keeps what a booking UI needs
//! between calls: connection status, the selected date and its free slots,
//! a loading flag and the last error message. Actions never panic on backend
//! failures; they record a fixed user-facing message and log the cause.

use crate::calendar::{ApiSlot, BookEventRequest, BookingResponse, CalendarApi};
use crate::client::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{error, info, instrument};

pub const CHECK_CONNECTION_FAILED: &str = "Failed to check Google Calendar connection";
pub const CONNECT_URL_FAILED: &str = "Failed to get Google authentication URL";
pub const DISCONNECT_FAILED: &str = "Failed to disconnect Google Calendar";
pub const CALLBACK_FAILED: &str = "Failed to connect Google Calendar";
pub const SLOTS_FAILED: &str = "Failed to fetch available time slots";
pub const BOOKING_FAILED: &str = "Failed to book event";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarState {
    pub is_connected: bool,
    pub expires_at: Option<String>,
    pub available_slots: Vec<ApiSlot>,
    /// `YYYY-MM-DD`
    pub selected_date: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for CalendarState {
    fn default() -> Self {
        Self {
            is_connected: false,
            expires_at: None,
            available_slots: Vec::new(),
            selected_date: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            is_loading: false,
            error: None,
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn normalize_date(input: &str) -> Result<NaiveDate, ApiError> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.date_naive())
        .map_err(|_| ApiError::InvalidInput(format!("invalid date '{}'", input)))
}

fn format_time(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.format("%H:%M").to_string(),
        Err(_) => value.to_string(),
    }
}

pub struct CalendarStore<A: CalendarApi> {
    api: A,
    state: CalendarState,
}

impl<A: CalendarApi> CalendarStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: CalendarState::default(),
        }
    }

    pub fn state(&self) -> &CalendarState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn begin(&mut self) {
        self.state.is_loading = true;
        self.state.error = None;
    }

    fn fail(&mut self, message: &str, err: &ApiError) {
        error!("{}: {}", message, err);
        self.state.error = Some(message.to_string());
    }

    #[instrument(skip(self))]
    pub async fn check_connection(&mut self) {
        self.begin();
        match self.api.calendar_status().await {
            Ok(status) => {
                self.state.is_connected = status.connected;
                self.state.expires_at = status.expires_at;
            }
            Err(e) => {
                self.state.is_connected = false;
                self.fail(CHECK_CONNECTION_FAILED, &e);
            }
        }
        self.state.is_loading = false;
    }

    #[instrument(skip(self))]
    pub async fn get_connect_url(&mut self) -> Option<String> {
        self.begin();
        let url = match self.api.get_auth_url().await {
            Ok(url) => Some(url),
            Err(e) => {
                self.fail(CONNECT_URL_FAILED, &e);
                None
            }
        };
        self.state.is_loading = false;
        url
    }

    #[instrument(skip(self))]
    pub async fn disconnect_google(&mut self) {
        self.begin();
        match self.api.disconnect().await {
            Ok(()) => {
                info!("Google Calendar disconnected");
                self.state.is_connected = false;
                self.state.expires_at = None;
                self.state.available_slots.clear();
            }
            Err(e) => self.fail(DISCONNECT_FAILED, &e),
        }
        self.state.is_loading = false;
    }

    #[instrument(skip(self, code))]
    pub async fn handle_google_callback(&mut self, code: &str) -> bool {
        self.begin();
        let connected = match self.api.handle_callback(code).await {
            Ok(()) => {
                self.state.is_connected = true;
                true
            }
            Err(e) => {
                self.fail(CALLBACK_FAILED, &e);
                false
            }
        };
        self.state.is_loading = false;
        connected
    }

    #[instrument(skip(self))]
    pub async fn get_available_slots(&mut self, date: &str) {
        self.begin();
        let result = match normalize_date(date) {
            Ok(day) => {
                self.state.selected_date = day.format("%Y-%m-%d").to_string();
                self.api.available_slots(day).await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(slots) => self.state.available_slots = slots,
            Err(e) => {
                self.state.available_slots.clear();
                self.fail(SLOTS_FAILED, &e);
            }
        }
        self.state.is_loading = false;
    }

    #[instrument(skip(self, request), fields(summary = %request.summary))]
    pub async fn book_event(
        &mut self,
        request: &BookEventRequest,
    ) -> Result<BookingResponse, ApiError> {
        self.begin();
        let result = self.api.book_event(request).await;
        if let Err(e) = &result {
            self.fail(BOOKING_FAILED, e);
        }
        self.state.is_loading = false;
        result
    }

    /// Current slots with `formatted_time` set to `"HH:MM - HH:MM"`.
    pub fn formatted_available_slots(&self) -> Vec<ApiSlot> {
        self.state
            .available_slots
            .iter()
            .map(|slot| ApiSlot {
                formatted_time: Some(format!(
                    "{} - {}",
                    format_time(&slot.start),
                    format_time(&slot.end)
                )),
                ..slot.clone()
            })
            .collect()
    }
}
