// --- File: crates/slotbook_api/src/calendar.rs ---
//! Calendar endpoints of the backend API.

use crate::client::{ApiClient, ApiError};
use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use slotbook_common::BookingRequest;

// --- Data Structures ---

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AuthUrlResponse {
    pub url: String,
}

#[derive(Serialize, Debug)]
struct CallbackRequest<'a> {
    code: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct CalendarStatus {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// A free slot as the backend reports it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiSlot {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_time: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SlotsResponse {
    #[serde(default)]
    pub slots: Vec<ApiSlot>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BookEventRequest {
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start: String, // RFC 3339
    pub end: String,   // RFC 3339
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl From<&BookingRequest> for BookEventRequest {
    fn from(request: &BookingRequest) -> Self {
        Self {
            summary: request.summary.clone(),
            description: request.description.clone(),
            start: request.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end: request.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            attendees: request.attendees.clone(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct BookingResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Calendar operations offered by the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// URL that starts the Google OAuth consent flow.
    async fn get_auth_url(&self) -> Result<String, ApiError>;

    /// Hands the OAuth `code` from the redirect back to the backend.
    async fn handle_callback(&self, code: &str) -> Result<(), ApiError>;

    async fn disconnect(&self) -> Result<(), ApiError>;

    async fn calendar_status(&self) -> Result<CalendarStatus, ApiError>;

    async fn available_slots(&self, date: NaiveDate) -> Result<Vec<ApiSlot>, ApiError>;

    async fn book_event(&self, request: &BookEventRequest) -> Result<BookingResponse, ApiError>;
}

/// [`CalendarApi`] over HTTP.
#[derive(Clone)]
pub struct HttpCalendarApi {
    client: ApiClient,
}

impl HttpCalendarApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl CalendarApi for HttpCalendarApi {
    async fn get_auth_url(&self) -> Result<String, ApiError> {
        let response: AuthUrlResponse = self.client.get("google/redirect").await?;
        Ok(response.url)
    }

    async fn handle_callback(&self, code: &str) -> Result<(), ApiError> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidInput("empty OAuth code".to_string()));
        }
        let _: serde_json::Value = self
            .client
            .post("google/callback", &CallbackRequest { code })
            .await?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.client.post_empty("google/disconnect").await?;
        Ok(())
    }

    async fn calendar_status(&self) -> Result<CalendarStatus, ApiError> {
        self.client.get("calendar/status").await
    }

    async fn available_slots(&self, date: NaiveDate) -> Result<Vec<ApiSlot>, ApiError> {
        let date = date.format("%Y-%m-%d").to_string();
        let response: SlotsResponse = self
            .client
            .get_with_query("calendar/slots", &[("date", date.as_str())])
            .await?;
        Ok(response.slots)
    }

    async fn book_event(&self, request: &BookEventRequest) -> Result<BookingResponse, ApiError> {
        self.client.post("calendar/book", request).await
    }
}
