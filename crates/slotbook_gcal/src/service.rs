// --- File: crates/slotbook_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! Implements the busy-list and booking traits from `slotbook_common` on top
//! of the Calendar v3 API.

use chrono::{DateTime, Utc};
use google_calendar3::api::{Event, EventAttendee, EventDateTime};
use slotbook_common::services::{BookingSubmitter, BoxFuture, CalendarProvider};
use slotbook_common::{BookingRequest, InvalidInterval, TimeInterval};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error(transparent)]
    InvalidInterval(#[from] InvalidInterval),
    #[error("Booking conflict")]
    Conflict,
    #[error("Booking failed: {0}")]
    BookingFailed(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>) -> Self {
        Self { calendar_hub }
    }
}

fn event_boundary(value: &EventDateTime) -> Option<DateTime<Utc>> {
    value.date_time.or_else(|| {
        // All-day events carry a bare date; treat it as UTC midnight
        value
            .date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Converts a listed event into the busy interval it occupies.
///
/// Cancelled events and events without a usable start/end yield `None`.
pub fn event_to_interval(event: &Event) -> Option<TimeInterval> {
    if event.status.as_deref() == Some("cancelled") {
        return None;
    }
    let start = event.start.as_ref().and_then(event_boundary)?;
    let end = event.end.as_ref().and_then(event_boundary)?;
    Some(TimeInterval { start, end })
}

/// Builds the insert payload for a booking.
pub fn booking_to_event(request: &BookingRequest) -> Event {
    let attendees = if request.attendees.is_empty() {
        None
    } else {
        Some(
            request
                .attendees
                .iter()
                .map(|email| EventAttendee {
                    email: Some(email.clone()),
                    ..Default::default()
                })
                .collect(),
        )
    };

    Event {
        summary: Some(request.summary.clone()),
        description: request.description.clone(),
        start: Some(EventDateTime {
            date_time: Some(request.start),
            time_zone: Some("UTC".to_string()), // Store event times in UTC
            ..Default::default()
        }),
        end: Some(EventDateTime {
            date_time: Some(request.end),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        }),
        attendees,
        ..Default::default()
    }
}

impl CalendarProvider for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Lists the calendar's events in `[start_time, end_time)` and returns
    /// the intervals they occupy.
    ///
    /// Recurring events are expanded (`singleEvents`), and every result page
    /// is read. Events missing a start or end are skipped with a log line.
    fn fetch_busy_intervals(
        &self,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<TimeInterval>, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            let mut busy = Vec::new();
            let mut page_token: Option<String> = None;

            loop {
                let mut request = calendar_hub
                    .events()
                    .list(&calendar_id)
                    .time_min(start_time)
                    .time_max(end_time)
                    .single_events(true) // Expand recurring events
                    .order_by("startTime");
                if let Some(token) = page_token.as_deref() {
                    request = request.page_token(token);
                }

                let (_response, events) = request.doit().await.map_err(|e| {
                    error!("Error fetching calendar events: {}", e);
                    GcalServiceError::ApiError(e)
                })?;

                for event in events.items.unwrap_or_default() {
                    match event_to_interval(&event) {
                        Some(interval) => busy.push(interval),
                        None => debug!(
                            "Skipping event {:?} without usable start/end",
                            event.id
                        ),
                    }
                }

                match events.next_page_token {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }

            info!(
                "Fetched {} busy intervals from {} between {} and {}",
                busy.len(),
                calendar_id,
                start_time,
                end_time
            );
            Ok(busy)
        })
    }
}

impl BookingSubmitter for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Inserts the booking as an event and returns the event id.
    ///
    /// Attendees are notified by Google when the list is non-empty.
    fn submit_booking(
        &self,
        calendar_id: &str,
        request: BookingRequest,
    ) -> BoxFuture<'_, String, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();

        Box::pin(async move {
            request.interval()?;
            let send_updates = if request.attendees.is_empty() {
                "none"
            } else {
                "all"
            };
            let new_event = booking_to_event(&request);

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .send_updates(send_updates)
                .doit()
                .await
                .map_err(|e| {
                    error!("Error creating calendar event: {}", e);
                    GcalServiceError::BookingFailed(e.to_string())
                })?;

            created_event.id.ok_or_else(|| {
                GcalServiceError::BookingFailed("provider returned no event id".to_string())
            })
        })
    }
}
