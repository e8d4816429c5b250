// --- File: crates/slotbook_gcal/src/logic.rs ---
use crate::service::GcalServiceError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slotbook_common::services::{BookingSubmitter, CalendarProvider};
use slotbook_common::{BookingRequest, SlotbookError, TimeInterval};
use slotbook_config::AvailabilityConfig;
use tracing::{debug, info, warn};

// --- Error Handling ---
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum GcalError {
    #[error(transparent)]
    Availability(#[from] AvailabilityError),
    #[error("Calendar service error: {0}")]
    ServiceError(#[from] GcalServiceError),
    #[error("Google authentication failed: {0}")]
    Auth(String),
    #[error("GCal configuration error: {0}")]
    Config(String),
}

impl From<GcalError> for SlotbookError {
    fn from(err: GcalError) -> Self {
        match err {
            GcalError::Availability(e) => SlotbookError::ValidationError(e.to_string()),
            GcalError::ServiceError(GcalServiceError::Conflict) => {
                SlotbookError::ConflictError("requested slot is already booked".to_string())
            }
            GcalError::ServiceError(GcalServiceError::InvalidInterval(e)) => {
                SlotbookError::ValidationError(e.to_string())
            }
            GcalError::ServiceError(e) => {
                slotbook_common::external_service_error("google-calendar", e)
            }
            GcalError::Auth(msg) => SlotbookError::AuthError(msg),
            GcalError::Config(msg) => SlotbookError::ConfigError(msg),
        }
    }
}

// --- Data Structures ---

/// The bookable part of a day: `[day_start_hour, day_end_hour)` cut into
/// equal slots, with the hours read as wall-clock time in `time_zone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingWindow {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub slot_duration_minutes: i64,
    pub time_zone: Tz,
}

impl Default for WorkingWindow {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            day_end_hour: 17,
            slot_duration_minutes: 60,
            time_zone: Tz::UTC,
        }
    }
}

/// A candidate slot that survived busy-interval filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    #[serde(flatten)]
    pub interval: TimeInterval,
    /// `"HH:MM - HH:MM"` in the window's local time.
    pub label: String,
}

impl WorkingWindow {
    pub fn new(day_start_hour: u32, day_end_hour: u32, slot_duration_minutes: i64) -> Self {
        Self {
            day_start_hour,
            day_end_hour,
            slot_duration_minutes,
            time_zone: Tz::UTC,
        }
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Builds and validates a window from the `[availability]` config section.
    pub fn from_config(config: &AvailabilityConfig) -> Result<Self, AvailabilityError> {
        let time_zone: Tz = config.time_zone.parse().map_err(|_| {
            AvailabilityError::InvalidConfiguration(format!(
                "unknown time zone '{}'",
                config.time_zone
            ))
        })?;
        let window = Self::new(
            config.day_start_hour,
            config.day_end_hour,
            config.slot_duration_minutes,
        )
        .with_time_zone(time_zone);
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), AvailabilityError> {
        if self.day_end_hour > 24 {
            return Err(AvailabilityError::InvalidConfiguration(format!(
                "day_end_hour {} is past midnight",
                self.day_end_hour
            )));
        }
        if self.day_start_hour >= self.day_end_hour {
            return Err(AvailabilityError::InvalidConfiguration(format!(
                "day_start_hour {} must be before day_end_hour {}",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.slot_duration_minutes <= 0 {
            return Err(AvailabilityError::InvalidConfiguration(format!(
                "slot_duration_minutes must be positive, got {}",
                self.slot_duration_minutes
            )));
        }
        if self.slot_count() == 0 {
            return Err(AvailabilityError::InvalidConfiguration(format!(
                "a {} minute slot does not fit between {:02}:00 and {:02}:00",
                self.slot_duration_minutes, self.day_start_hour, self.day_end_hour
            )));
        }
        Ok(())
    }

    /// Number of whole slots in the window; an incomplete trailing slot is dropped.
    pub fn slot_count(&self) -> usize {
        if self.slot_duration_minutes <= 0 || self.day_end_hour <= self.day_start_hour {
            return 0;
        }
        let window_minutes = i64::from(self.day_end_hour - self.day_start_hour) * 60;
        (window_minutes / self.slot_duration_minutes) as usize
    }

    /// Candidate slots as (start, end) minute offsets from local midnight.
    fn grid_offsets(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let first = i64::from(self.day_start_hour) * 60;
        (0..self.slot_count() as i64).map(move |i| {
            let start = first + i * self.slot_duration_minutes;
            (start, start + self.slot_duration_minutes)
        })
    }

    /// The whole window on `date` as a UTC interval, e.g. to query a provider.
    pub fn bounds(&self, date: NaiveDate) -> Result<TimeInterval, AvailabilityError> {
        self.validate()?;
        let start = local_instant(self.time_zone, date, i64::from(self.day_start_hour) * 60);
        let end = local_instant(self.time_zone, date, i64::from(self.day_end_hour) * 60);
        match (start, end) {
            (Some(start), Some(end)) if start < end => Ok(TimeInterval { start, end }),
            _ => Err(AvailabilityError::InvalidConfiguration(format!(
                "working window does not exist on {} in {}",
                date, self.time_zone
            ))),
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AvailabilityError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AvailabilityError::InvalidDate(input.to_string()))
}

/// Wall-clock `date + minutes` in `tz`, converted to UTC.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times that
/// do not exist (DST spring-forward) or fall outside chrono's range yield `None`.
fn local_instant(tz: Tz, date: NaiveDate, minutes: i64) -> Option<DateTime<Utc>> {
    let naive = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::minutes(minutes))?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn format_label(start_minutes: i64, end_minutes: i64) -> String {
    format!(
        "{:02}:{:02} - {:02}:{:02}",
        start_minutes / 60,
        start_minutes % 60,
        end_minutes / 60,
        end_minutes % 60
    )
}

// --- Availability Logic ---

/// Sorts busy intervals and coalesces the ones that overlap or touch.
///
/// Malformed intervals (`start >= end`) are dropped with a warning; they
/// never restrict availability.
pub fn merge_busy_intervals(busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted: Vec<TimeInterval> = busy
        .iter()
        .filter(|interval| {
            let valid = interval.is_valid();
            if !valid {
                warn!(
                    "Skipping malformed busy interval {} - {}",
                    interval.start, interval.end
                );
            }
            valid
        })
        .copied()
        .collect();
    sorted.sort_by_key(|interval| interval.start);

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Computes the free slots of `date` within `window`.
///
/// A candidate slot is free when it overlaps none of `busy` (half-open
/// intervals, so touching does not count). The result keeps grid order.
pub fn compute_free_slots(
    date: NaiveDate,
    busy: &[TimeInterval],
    window: &WorkingWindow,
) -> Result<Vec<FreeSlot>, AvailabilityError> {
    window.validate()?;

    // Merge overlapping/adjacent busy periods; also makes input order irrelevant
    let merged_busy = merge_busy_intervals(busy);

    debug!(
        "Calculating free slots for {} ({} candidates, {} busy blocks)",
        date,
        window.slot_count(),
        merged_busy.len()
    );

    let slot_length = Duration::minutes(window.slot_duration_minutes);
    let mut free_slots = Vec::with_capacity(window.slot_count());
    for (start_minutes, end_minutes) in window.grid_offsets() {
        let (Some(start), Some(end)) = (
            local_instant(window.time_zone, date, start_minutes),
            local_instant(window.time_zone, date, end_minutes),
        ) else {
            debug!(
                "Skipping slot {} on {}: local time does not exist",
                format_label(start_minutes, end_minutes),
                date
            );
            continue;
        };
        let candidate = TimeInterval { start, end };
        // A slot spanning a DST shift is shorter or longer than the grid step
        if candidate.duration() != slot_length {
            debug!(
                "Skipping slot {} on {}: spans a DST transition",
                format_label(start_minutes, end_minutes),
                date
            );
            continue;
        }

        if merged_busy.iter().any(|busy| candidate.overlaps(busy)) {
            continue;
        }

        free_slots.push(FreeSlot {
            interval: candidate,
            label: format_label(start_minutes, end_minutes),
        });
    }
    Ok(free_slots)
}

/// Fetches the busy list for `date` from `provider` and computes the free slots.
pub async fn available_slots<P>(
    provider: &P,
    calendar_id: &str,
    date: NaiveDate,
    window: &WorkingWindow,
) -> Result<Vec<FreeSlot>, GcalError>
where
    P: CalendarProvider<Error = GcalServiceError> + ?Sized,
{
    let bounds = window.bounds(date)?;
    let busy = provider
        .fetch_busy_intervals(calendar_id, bounds.start, bounds.end)
        .await?;
    let slots = compute_free_slots(date, &busy, window)?;
    info!(
        "{} free slots on {} ({} busy intervals)",
        slots.len(),
        date,
        busy.len()
    );
    Ok(slots)
}

// --- Booking Logic ---

/// Books `request` after checking it is well-formed and still free.
///
/// Returns the provider-assigned event id.
pub async fn book_slot<P>(
    provider: &P,
    calendar_id: &str,
    request: BookingRequest,
) -> Result<String, GcalError>
where
    P: CalendarProvider<Error = GcalServiceError>
        + BookingSubmitter<Error = GcalServiceError>
        + ?Sized,
{
    let interval = request.interval().map_err(GcalServiceError::from)?;

    // Re-check right before inserting; the slot list the user saw may be stale
    let busy = provider
        .fetch_busy_intervals(calendar_id, interval.start, interval.end)
        .await?;
    if merge_busy_intervals(&busy)
        .iter()
        .any(|b| b.overlaps(&interval))
    {
        return Err(GcalServiceError::Conflict.into());
    }

    let event_id = provider.submit_booking(calendar_id, request).await?;
    info!("Booked event {} in calendar {}", event_id, calendar_id);
    Ok(event_id)
}
