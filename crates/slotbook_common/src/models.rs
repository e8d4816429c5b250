// --- File: crates/slotbook_common/src/models.rs ---
//! Value types shared between the availability logic and the service traits.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("interval start {start} is not before end {end}")]
pub struct InvalidInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A half-open time range `[start, end)`.
///
/// Used both for busy periods reported by a calendar provider and for
/// candidate slots. A well-formed interval has `start < end`; use
/// [`TimeInterval::new`] to enforce that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, InvalidInterval> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidInterval { start, end })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Half-open overlap: intervals that only touch do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Everything needed to create a booking event with a calendar provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Event title
    pub summary: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Attendee e-mail addresses
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl BookingRequest {
    pub fn interval(&self) -> Result<TimeInterval, InvalidInterval> {
        TimeInterval::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_and_inverted() {
        assert!(TimeInterval::new(at(9, 0), at(10, 0)).is_ok());
        assert!(TimeInterval::new(at(9, 0), at(9, 0)).is_err());
        let err = TimeInterval::new(at(10, 0), at(9, 0)).unwrap_err();
        assert_eq!(err.start, at(10, 0));
    }

    #[test]
    fn test_overlaps_is_half_open() {
        let nine = TimeInterval::new(at(9, 0), at(10, 0)).unwrap();
        let ten = TimeInterval::new(at(10, 0), at(11, 0)).unwrap();
        let straddle = TimeInterval::new(at(9, 30), at(10, 30)).unwrap();

        assert!(!nine.overlaps(&ten));
        assert!(!ten.overlaps(&nine));
        assert!(straddle.overlaps(&nine));
        assert!(straddle.overlaps(&ten));
        assert_eq!(straddle.duration(), Duration::minutes(60));
    }
}
