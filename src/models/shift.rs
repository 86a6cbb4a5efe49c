use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::api::{EventId, LocationId, PositionId, ShiftId};
use crate::models::{Event, Location};

const SECONDS_PER_DAY: i64 = 86_400;

/// Creation-boundary validation failures for a shift.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShiftValidationError {
    #[error("shift date {date} is outside the event window {start_date}..={end_date}")]
    DateOutsideEvent {
        date: NaiveDate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[error("location {location} belongs to event {location_event}, not event {event}")]
    LocationEventMismatch {
        location: LocationId,
        location_event: EventId,
        event: EventId,
    },
}

fn default_max_volunteers() -> u32 {
    1
}

/// A time-boxed volunteer shift at one location.
///
/// The shift is anchored to `date` even when it runs past midnight: an
/// `end_time` numerically before `start_time` means the shift ends on the
/// following day. `volunteer_count` is denormalized onto snapshot reads; it
/// is not authoritative storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shift {
    #[serde(default)]
    pub id: Option<ShiftId>,
    pub event: EventId,
    pub location: LocationId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub position: PositionId,
    /// Maximum number of volunteers for this shift.
    #[serde(default = "default_max_volunteers")]
    pub max_volunteers: u32,
    /// Current occupant count, filled in on snapshot reads.
    #[serde(default)]
    pub volunteer_count: u32,
    #[serde(default)]
    pub notes: String,
}

impl Shift {
    /// Whether the shift runs past midnight into the next calendar day.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Fractional duration in hours, midnight-aware.
    pub fn duration_hours(&self) -> f64 {
        let start = self.start_time.num_seconds_from_midnight() as i64;
        let mut end = self.end_time.num_seconds_from_midnight() as i64;
        if end < start {
            end += SECONDS_PER_DAY;
        }
        (end - start) as f64 / 3600.0
    }

    /// Whether every seat on the shift is taken.
    pub fn is_full(&self) -> bool {
        self.volunteer_count >= self.max_volunteers
    }

    /// Validate the shift against its event window and location ownership.
    ///
    /// Time-of-day values are not second-guessed here: a zero-length shift is
    /// accepted and computes through the grid layout as a zero-height entry.
    pub fn validate(&self, event: &Event, location: &Location) -> Result<(), ShiftValidationError> {
        if !event.contains(self.date) {
            return Err(ShiftValidationError::DateOutsideEvent {
                date: self.date,
                start_date: event.start_date,
                end_date: event.end_date,
            });
        }
        if location.event != self.event {
            return Err(ShiftValidationError::LocationEventMismatch {
                location: self.location,
                location_event: location.event,
                event: self.event,
            });
        }
        Ok(())
    }
}
