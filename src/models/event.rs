use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{EventId, LocationId};

/// Error raised when an event window is inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event end date {end_date} is before start date {start_date}")]
pub struct EventWindowError {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A multi-day event with a fixed calendar window.
///
/// Shifts are only valid on dates inside `start_date..=end_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(default)]
    pub id: Option<EventId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, EventWindowError> {
        let event = Self {
            id: None,
            name: name.into(),
            description: String::new(),
            start_date,
            end_date,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), EventWindowError> {
        if self.end_date < self.start_date {
            return Err(EventWindowError {
                start_date: self.start_date,
                end_date: self.end_date,
            });
        }
        Ok(())
    }

    /// Every calendar date of the event, inclusive, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut current = self.start_date;
        while current <= self.end_date {
            dates.push(current);
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
        dates
    }

    /// Whether a date falls inside the event window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A physical location where shifts take place, owned by one event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub id: Option<LocationId>,
    pub event: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
}

impl Location {
    pub fn new(event: EventId, name: impl Into<String>) -> Self {
        Self {
            id: None,
            event,
            name: name.into(),
            description: String::new(),
            address: String::new(),
        }
    }
}
