use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{EventId, PositionId, ShiftId, VolunteerId};

/// Color theme for a position badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionColor {
    Slate,
    Gray,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    #[default]
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

/// A duty category volunteers can be scheduled into (door, bar, DJ, ...).
///
/// Distinct from the physical location; the grid layout uses the position
/// for column stickiness so a role stays in the same visual lane.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    #[serde(default)]
    pub id: Option<PositionId>,
    pub event: EventId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: PositionColor,
}

impl Position {
    pub fn new(event: EventId, name: impl Into<String>) -> Self {
        Self {
            id: None,
            event,
            name: name.into(),
            description: String::new(),
            color: PositionColor::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A volunteer on the roster.
///
/// `notification_email_sent` and `has_confirmed` track the external
/// notification collaborator's state; both are cleared whenever the
/// volunteer's assignments change so stale confirmations never survive a
/// reschedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volunteer {
    #[serde(default)]
    pub id: Option<VolunteerId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub notification_email_sent: bool,
    #[serde(default)]
    pub has_confirmed: bool,
}

impl Volunteer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: String::new(),
            notes: String::new(),
            is_active: true,
            notification_email_sent: false,
            has_confirmed: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Eligibility record: a volunteer may work shifts of this position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionAssignment {
    pub position: PositionId,
    pub volunteer: VolunteerId,
    #[serde(default)]
    pub assigned_by: Option<String>,
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

/// An occupied seat on a shift. Unique per (shift, volunteer).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShiftAssignment {
    pub shift: ShiftId,
    pub volunteer: VolunteerId,
    #[serde(default)]
    pub assigned_by: Option<String>,
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}
