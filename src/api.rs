//! Public API surface for the scheduling library.
//!
//! This file consolidates the identifier newtypes and re-exports the DTO
//! types produced for the rendering collaborator. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::services::grid::PositionedShift;
pub use crate::views::day::DayViewData;
pub use crate::views::week::WeekViewData;
pub use crate::views::HourBuckets;

pub use crate::models::{DayGrid, InvalidHourError, TimeSlot};

use crate::define_id_type;

define_id_type!(i64, EventId);
define_id_type!(i64, LocationId);
define_id_type!(i64, PositionId);
define_id_type!(i64, VolunteerId);
define_id_type!(i64, ShiftId);
