//! Shift grid placement.
//!
//! Converts a shift's start/end time-of-day into a fractional row position
//! on the wrap-around day window. All arithmetic happens in "grid time":
//! hours are shifted by +24 where needed so that a shift crossing midnight,
//! or starting before the window boundary, lands on the correct rows of its
//! anchor day. A 02:00 shift on a window starting at 06:00 is treated as
//! hour 26.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::models::{DayGrid, InvalidHourError, Shift, SLOTS_PER_DAY};

const MINUTES_PER_HOUR: i64 = 60;

/// A shift with its computed grid placement.
///
/// The placement fields are derived per request and never persisted:
/// `row_start` is 1-based and fractional (row 1 = the window's first slot),
/// `row_span` is the duration in fractional hours, and `column` /
/// `total_columns` come out of the overlap resolution pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionedShift {
    pub shift: Shift,
    pub row_start: f64,
    pub row_span: f64,
    pub column: usize,
    pub total_columns: usize,
    /// Start of the shift in grid-time minutes, for overlap comparisons.
    #[serde(skip)]
    pub(crate) grid_start_min: i64,
    /// End of the shift in grid-time minutes.
    #[serde(skip)]
    pub(crate) grid_end_min: i64,
}

/// Start/end of a shift in grid-time minutes.
///
/// Both values live in one consistent numeric frame so that comparisons
/// across midnight are unambiguous: without it, a shift ending at 01:00
/// would appear to end before one starting at 23:00.
fn grid_time_minutes(shift: &Shift, grid: &DayGrid) -> (i64, i64) {
    let mut start_hour = shift.start_time.hour() as i64;
    let start_minute = shift.start_time.minute() as i64;
    let mut end_hour = shift.end_time.hour() as i64;
    let end_minute = shift.end_time.minute() as i64;

    // An end time-of-day before the start signals a midnight crossing.
    if shift.end_time < shift.start_time {
        end_hour += SLOTS_PER_DAY as i64;
    }

    // Hours before the window boundary belong to the tail of the anchor day.
    let boundary = grid.start_hour() as i64;
    if start_hour < boundary {
        start_hour += SLOTS_PER_DAY as i64;
    }
    if end_hour < boundary {
        end_hour += SLOTS_PER_DAY as i64;
    }

    (
        start_hour * MINUTES_PER_HOUR + start_minute,
        end_hour * MINUTES_PER_HOUR + end_minute,
    )
}

/// Compute the grid placement for a single shift.
///
/// Zero-duration shifts come out with `row_span == 0`; the caller may apply
/// a minimum rendered height but the computed value stays exact.
pub fn position_shift(shift: &Shift, grid: &DayGrid) -> Result<PositionedShift, InvalidHourError> {
    let (grid_start_min, grid_end_min) = grid_time_minutes(shift, grid);

    let start_hour = (grid_start_min / MINUTES_PER_HOUR) % SLOTS_PER_DAY as i64;
    let start_minute = grid_start_min % MINUTES_PER_HOUR;

    let row_start =
        grid.slot_index(start_hour as u32)? as f64 + 1.0 + start_minute as f64 / MINUTES_PER_HOUR as f64;
    let row_span = (grid_end_min - grid_start_min) as f64 / MINUTES_PER_HOUR as f64;

    Ok(PositionedShift {
        shift: shift.clone(),
        row_start,
        row_span,
        column: 0,
        total_columns: 0,
        grid_start_min,
        grid_end_min,
    })
}

/// Compute grid placements for a whole snapshot, preserving input order.
pub fn position_shifts(
    shifts: &[Shift],
    grid: &DayGrid,
) -> Result<Vec<PositionedShift>, InvalidHourError> {
    shifts.iter().map(|shift| position_shift(shift, grid)).collect()
}
