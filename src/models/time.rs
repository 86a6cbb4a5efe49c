use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Number of hour slots in a day window.
pub const SLOTS_PER_DAY: usize = 24;

/// Hour at which the day window opens when nothing else is configured.
/// The visible day runs 06:00 through 05:00 the next morning.
pub const DEFAULT_DAY_START_HOUR: u32 = 6;

/// Error returned when an hour outside 0–23 reaches the slot lookup.
///
/// Out-of-range hours are surfaced, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("hour {0} is outside the valid range 0..=23")]
pub struct InvalidHourError(pub u32);

/// One hour slot on the vertical axis of a calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    hour: u32,
}

impl TimeSlot {
    pub(crate) fn new(hour: u32) -> Self {
        Self { hour }
    }

    /// Hour of day (0–23).
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Zero-padded `"HH:MM"` label for the grid header.
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }

    /// The slot as a time-of-day value.
    pub fn as_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// The wrap-around day window of a calendar grid.
///
/// Holds the ordered sequence `[start_hour, .., 23, 0, .., start_hour - 1]`
/// of 24 slots and the inverse mapping from hour to row index. This mapping
/// is the single source of truth for "row 1 = start_hour:00"; any change to
/// the day-window boundary flows through here.
#[derive(Debug, Clone)]
pub struct DayGrid {
    start_hour: u32,
    slots: Vec<TimeSlot>,
    index_by_hour: [usize; SLOTS_PER_DAY],
}

impl DayGrid {
    /// Build a day window opening at `start_hour`.
    pub fn new(start_hour: u32) -> Result<Self, InvalidHourError> {
        if start_hour >= SLOTS_PER_DAY as u32 {
            return Err(InvalidHourError(start_hour));
        }

        let slots: Vec<TimeSlot> = (0..SLOTS_PER_DAY as u32)
            .map(|offset| TimeSlot::new((start_hour + offset) % SLOTS_PER_DAY as u32))
            .collect();

        let mut index_by_hour = [0usize; SLOTS_PER_DAY];
        for (idx, slot) in slots.iter().enumerate() {
            index_by_hour[slot.hour() as usize] = idx;
        }

        Ok(Self {
            start_hour,
            slots,
            index_by_hour,
        })
    }

    /// Hour at which the window opens.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// The ordered slot sequence, for rendering the grid header.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Row index (0-based) of an hour within the window.
    pub fn slot_index(&self, hour: u32) -> Result<usize, InvalidHourError> {
        self.index_by_hour
            .get(hour as usize)
            .copied()
            .ok_or(InvalidHourError(hour))
    }
}

impl Default for DayGrid {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_START_HOUR).expect("default start hour is a valid hour")
    }
}
