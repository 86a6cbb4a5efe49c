//! Day view: one date, every location side by side.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{EventId, LocationId};
use crate::db::FullRepository;
use crate::models::{DayGrid, InvalidHourError, Location, Shift, TimeSlot};
use crate::services::grid::position_shifts;
use crate::services::overlap::assign_columns;
use crate::views::{bucket_by_start_label, HourBuckets};

/// Day view dataset, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayViewData {
    pub date: NaiveDate,
    /// The grid header slots.
    pub slots: Vec<TimeSlot>,
    /// All locations of the event, one rendered column group each.
    pub locations: Vec<Location>,
    pub shifts_by_location: BTreeMap<LocationId, HourBuckets>,
    /// Day navigation, clamped to the event window.
    pub show_prev: bool,
    pub show_next: bool,
    pub prev_day: Option<NaiveDate>,
    pub next_day: Option<NaiveDate>,
}

/// Group a single-date snapshot by location and starting-time label.
///
/// Every shift in the snapshot is expected to share one anchor date; layout
/// and overlap resolution run per location so each location block gets its
/// own consistent width.
pub fn by_location_and_hour(
    shifts: &[Shift],
    grid: &DayGrid,
) -> Result<BTreeMap<LocationId, HourBuckets>, InvalidHourError> {
    let mut by_location: BTreeMap<LocationId, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        by_location
            .entry(shift.location)
            .or_default()
            .push(shift.clone());
    }

    let mut result = BTreeMap::new();
    for (location, location_shifts) in by_location {
        let mut positioned = position_shifts(&location_shifts, grid)?;
        assign_columns(&mut positioned);
        result.insert(location, bucket_by_start_label(positioned));
    }
    Ok(result)
}

/// Assemble the day view for one date of an event.
pub async fn day_view(
    repo: &dyn FullRepository,
    event_id: EventId,
    date: NaiveDate,
    grid: &DayGrid,
) -> anyhow::Result<DayViewData> {
    let event = repo.get_event(event_id).await?;
    let locations = repo.locations_for_event(event_id).await?;
    let shifts = repo.shifts_for_date(event_id, date).await?;

    log::debug!(
        "day view for event {} on {}: {} shifts across {} locations",
        event_id,
        date,
        shifts.len(),
        locations.len()
    );

    let shifts_by_location = by_location_and_hour(&shifts, grid)?;

    let prev_day = date.pred_opt();
    let next_day = date.succ_opt();
    let show_prev = prev_day.is_some_and(|d| d >= event.start_date);
    let show_next = next_day.is_some_and(|d| d <= event.end_date);

    Ok(DayViewData {
        date,
        slots: grid.slots().to_vec(),
        locations,
        shifts_by_location,
        show_prev,
        show_next,
        prev_day,
        next_day,
    })
}
