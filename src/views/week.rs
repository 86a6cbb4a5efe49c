//! Week view: one location, every event day side by side.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::{EventId, LocationId};
use crate::db::FullRepository;
use crate::models::{DayGrid, InvalidHourError, Location, Shift, TimeSlot};
use crate::services::grid::position_shifts;
use crate::services::overlap::assign_columns;
use crate::views::{bucket_by_start_label, HourBuckets};

/// Week view dataset, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekViewData {
    /// Every date of the event window, in order.
    pub dates: Vec<NaiveDate>,
    /// The grid header slots.
    pub slots: Vec<TimeSlot>,
    /// All locations of the event, for the location picker.
    pub locations: Vec<Location>,
    /// The location whose shifts are shown, if the event has any.
    pub selected_location: Option<LocationId>,
    pub shifts_by_date: BTreeMap<NaiveDate, HourBuckets>,
}

/// Group a snapshot by anchor date and starting-time label.
///
/// Layout and overlap resolution run per date bucket, so each rendered day
/// column gets its own consistent width. Shifts crossing midnight stay under
/// their start date.
pub fn by_date_and_hour(
    shifts: &[Shift],
    grid: &DayGrid,
) -> Result<BTreeMap<NaiveDate, HourBuckets>, InvalidHourError> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        by_date.entry(shift.date).or_default().push(shift.clone());
    }

    let mut result = BTreeMap::new();
    for (date, day_shifts) in by_date {
        let mut positioned = position_shifts(&day_shifts, grid)?;
        assign_columns(&mut positioned);
        result.insert(date, bucket_by_start_label(positioned));
    }
    Ok(result)
}

/// Assemble the week view for one location of an event.
///
/// An unknown or absent requested location falls back to the event's first
/// location; an event without locations renders an empty grid.
pub async fn week_view(
    repo: &dyn FullRepository,
    event_id: EventId,
    location: Option<LocationId>,
    grid: &DayGrid,
) -> anyhow::Result<WeekViewData> {
    let event = repo.get_event(event_id).await?;
    let locations = repo.locations_for_event(event_id).await?;

    let selected = match location {
        Some(requested) => locations
            .iter()
            .find(|l| l.id == Some(requested))
            .or_else(|| locations.first())
            .cloned(),
        None => locations.first().cloned(),
    };

    let shifts = match selected.as_ref().and_then(|l| l.id) {
        Some(location_id) => repo.shifts_for_location(event_id, location_id).await?,
        None => Vec::new(),
    };

    log::debug!(
        "week view for event {}: {} shifts at location {:?}",
        event_id,
        shifts.len(),
        selected.as_ref().map(|l| l.name.as_str())
    );

    let shifts_by_date = by_date_and_hour(&shifts, grid)?;

    Ok(WeekViewData {
        dates: event.dates(),
        slots: grid.slots().to_vec(),
        selected_location: selected.as_ref().and_then(|l| l.id),
        locations,
        shifts_by_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PositionId, ShiftId};
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shift(id: i64, day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Shift {
        Shift {
            id: Some(ShiftId::new(id)),
            event: EventId::new(1),
            location: LocationId::new(1),
            date: day,
            start_time: start,
            end_time: end,
            position: PositionId::new(id),
            max_volunteers: 1,
            volunteer_count: 0,
            notes: String::new(),
        }
    }

    #[test]
    fn test_groups_by_anchor_date() {
        let grid = DayGrid::default();
        let shifts = vec![
            shift(1, date(2025, 5, 1), time(9, 0), time(12, 0)),
            shift(2, date(2025, 5, 2), time(9, 0), time(12, 0)),
            shift(3, date(2025, 5, 1), time(14, 0), time(16, 0)),
        ];

        let by_date = by_date_and_hour(&shifts, &grid).unwrap();

        assert_eq!(by_date.len(), 2);
        assert_eq!(by_date[&date(2025, 5, 1)].len(), 2);
        assert_eq!(by_date[&date(2025, 5, 2)].len(), 1);
    }

    #[test]
    fn test_midnight_crossing_stays_under_start_date() {
        let grid = DayGrid::default();
        let shifts = vec![shift(1, date(2025, 5, 1), time(23, 30), time(2, 0))];

        let by_date = by_date_and_hour(&shifts, &grid).unwrap();

        assert_eq!(by_date.len(), 1);
        let day = &by_date[&date(2025, 5, 1)];
        assert!(day.contains_key("23:30"));
        assert!(!by_date.contains_key(&date(2025, 5, 2)));
    }

    #[test]
    fn test_start_label_includes_minutes() {
        let grid = DayGrid::default();
        let shifts = vec![shift(1, date(2025, 5, 1), time(9, 30), time(11, 0))];

        let by_date = by_date_and_hour(&shifts, &grid).unwrap();
        let day = &by_date[&date(2025, 5, 1)];

        assert!(day.contains_key("09:30"));
        assert!(!day.contains_key("09:00"));
    }

    #[test]
    fn test_date_keys_serialize_as_iso_strings() {
        let grid = DayGrid::default();
        let shifts = vec![shift(1, date(2025, 5, 1), time(23, 30), time(2, 0))];

        let by_date = by_date_and_hour(&shifts, &grid).unwrap();
        let json = serde_json::to_value(&by_date).unwrap();

        assert!(json.get("2025-05-01").is_some());
        assert!(json.get("2025-05-02").is_none());
        assert!(json["2025-05-01"].get("23:30").is_some());
    }

    #[test]
    fn test_columns_resolved_per_date() {
        let grid = DayGrid::default();
        // Overlap on May 1st only; May 2nd stays single-column.
        let shifts = vec![
            shift(1, date(2025, 5, 1), time(9, 0), time(11, 0)),
            shift(2, date(2025, 5, 1), time(10, 0), time(12, 0)),
            shift(3, date(2025, 5, 2), time(9, 0), time(11, 0)),
        ];

        let by_date = by_date_and_hour(&shifts, &grid).unwrap();

        let first_day: Vec<_> = by_date[&date(2025, 5, 1)].values().flatten().collect();
        assert!(first_day.iter().all(|p| p.total_columns == 2));

        let second_day: Vec<_> = by_date[&date(2025, 5, 2)].values().flatten().collect();
        assert!(second_day.iter().all(|p| p.total_columns == 1));
    }

    #[test]
    fn test_empty_snapshot() {
        let grid = DayGrid::default();
        let by_date = by_date_and_hour(&[], &grid).unwrap();
        assert!(by_date.is_empty());
    }
}
