//! In-memory repository for unit testing and local development.
//!
//! All entities live in RwLock-guarded maps; IDs come from one shared
//! counter. Snapshot reads denormalize `volunteer_count` and sort by
//! (date, start time) so the layout core sees the same shape a relational
//! backend would produce.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::api::{EventId, LocationId, PositionId, ShiftId, VolunteerId};
use crate::db::repository::{
    ErrorContext, EventRepository, FullRepository, RepositoryError, RepositoryResult,
    RosterRepository, ShiftRepository,
};
use crate::models::{Event, Location, Position, PositionAssignment, Shift, ShiftAssignment, Volunteer};

#[derive(Default)]
struct Store {
    events: HashMap<i64, Event>,
    locations: HashMap<i64, Location>,
    positions: HashMap<i64, Position>,
    volunteers: HashMap<i64, Volunteer>,
    shifts: HashMap<i64, Shift>,
    position_assignments: Vec<PositionAssignment>,
    shift_assignments: Vec<ShiftAssignment>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn occupant_count(&self, shift: ShiftId) -> u32 {
        self.shift_assignments
            .iter()
            .filter(|a| a.shift == shift)
            .count() as u32
    }

    fn shift_with_count(&self, shift: &Shift) -> Shift {
        let mut out = shift.clone();
        if let Some(id) = shift.id {
            out.volunteer_count = self.occupant_count(id);
        }
        out
    }

    fn duplicate_shift_exists(&self, candidate: &Shift) -> bool {
        self.shifts.values().any(|existing| {
            existing.id != candidate.id
                && existing.event == candidate.event
                && existing.location == candidate.location
                && existing.position == candidate.position
                && existing.date == candidate.date
                && existing.start_time == candidate.start_time
        })
    }
}

/// In-memory implementation of the full repository surface.
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_by_name(volunteers: &mut [Volunteer]) {
    volunteers.sort_by(|a, b| {
        (&a.first_name, &a.last_name).cmp(&(&b.first_name, &b.last_name))
    });
}

fn sort_by_schedule(shifts: &mut [Shift]) {
    shifts.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
}

#[async_trait]
impl EventRepository for LocalRepository {
    async fn create_event(&self, mut event: Event) -> RepositoryResult<Event> {
        event.validate().map_err(|e| {
            RepositoryError::validation(e.to_string()).with_operation("create_event")
        })?;

        let mut store = self.store.write();
        let id = store.next_id();
        event.id = Some(EventId::new(id));
        store.events.insert(id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: EventId) -> RepositoryResult<Event> {
        let store = self.store.read();
        store.events.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "event does not exist",
                ErrorContext::new("get_event")
                    .with_entity("event")
                    .with_entity_id(id),
            )
        })
    }

    async fn latest_event(&self) -> RepositoryResult<Event> {
        let store = self.store.read();
        store
            .events
            .values()
            .max_by_key(|e| (e.start_date, e.id))
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "no events stored",
                    ErrorContext::new("latest_event").with_entity("event"),
                )
            })
    }

    async fn create_location(&self, mut location: Location) -> RepositoryResult<Location> {
        let mut store = self.store.write();
        if !store.events.contains_key(&location.event.value()) {
            return Err(RepositoryError::not_found_with_context(
                "owning event does not exist",
                ErrorContext::new("create_location")
                    .with_entity("event")
                    .with_entity_id(location.event),
            ));
        }

        let id = store.next_id();
        location.id = Some(LocationId::new(id));
        store.locations.insert(id, location.clone());
        Ok(location)
    }

    async fn get_location(&self, id: LocationId) -> RepositoryResult<Location> {
        let store = self.store.read();
        store.locations.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "location does not exist",
                ErrorContext::new("get_location")
                    .with_entity("location")
                    .with_entity_id(id),
            )
        })
    }

    async fn locations_for_event(&self, event: EventId) -> RepositoryResult<Vec<Location>> {
        let store = self.store.read();
        let mut locations: Vec<Location> = store
            .locations
            .values()
            .filter(|l| l.event == event)
            .cloned()
            .collect();
        locations.sort_by_key(|l| l.id);
        Ok(locations)
    }
}

#[async_trait]
impl ShiftRepository for LocalRepository {
    async fn store_shift(&self, mut shift: Shift) -> RepositoryResult<Shift> {
        let mut store = self.store.write();
        if shift.id.is_some() {
            return Err(RepositoryError::validation(
                "new shift must not carry an id; use update_shift",
            )
            .with_operation("store_shift"));
        }
        if store.duplicate_shift_exists(&shift) {
            return Err(RepositoryError::conflict_with_context(
                "a shift for this position already exists at this location and time",
                ErrorContext::new("store_shift")
                    .with_entity("shift")
                    .with_details(format!("{} {}", shift.date, shift.start_time)),
            ));
        }

        let id = store.next_id();
        shift.id = Some(ShiftId::new(id));
        shift.volunteer_count = 0;
        store.shifts.insert(id, shift.clone());
        Ok(shift)
    }

    async fn update_shift(&self, shift: Shift) -> RepositoryResult<Shift> {
        let mut store = self.store.write();
        let id = shift.id.ok_or_else(|| {
            RepositoryError::validation("shift has no id").with_operation("update_shift")
        })?;
        if !store.shifts.contains_key(&id.value()) {
            return Err(RepositoryError::not_found_with_context(
                "shift does not exist",
                ErrorContext::new("update_shift")
                    .with_entity("shift")
                    .with_entity_id(id),
            ));
        }
        if store.duplicate_shift_exists(&shift) {
            return Err(RepositoryError::conflict_with_context(
                "a shift for this position already exists at this location and time",
                ErrorContext::new("update_shift")
                    .with_entity("shift")
                    .with_entity_id(id),
            ));
        }

        store.shifts.insert(id.value(), shift.clone());
        let stored = store.shift_with_count(&shift);
        Ok(stored)
    }

    async fn delete_shift(&self, id: ShiftId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        if store.shifts.remove(&id.value()).is_none() {
            return Err(RepositoryError::not_found_with_context(
                "shift does not exist",
                ErrorContext::new("delete_shift")
                    .with_entity("shift")
                    .with_entity_id(id),
            ));
        }
        store.shift_assignments.retain(|a| a.shift != id);
        Ok(())
    }

    async fn get_shift(&self, id: ShiftId) -> RepositoryResult<Shift> {
        let store = self.store.read();
        let shift = store.shifts.get(&id.value()).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "shift does not exist",
                ErrorContext::new("get_shift")
                    .with_entity("shift")
                    .with_entity_id(id),
            )
        })?;
        Ok(store.shift_with_count(shift))
    }

    async fn shifts_for_location(
        &self,
        event: EventId,
        location: LocationId,
    ) -> RepositoryResult<Vec<Shift>> {
        let store = self.store.read();
        let mut shifts: Vec<Shift> = store
            .shifts
            .values()
            .filter(|s| s.event == event && s.location == location)
            .map(|s| store.shift_with_count(s))
            .collect();
        sort_by_schedule(&mut shifts);
        Ok(shifts)
    }

    async fn shifts_for_date(
        &self,
        event: EventId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Shift>> {
        let store = self.store.read();
        let mut shifts: Vec<Shift> = store
            .shifts
            .values()
            .filter(|s| s.event == event && s.date == date)
            .map(|s| store.shift_with_count(s))
            .collect();
        sort_by_schedule(&mut shifts);
        Ok(shifts)
    }
}

#[async_trait]
impl RosterRepository for LocalRepository {
    async fn create_volunteer(&self, mut volunteer: Volunteer) -> RepositoryResult<Volunteer> {
        let mut store = self.store.write();
        if store
            .volunteers
            .values()
            .any(|v| v.email == volunteer.email)
        {
            return Err(RepositoryError::conflict_with_context(
                "a volunteer with this email already exists",
                ErrorContext::new("create_volunteer")
                    .with_entity("volunteer")
                    .with_details(volunteer.email.clone()),
            ));
        }

        let id = store.next_id();
        volunteer.id = Some(VolunteerId::new(id));
        store.volunteers.insert(id, volunteer.clone());
        Ok(volunteer)
    }

    async fn get_volunteer(&self, id: VolunteerId) -> RepositoryResult<Volunteer> {
        let store = self.store.read();
        store.volunteers.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "volunteer does not exist",
                ErrorContext::new("get_volunteer")
                    .with_entity("volunteer")
                    .with_entity_id(id),
            )
        })
    }

    async fn list_volunteers(&self, active_only: bool) -> RepositoryResult<Vec<Volunteer>> {
        let store = self.store.read();
        let mut volunteers: Vec<Volunteer> = store
            .volunteers
            .values()
            .filter(|v| !active_only || v.is_active)
            .cloned()
            .collect();
        sort_by_name(&mut volunteers);
        Ok(volunteers)
    }

    async fn reset_notification_state(&self, volunteer: VolunteerId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let entry = store.volunteers.get_mut(&volunteer.value()).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "volunteer does not exist",
                ErrorContext::new("reset_notification_state")
                    .with_entity("volunteer")
                    .with_entity_id(volunteer),
            )
        })?;
        entry.notification_email_sent = false;
        entry.has_confirmed = false;
        Ok(())
    }

    async fn create_position(&self, mut position: Position) -> RepositoryResult<Position> {
        let mut store = self.store.write();
        if !store.events.contains_key(&position.event.value()) {
            return Err(RepositoryError::not_found_with_context(
                "owning event does not exist",
                ErrorContext::new("create_position")
                    .with_entity("event")
                    .with_entity_id(position.event),
            ));
        }

        let id = store.next_id();
        position.id = Some(PositionId::new(id));
        store.positions.insert(id, position.clone());
        Ok(position)
    }

    async fn get_position(&self, id: PositionId) -> RepositoryResult<Position> {
        let store = self.store.read();
        store.positions.get(&id.value()).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                "position does not exist",
                ErrorContext::new("get_position")
                    .with_entity("position")
                    .with_entity_id(id),
            )
        })
    }

    async fn positions_for_event(&self, event: EventId) -> RepositoryResult<Vec<Position>> {
        let store = self.store.read();
        let mut positions: Vec<Position> = store
            .positions
            .values()
            .filter(|p| p.event == event)
            .cloned()
            .collect();
        positions.sort_by_key(|p| p.id);
        Ok(positions)
    }

    async fn set_volunteer_positions(
        &self,
        volunteer: VolunteerId,
        positions: &[PositionId],
        assigned_by: Option<String>,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        if !store.volunteers.contains_key(&volunteer.value()) {
            return Err(RepositoryError::not_found_with_context(
                "volunteer does not exist",
                ErrorContext::new("set_volunteer_positions")
                    .with_entity("volunteer")
                    .with_entity_id(volunteer),
            ));
        }
        for position in positions {
            if !store.positions.contains_key(&position.value()) {
                return Err(RepositoryError::not_found_with_context(
                    "position does not exist",
                    ErrorContext::new("set_volunteer_positions")
                        .with_entity("position")
                        .with_entity_id(*position),
                ));
            }
        }

        store
            .position_assignments
            .retain(|a| a.volunteer != volunteer);
        let now = chrono::Utc::now();
        for position in positions {
            store.position_assignments.push(PositionAssignment {
                position: *position,
                volunteer,
                assigned_by: assigned_by.clone(),
                assigned_at: now,
                notes: String::new(),
            });
        }
        Ok(())
    }

    async fn positions_for_volunteer(
        &self,
        volunteer: VolunteerId,
    ) -> RepositoryResult<Vec<PositionId>> {
        let store = self.store.read();
        Ok(store
            .position_assignments
            .iter()
            .filter(|a| a.volunteer == volunteer)
            .map(|a| a.position)
            .collect())
    }

    async fn volunteers_for_position(
        &self,
        position: PositionId,
    ) -> RepositoryResult<Vec<Volunteer>> {
        let store = self.store.read();
        let mut volunteers: Vec<Volunteer> = store
            .position_assignments
            .iter()
            .filter(|a| a.position == position)
            .filter_map(|a| store.volunteers.get(&a.volunteer.value()).cloned())
            .collect();
        sort_by_name(&mut volunteers);
        Ok(volunteers)
    }

    async fn create_assignment(
        &self,
        assignment: ShiftAssignment,
    ) -> RepositoryResult<ShiftAssignment> {
        let mut store = self.store.write();
        if !store.shifts.contains_key(&assignment.shift.value()) {
            return Err(RepositoryError::not_found_with_context(
                "shift does not exist",
                ErrorContext::new("create_assignment")
                    .with_entity("shift")
                    .with_entity_id(assignment.shift),
            ));
        }
        if !store.volunteers.contains_key(&assignment.volunteer.value()) {
            return Err(RepositoryError::not_found_with_context(
                "volunteer does not exist",
                ErrorContext::new("create_assignment")
                    .with_entity("volunteer")
                    .with_entity_id(assignment.volunteer),
            ));
        }
        if store
            .shift_assignments
            .iter()
            .any(|a| a.shift == assignment.shift && a.volunteer == assignment.volunteer)
        {
            return Err(RepositoryError::conflict_with_context(
                "volunteer is already assigned to this shift",
                ErrorContext::new("create_assignment")
                    .with_entity("shift_assignment")
                    .with_entity_id(assignment.shift),
            ));
        }

        store.shift_assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(
        &self,
        shift: ShiftId,
        volunteer: VolunteerId,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let before = store.shift_assignments.len();
        store
            .shift_assignments
            .retain(|a| !(a.shift == shift && a.volunteer == volunteer));
        if store.shift_assignments.len() == before {
            return Err(RepositoryError::not_found_with_context(
                "assignment does not exist",
                ErrorContext::new("delete_assignment")
                    .with_entity("shift_assignment")
                    .with_entity_id(shift),
            ));
        }
        Ok(())
    }

    async fn assignments_for_shift(
        &self,
        shift: ShiftId,
    ) -> RepositoryResult<Vec<ShiftAssignment>> {
        let store = self.store.read();
        let mut assignments: Vec<ShiftAssignment> = store
            .shift_assignments
            .iter()
            .filter(|a| a.shift == shift)
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.assigned_at);
        Ok(assignments)
    }

    async fn shifts_for_volunteer(
        &self,
        event: EventId,
        volunteer: VolunteerId,
    ) -> RepositoryResult<Vec<Shift>> {
        let store = self.store.read();
        let mut shifts: Vec<Shift> = store
            .shift_assignments
            .iter()
            .filter(|a| a.volunteer == volunteer)
            .filter_map(|a| store.shifts.get(&a.shift.value()))
            .filter(|s| s.event == event)
            .map(|s| store.shift_with_count(s))
            .collect();
        sort_by_schedule(&mut shifts);
        Ok(shifts)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn seeded() -> (LocalRepository, Event, Location, Position) {
        let repo = LocalRepository::new();
        let event = repo
            .create_event(Event::new("Fest", date(2025, 5, 1), date(2025, 5, 3)).unwrap())
            .await
            .unwrap();
        let location = repo
            .create_location(Location::new(event.id.unwrap(), "Main hall"))
            .await
            .unwrap();
        let position = repo
            .create_position(Position::new(event.id.unwrap(), "Door"))
            .await
            .unwrap();
        (repo, event, location, position)
    }

    fn new_shift(event: &Event, location: &Location, position: &Position, h: u32) -> Shift {
        Shift {
            id: None,
            event: event.id.unwrap(),
            location: location.id.unwrap(),
            date: date(2025, 5, 1),
            start_time: time(h, 0),
            end_time: time(h + 1, 0),
            position: position.id.unwrap(),
            max_volunteers: 2,
            volunteer_count: 0,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_latest_event_picks_newest_start() {
        let repo = LocalRepository::new();
        repo.create_event(Event::new("Old", date(2024, 5, 1), date(2024, 5, 2)).unwrap())
            .await
            .unwrap();
        let newer = repo
            .create_event(Event::new("New", date(2025, 5, 1), date(2025, 5, 2)).unwrap())
            .await
            .unwrap();

        let latest = repo.latest_event().await.unwrap();
        assert_eq!(latest.id, newer.id);
    }

    #[tokio::test]
    async fn test_duplicate_shift_is_a_conflict() {
        let (repo, event, location, position) = seeded().await;
        repo.store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap();

        let err = repo
            .store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_does_not_conflict_with_itself() {
        let (repo, event, location, position) = seeded().await;
        let mut stored = repo
            .store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap();

        stored.max_volunteers = 4;
        let updated = repo.update_shift(stored).await.unwrap();
        assert_eq!(updated.max_volunteers, 4);
    }

    #[tokio::test]
    async fn test_snapshot_orders_by_date_and_start() {
        let (repo, event, location, position) = seeded().await;
        repo.store_shift(new_shift(&event, &location, &position, 14))
            .await
            .unwrap();
        repo.store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap();

        let shifts = repo
            .shifts_for_location(event.id.unwrap(), location.id.unwrap())
            .await
            .unwrap();
        assert_eq!(shifts[0].start_time, time(9, 0));
        assert_eq!(shifts[1].start_time, time(14, 0));
    }

    #[tokio::test]
    async fn test_snapshot_denormalizes_volunteer_count() {
        let (repo, event, location, position) = seeded().await;
        let shift = repo
            .store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap();
        let volunteer = repo
            .create_volunteer(Volunteer::new("Nikos", "K", "nikos@example.org"))
            .await
            .unwrap();

        repo.create_assignment(ShiftAssignment {
            shift: shift.id.unwrap(),
            volunteer: volunteer.id.unwrap(),
            assigned_by: None,
            assigned_at: Utc::now(),
            notes: String::new(),
        })
        .await
        .unwrap();

        let fetched = repo.get_shift(shift.id.unwrap()).await.unwrap();
        assert_eq!(fetched.volunteer_count, 1);
    }

    #[tokio::test]
    async fn test_duplicate_assignment_is_a_conflict() {
        let (repo, event, location, position) = seeded().await;
        let shift = repo
            .store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap();
        let volunteer = repo
            .create_volunteer(Volunteer::new("Nikos", "K", "nikos@example.org"))
            .await
            .unwrap();

        let assignment = ShiftAssignment {
            shift: shift.id.unwrap(),
            volunteer: volunteer.id.unwrap(),
            assigned_by: None,
            assigned_at: Utc::now(),
            notes: String::new(),
        };
        repo.create_assignment(assignment.clone()).await.unwrap();
        let err = repo.create_assignment(assignment).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_shift_cascades_assignments() {
        let (repo, event, location, position) = seeded().await;
        let shift = repo
            .store_shift(new_shift(&event, &location, &position, 9))
            .await
            .unwrap();
        let volunteer = repo
            .create_volunteer(Volunteer::new("Nikos", "K", "nikos@example.org"))
            .await
            .unwrap();
        repo.create_assignment(ShiftAssignment {
            shift: shift.id.unwrap(),
            volunteer: volunteer.id.unwrap(),
            assigned_by: None,
            assigned_at: Utc::now(),
            notes: String::new(),
        })
        .await
        .unwrap();

        repo.delete_shift(shift.id.unwrap()).await.unwrap();
        let remaining = repo.assignments_for_shift(shift.id.unwrap()).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_volunteer_email_is_unique() {
        let repo = LocalRepository::new();
        repo.create_volunteer(Volunteer::new("A", "One", "same@example.org"))
            .await
            .unwrap();
        let err = repo
            .create_volunteer(Volunteer::new("B", "Two", "same@example.org"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_list_volunteers_orders_and_filters() {
        let repo = LocalRepository::new();
        repo.create_volunteer(Volunteer::new("Zoe", "A", "zoe@example.org"))
            .await
            .unwrap();
        repo.create_volunteer(Volunteer::new("Anna", "B", "anna@example.org"))
            .await
            .unwrap();
        let mut inactive = Volunteer::new("Mel", "C", "mel@example.org");
        inactive.is_active = false;
        repo.create_volunteer(inactive).await.unwrap();

        let all = repo.list_volunteers(false).await.unwrap();
        let names: Vec<String> = all.iter().map(|v| v.first_name.clone()).collect();
        assert_eq!(names, vec!["Anna", "Mel", "Zoe"]);

        let active = repo.list_volunteers(true).await.unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_positions_for_event() {
        let (repo, event, _location, position) = seeded().await;
        let other = repo
            .create_event(Event::new("Other", date(2026, 1, 1), date(2026, 1, 2)).unwrap())
            .await
            .unwrap();
        repo.create_position(Position::new(other.id.unwrap(), "Stage"))
            .await
            .unwrap();

        let positions = repo.positions_for_event(event.id.unwrap()).await.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].id, position.id);
    }

    #[tokio::test]
    async fn test_eligibility_roundtrip() {
        let (repo, _event, _location, position) = seeded().await;
        let volunteer = repo
            .create_volunteer(Volunteer::new("Nikos", "K", "nikos@example.org"))
            .await
            .unwrap();

        repo.set_volunteer_positions(
            volunteer.id.unwrap(),
            &[position.id.unwrap()],
            Some("scheduler".to_string()),
        )
        .await
        .unwrap();

        let positions = repo
            .positions_for_volunteer(volunteer.id.unwrap())
            .await
            .unwrap();
        assert_eq!(positions, vec![position.id.unwrap()]);

        let eligible = repo
            .volunteers_for_position(position.id.unwrap())
            .await
            .unwrap();
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].email, "nikos@example.org");
    }
}
