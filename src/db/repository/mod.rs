//! Repository trait definitions.
//!
//! These traits are the storage collaborator boundary: the scheduling and
//! view services only ever see these interfaces, and each invocation fetches
//! its own snapshot through them. Implementations must be `Send + Sync`.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{EventId, LocationId, PositionId, ShiftId, VolunteerId};
use crate::models::{Event, Location, Position, Shift, ShiftAssignment, Volunteer};

/// Repository trait for events and their locations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Store a new event, returning it with its assigned ID.
    async fn create_event(&self, event: Event) -> RepositoryResult<Event>;

    /// Fetch an event by ID.
    async fn get_event(&self, id: EventId) -> RepositoryResult<Event>;

    /// The current event: the one with the newest start date.
    async fn latest_event(&self) -> RepositoryResult<Event>;

    /// Store a new location, returning it with its assigned ID.
    async fn create_location(&self, location: Location) -> RepositoryResult<Location>;

    /// Fetch a location by ID.
    async fn get_location(&self, id: LocationId) -> RepositoryResult<Location>;

    /// All locations belonging to an event, in insertion order.
    async fn locations_for_event(&self, event: EventId) -> RepositoryResult<Vec<Location>>;
}

/// Repository trait for shift storage and snapshot reads.
///
/// Snapshot reads return shifts ordered by (date, start time) with
/// `volunteer_count` denormalized onto each row, so the grid core never has
/// to join assignments itself.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Store a new shift, returning it with its assigned ID.
    ///
    /// Duplicate shifts (same event, location, position, date and start
    /// time) are rejected with a conflict.
    async fn store_shift(&self, shift: Shift) -> RepositoryResult<Shift>;

    /// Replace an existing shift. Duplicate detection excludes the shift
    /// itself.
    async fn update_shift(&self, shift: Shift) -> RepositoryResult<Shift>;

    /// Delete a shift and its assignments.
    async fn delete_shift(&self, id: ShiftId) -> RepositoryResult<()>;

    /// Fetch a shift by ID with `volunteer_count` filled in.
    async fn get_shift(&self, id: ShiftId) -> RepositoryResult<Shift>;

    /// Snapshot of one location's shifts across the whole event (week view).
    async fn shifts_for_location(
        &self,
        event: EventId,
        location: LocationId,
    ) -> RepositoryResult<Vec<Shift>>;

    /// Snapshot of one date's shifts across all locations (day view).
    async fn shifts_for_date(
        &self,
        event: EventId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Shift>>;
}

/// Repository trait for volunteers, positions and assignments.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Store a new volunteer, returning them with their assigned ID.
    async fn create_volunteer(&self, volunteer: Volunteer) -> RepositoryResult<Volunteer>;

    /// Fetch a volunteer by ID.
    async fn get_volunteer(&self, id: VolunteerId) -> RepositoryResult<Volunteer>;

    /// All volunteers, ordered by first then last name.
    async fn list_volunteers(&self, active_only: bool) -> RepositoryResult<Vec<Volunteer>>;

    /// Clear a volunteer's notification and confirmation flags.
    ///
    /// Called whenever the volunteer's assignments change, so a previously
    /// sent notification no longer counts.
    async fn reset_notification_state(&self, volunteer: VolunteerId) -> RepositoryResult<()>;

    /// Store a new position, returning it with its assigned ID.
    async fn create_position(&self, position: Position) -> RepositoryResult<Position>;

    /// Fetch a position by ID.
    async fn get_position(&self, id: PositionId) -> RepositoryResult<Position>;

    /// All positions belonging to an event, in insertion order.
    async fn positions_for_event(&self, event: EventId) -> RepositoryResult<Vec<Position>>;

    /// Replace a volunteer's position eligibility set.
    async fn set_volunteer_positions(
        &self,
        volunteer: VolunteerId,
        positions: &[PositionId],
        assigned_by: Option<String>,
    ) -> RepositoryResult<()>;

    /// Positions a volunteer is eligible to work.
    async fn positions_for_volunteer(
        &self,
        volunteer: VolunteerId,
    ) -> RepositoryResult<Vec<PositionId>>;

    /// Volunteers eligible for a position, ordered by first then last name.
    async fn volunteers_for_position(
        &self,
        position: PositionId,
    ) -> RepositoryResult<Vec<Volunteer>>;

    /// Record a volunteer taking a seat on a shift.
    ///
    /// A second assignment for the same (shift, volunteer) is a conflict.
    async fn create_assignment(
        &self,
        assignment: ShiftAssignment,
    ) -> RepositoryResult<ShiftAssignment>;

    /// Remove a volunteer from a shift.
    async fn delete_assignment(
        &self,
        shift: ShiftId,
        volunteer: VolunteerId,
    ) -> RepositoryResult<()>;

    /// All assignments on a shift, oldest first.
    async fn assignments_for_shift(
        &self,
        shift: ShiftId,
    ) -> RepositoryResult<Vec<ShiftAssignment>>;

    /// Shifts a volunteer is assigned to within an event.
    async fn shifts_for_volunteer(
        &self,
        event: EventId,
        volunteer: VolunteerId,
    ) -> RepositoryResult<Vec<Shift>>;
}

/// The complete storage collaborator surface.
#[async_trait]
pub trait FullRepository:
    EventRepository + ShiftRepository + RosterRepository + Send + Sync
{
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
