//! Shift write operations.
//!
//! These functions sit between the host application and the repository:
//! they validate a shift against its event window and location ownership
//! before writing, and keep volunteer notification state honest when shifts
//! disappear.

use chrono::NaiveTime;

use crate::api::ShiftId;
use crate::db::{FullRepository, RepositoryError};
use crate::models::{Shift, ShiftValidationError};

/// Errors from shift write operations.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ShiftValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Validate and store a new shift.
///
/// Duplicate shifts (same event, location, position, date, start time) are
/// rejected by the repository with a conflict.
pub async fn store_shift(
    repo: &dyn FullRepository,
    shift: Shift,
) -> Result<Shift, ScheduleError> {
    let event = repo.get_event(shift.event).await?;
    let location = repo.get_location(shift.location).await?;
    shift.validate(&event, &location)?;

    let stored = repo.store_shift(shift).await?;
    log::info!(
        "stored shift {:?} on {} {}-{}",
        stored.id,
        stored.date,
        stored.start_time,
        stored.end_time
    );
    Ok(stored)
}

/// Validate and replace an existing shift.
pub async fn update_shift(
    repo: &dyn FullRepository,
    shift: Shift,
) -> Result<Shift, ScheduleError> {
    let event = repo.get_event(shift.event).await?;
    let location = repo.get_location(shift.location).await?;
    shift.validate(&event, &location)?;

    let updated = repo.update_shift(shift).await?;
    log::info!("updated shift {:?}", updated.id);
    Ok(updated)
}

/// Delete a shift.
///
/// Assigned volunteers get their notification flags cleared: whatever they
/// were told about their schedule no longer holds.
pub async fn delete_shift(repo: &dyn FullRepository, id: ShiftId) -> Result<(), ScheduleError> {
    let assignments = repo.assignments_for_shift(id).await?;
    repo.delete_shift(id).await?;

    for assignment in &assignments {
        repo.reset_notification_state(assignment.volunteer).await?;
    }
    log::info!(
        "deleted shift {} ({} assignments released)",
        id,
        assignments.len()
    );
    Ok(())
}

/// Proposed end time for a new shift: one hour after the start, wrapping at
/// midnight.
pub fn default_end_time(start: NaiveTime) -> NaiveTime {
    start.overflowing_add_signed(chrono::Duration::hours(1)).0
}
