//! Volunteer roster operations.
//!
//! Assignment writes enforce the seat rules (capacity, uniqueness, activity,
//! position eligibility) and clear the affected volunteer's notification
//! flags so the external notification collaborator knows their schedule
//! changed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::{EventId, PositionId, ShiftId, VolunteerId};
use crate::db::{FullRepository, RepositoryError};
use crate::models::{ShiftAssignment, Volunteer};

/// Errors from roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("shift is full")]
    ShiftFull,
    #[error("volunteer {0} is already assigned to this shift")]
    AlreadyAssigned(VolunteerId),
    #[error("volunteer {0} is not active")]
    VolunteerInactive(VolunteerId),
    #[error("volunteer {0} is not eligible for this shift's position")]
    NotEligible(VolunteerId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A volunteer's workload within one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolunteerStats {
    pub shift_count: usize,
    /// Total scheduled hours, midnight-aware, rounded to one decimal.
    pub total_hours: f64,
}

/// Put a volunteer on a shift.
///
/// Rejected when the shift is at capacity, the volunteer is inactive or
/// already seated, or the volunteer is not eligible for the shift's
/// position. A successful assignment clears the volunteer's notification
/// flags.
pub async fn assign_volunteer(
    repo: &dyn FullRepository,
    shift_id: ShiftId,
    volunteer_id: VolunteerId,
    assigned_by: Option<String>,
) -> Result<ShiftAssignment, RosterError> {
    let shift = repo.get_shift(shift_id).await?;
    let volunteer = repo.get_volunteer(volunteer_id).await?;

    if !volunteer.is_active {
        return Err(RosterError::VolunteerInactive(volunteer_id));
    }

    let assignments = repo.assignments_for_shift(shift_id).await?;
    if assignments.len() as u32 >= shift.max_volunteers {
        return Err(RosterError::ShiftFull);
    }
    if assignments.iter().any(|a| a.volunteer == volunteer_id) {
        return Err(RosterError::AlreadyAssigned(volunteer_id));
    }

    let eligible = repo.positions_for_volunteer(volunteer_id).await?;
    if !eligible.contains(&shift.position) {
        return Err(RosterError::NotEligible(volunteer_id));
    }

    let assignment = repo
        .create_assignment(ShiftAssignment {
            shift: shift_id,
            volunteer: volunteer_id,
            assigned_by,
            assigned_at: Utc::now(),
            notes: String::new(),
        })
        .await?;
    repo.reset_notification_state(volunteer_id).await?;

    log::info!("assigned volunteer {} to shift {}", volunteer_id, shift_id);
    Ok(assignment)
}

/// Take a volunteer off a shift and clear their notification flags.
pub async fn unassign_volunteer(
    repo: &dyn FullRepository,
    shift_id: ShiftId,
    volunteer_id: VolunteerId,
) -> Result<(), RosterError> {
    repo.delete_assignment(shift_id, volunteer_id).await?;
    repo.reset_notification_state(volunteer_id).await?;

    log::info!(
        "removed volunteer {} from shift {}",
        volunteer_id,
        shift_id
    );
    Ok(())
}

/// Active volunteers who could take a seat on this shift: eligible for its
/// position and not already assigned, ordered by first then last name.
pub async fn eligible_volunteers(
    repo: &dyn FullRepository,
    shift_id: ShiftId,
) -> Result<Vec<Volunteer>, RosterError> {
    let shift = repo.get_shift(shift_id).await?;
    let assignments = repo.assignments_for_shift(shift_id).await?;

    let candidates = repo.volunteers_for_position(shift.position).await?;
    let available = candidates
        .into_iter()
        .filter(|v| v.is_active)
        .filter(|v| {
            v.id.map(|id| !assignments.iter().any(|a| a.volunteer == id))
                .unwrap_or(false)
        })
        .collect();
    Ok(available)
}

/// Shift count and total hours for a volunteer within one event.
pub async fn volunteer_stats(
    repo: &dyn FullRepository,
    event_id: EventId,
    volunteer_id: VolunteerId,
) -> Result<VolunteerStats, RosterError> {
    let shifts = repo.shifts_for_volunteer(event_id, volunteer_id).await?;

    let total: f64 = shifts.iter().map(|s| s.duration_hours()).sum();
    Ok(VolunteerStats {
        shift_count: shifts.len(),
        total_hours: (total * 10.0).round() / 10.0,
    })
}

/// Replace a volunteer's position eligibility set.
pub async fn set_volunteer_positions(
    repo: &dyn FullRepository,
    volunteer_id: VolunteerId,
    positions: &[PositionId],
    assigned_by: Option<String>,
) -> Result<(), RosterError> {
    repo.set_volunteer_positions(volunteer_id, positions, assigned_by)
        .await?;
    log::info!(
        "volunteer {} now eligible for {} positions",
        volunteer_id,
        positions.len()
    );
    Ok(())
}
