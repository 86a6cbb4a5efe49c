mod support;

use support::{date, stage, time};

use rota_rust::db::RosterRepository;
use rota_rust::models::Volunteer;
use rota_rust::services::roster::{
    assign_volunteer, eligible_volunteers, set_volunteer_positions, unassign_volunteer,
    volunteer_stats, RosterError,
};
use rota_rust::services::scheduling::store_shift;

#[tokio::test]
async fn test_assignment_lifecycle() {
    let stage = stage().await;
    let shift = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 1),
            time(9, 0),
            time(12, 0),
            2,
        ),
    )
    .await
    .unwrap();
    let shift_id = shift.id.unwrap();

    let maria = stage.add_volunteer("Maria", "P", "maria@example.org").await;
    let maria_id = maria.id.unwrap();
    set_volunteer_positions(&stage.repo, maria_id, &[stage.door.id.unwrap()], None)
        .await
        .unwrap();

    let assignment = assign_volunteer(&stage.repo, shift_id, maria_id, Some("admin".into()))
        .await
        .unwrap();
    assert_eq!(assignment.volunteer, maria_id);

    // Assigning twice is rejected.
    let err = assign_volunteer(&stage.repo, shift_id, maria_id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::AlreadyAssigned(_)));

    unassign_volunteer(&stage.repo, shift_id, maria_id)
        .await
        .unwrap();
    let remaining = stage.repo.assignments_for_shift(shift_id).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_capacity_is_enforced() {
    let stage = stage().await;
    let shift = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 1),
            time(9, 0),
            time(12, 0),
            1,
        ),
    )
    .await
    .unwrap();
    let shift_id = shift.id.unwrap();
    let door = stage.door.id.unwrap();

    let maria = stage.add_volunteer("Maria", "P", "maria@example.org").await;
    let nikos = stage.add_volunteer("Nikos", "K", "nikos@example.org").await;
    set_volunteer_positions(&stage.repo, maria.id.unwrap(), &[door], None)
        .await
        .unwrap();
    set_volunteer_positions(&stage.repo, nikos.id.unwrap(), &[door], None)
        .await
        .unwrap();

    assign_volunteer(&stage.repo, shift_id, maria.id.unwrap(), None)
        .await
        .unwrap();
    let err = assign_volunteer(&stage.repo, shift_id, nikos.id.unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::ShiftFull));
}

#[tokio::test]
async fn test_eligibility_and_activity_are_enforced() {
    let stage = stage().await;
    let shift = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 1),
            time(9, 0),
            time(12, 0),
            3,
        ),
    )
    .await
    .unwrap();
    let shift_id = shift.id.unwrap();

    // Eligible for the bar, not the door.
    let maria = stage.add_volunteer("Maria", "P", "maria@example.org").await;
    set_volunteer_positions(&stage.repo, maria.id.unwrap(), &[stage.bar.id.unwrap()], None)
        .await
        .unwrap();
    let err = assign_volunteer(&stage.repo, shift_id, maria.id.unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::NotEligible(_)));

    // Inactive volunteers cannot take seats regardless of eligibility.
    let mut retired = Volunteer::new("Old", "Hand", "old@example.org");
    retired.is_active = false;
    let retired = stage.repo.create_volunteer(retired).await.unwrap();
    set_volunteer_positions(
        &stage.repo,
        retired.id.unwrap(),
        &[stage.door.id.unwrap()],
        None,
    )
    .await
    .unwrap();
    let err = assign_volunteer(&stage.repo, shift_id, retired.id.unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RosterError::VolunteerInactive(_)));
}

#[tokio::test]
async fn test_assignment_changes_reset_notification_state() {
    let stage = stage().await;
    let shift = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 1),
            time(9, 0),
            time(12, 0),
            2,
        ),
    )
    .await
    .unwrap();

    // A volunteer who was already notified and confirmed.
    let mut notified = Volunteer::new("Maria", "P", "maria@example.org");
    notified.notification_email_sent = true;
    notified.has_confirmed = true;
    let maria = stage.repo.create_volunteer(notified).await.unwrap();
    let maria_id = maria.id.unwrap();
    set_volunteer_positions(&stage.repo, maria_id, &[stage.door.id.unwrap()], None)
        .await
        .unwrap();

    assign_volunteer(&stage.repo, shift.id.unwrap(), maria_id, None)
        .await
        .unwrap();

    let refreshed = stage.repo.get_volunteer(maria_id).await.unwrap();
    assert!(!refreshed.notification_email_sent);
    assert!(!refreshed.has_confirmed);
}

#[tokio::test]
async fn test_eligible_volunteers_excludes_assigned_and_inactive() {
    let stage = stage().await;
    let shift = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 1),
            time(9, 0),
            time(12, 0),
            2,
        ),
    )
    .await
    .unwrap();
    let shift_id = shift.id.unwrap();
    let door = stage.door.id.unwrap();

    let maria = stage.add_volunteer("Maria", "P", "maria@example.org").await;
    let nikos = stage.add_volunteer("Nikos", "K", "nikos@example.org").await;
    set_volunteer_positions(&stage.repo, maria.id.unwrap(), &[door], None)
        .await
        .unwrap();
    set_volunteer_positions(&stage.repo, nikos.id.unwrap(), &[door], None)
        .await
        .unwrap();

    assign_volunteer(&stage.repo, shift_id, maria.id.unwrap(), None)
        .await
        .unwrap();

    let available = eligible_volunteers(&stage.repo, shift_id).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, nikos.id);
}

#[tokio::test]
async fn test_volunteer_stats_are_midnight_aware() {
    let stage = stage().await;
    let door = stage.door.id.unwrap();

    let morning = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 1),
            time(9, 0),
            time(12, 0),
            1,
        ),
    )
    .await
    .unwrap();
    let late = store_shift(
        &stage.repo,
        stage.draft_shift(
            &stage.main_hall,
            &stage.door,
            date(2025, 5, 2),
            time(22, 0),
            time(2, 0),
            1,
        ),
    )
    .await
    .unwrap();

    let maria = stage.add_volunteer("Maria", "P", "maria@example.org").await;
    let maria_id = maria.id.unwrap();
    set_volunteer_positions(&stage.repo, maria_id, &[door], None)
        .await
        .unwrap();
    assign_volunteer(&stage.repo, morning.id.unwrap(), maria_id, None)
        .await
        .unwrap();
    assign_volunteer(&stage.repo, late.id.unwrap(), maria_id, None)
        .await
        .unwrap();

    let stats = volunteer_stats(&stage.repo, stage.event.id.unwrap(), maria_id)
        .await
        .unwrap();
    assert_eq!(stats.shift_count, 2);
    // 3 hours + 4 hours across midnight.
    assert_eq!(stats.total_hours, 7.0);
}
