//! Integration tests for shift, staff, driver and user administration.

mod common;

use assert_matches::assert_matches;
use common::{at, seed_driver, seed_request, seed_shift, seed_user, status_of};
use pickup_db::models::driver::DriverInput;
use pickup_db::models::shift::ShiftPatch;
use pickup_db::models::status::{RequestStatus, ShiftStatus, UserRole};
use pickup_db::repositories::{ShiftRepo, ShiftStaffRepo};
use pickup_scheduler::{SchedulerError, ShiftAdminService};
use sqlx::PgPool;

fn driver_input(seats: i32) -> DriverInput {
    DriverInput {
        name: "Zhao".to_string(),
        car_model: "Alphard".to_string(),
        max_seats: seats,
        max_checked: 4,
        max_carry_on: 4,
    }
}

// ---------------------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_shift_starts_as_draft(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let admin = ShiftAdminService::new(pool.clone());

    let shift = admin.create_shift(driver.id, at(14, 0)).await.unwrap();

    assert_eq!(shift.status, ShiftStatus::Draft);
    assert_eq!(shift.departure_time, at(14, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_shift_unknown_driver(pool: PgPool) {
    let err = ShiftAdminService::new(pool.clone())
        .create_shift(9_999, at(14, 0))
        .await
        .unwrap_err();

    assert_matches!(err, SchedulerError::DriverNotFound(9_999));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_shift_requires_a_field(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;

    let err = ShiftAdminService::new(pool.clone())
        .update_shift(shift.id, &ShiftPatch::default())
        .await
        .unwrap_err();

    assert_matches!(err, SchedulerError::NoFieldsToUpdate);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_shift_swaps_driver(pool: PgPool) {
    let first = seed_driver(&pool, 4, 4, 4).await;
    let second = seed_driver(&pool, 7, 7, 7).await;
    let shift = seed_shift(&pool, first.id).await;
    let admin = ShiftAdminService::new(pool.clone());

    let patch = ShiftPatch {
        driver_id: Some(second.id),
        departure_time: None,
    };
    let updated = admin.update_shift(shift.id, &patch).await.unwrap();

    assert_eq!(updated.driver_id, second.id);
    assert_eq!(updated.departure_time, shift.departure_time);

    assert_matches!(
        admin.update_shift(9_999, &patch).await,
        Err(SchedulerError::ShiftNotFound(9_999))
    );
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_cascades_to_bound_requests_only(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;
    let r1 = seed_request(&pool, "r1", 0, 0).await;
    let r2 = seed_request(&pool, "r2", 0, 0).await;
    let r3 = seed_request(&pool, "r3", 0, 0).await;
    let admin = ShiftAdminService::new(pool.clone());
    admin.assign_student(shift.id, r1.id).await.unwrap();
    admin.assign_student(shift.id, r2.id).await.unwrap();

    let published = admin.publish_shift(shift.id).await.unwrap();

    assert_eq!(published, 2);
    let shift = ShiftRepo::find_by_id(&pool, shift.id).await.unwrap().unwrap();
    assert_eq!(shift.status, ShiftStatus::Published);
    assert_eq!(status_of(&pool, r1.id).await, RequestStatus::Published);
    assert_eq!(status_of(&pool, r2.id).await, RequestStatus::Published);
    assert_eq!(status_of(&pool, r3.id).await, RequestStatus::Pending);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_missing_shift(pool: PgPool) {
    let err = ShiftAdminService::new(pool.clone())
        .publish_shift(9_999)
        .await
        .unwrap_err();

    assert_matches!(err, SchedulerError::ShiftNotFound(9_999));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_republish_picks_up_late_assignments(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;
    let early = seed_request(&pool, "early", 0, 0).await;
    let late = seed_request(&pool, "late", 0, 0).await;
    let admin = ShiftAdminService::new(pool.clone());

    admin.assign_student(shift.id, early.id).await.unwrap();
    admin.publish_shift(shift.id).await.unwrap();
    admin.assign_student(shift.id, late.id).await.unwrap();
    assert_eq!(status_of(&pool, late.id).await, RequestStatus::Assigned);

    admin.publish_shift(shift.id).await.unwrap();
    assert_eq!(status_of(&pool, late.id).await, RequestStatus::Published);
}

// ---------------------------------------------------------------------------
// Staff
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_cannot_be_staff_on_shift(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;
    let student = seed_user(&pool, "student", UserRole::Student).await;

    let err = ShiftAdminService::new(pool.clone())
        .assign_staff(shift.id, student.id)
        .await
        .unwrap_err();

    assert_matches!(err, SchedulerError::NotStaffRole(id) if id == student.id);
    assert!(ShiftStaffRepo::list_staff(&pool, shift.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_counts_as_staff_and_assign_is_idempotent(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;
    let admin_user = seed_user(&pool, "boss", UserRole::Admin).await;
    let admin = ShiftAdminService::new(pool.clone());

    admin.assign_staff(shift.id, admin_user.id).await.unwrap();
    admin.assign_staff(shift.id, admin_user.id).await.unwrap();

    let staffs = ShiftStaffRepo::list_staff(&pool, shift.id).await.unwrap();
    assert_eq!(staffs.len(), 1);
    assert_eq!(staffs[0].id, admin_user.id);

    admin.remove_staff(shift.id, admin_user.id).await.unwrap();
    assert!(ShiftStaffRepo::list_staff(&pool, shift.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_on_missing_shift_or_user(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;
    let staff = seed_user(&pool, "staff", UserRole::Staff).await;
    let admin = ShiftAdminService::new(pool.clone());

    assert_matches!(
        admin.assign_staff(9_999, staff.id).await,
        Err(SchedulerError::ShiftNotFound(9_999))
    );
    assert_matches!(
        admin.assign_staff(shift.id, 9_999).await,
        Err(SchedulerError::UserNotFound(9_999))
    );
    assert_matches!(
        admin.remove_staff(9_999, staff.id).await,
        Err(SchedulerError::ShiftNotFound(9_999))
    );
}

// ---------------------------------------------------------------------------
// Dashboard and pending list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_and_pending_requests(pool: PgPool) {
    let driver = seed_driver(&pool, 4, 4, 4).await;
    let shift = seed_shift(&pool, driver.id).await;
    let staff = seed_user(&pool, "staff", UserRole::Staff).await;
    let bound = seed_request(&pool, "bound", 1, 0).await;
    let waiting = seed_request(&pool, "waiting", 0, 0).await;
    let admin = ShiftAdminService::new(pool.clone());
    admin.assign_staff(shift.id, staff.id).await.unwrap();
    admin.assign_student(shift.id, bound.id).await.unwrap();

    let dashboard = admin.dashboard().await.unwrap();
    assert_eq!(dashboard.len(), 1);
    assert_eq!(dashboard[0].shift.id, shift.id);
    assert_eq!(dashboard[0].driver.as_ref().map(|d| d.id), Some(driver.id));
    assert_eq!(dashboard[0].requests.len(), 1);
    assert_eq!(dashboard[0].requests[0].id, bound.id);
    assert_eq!(dashboard[0].staffs.len(), 1);

    let pending = admin.pending_requests().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, waiting.id);
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_driver_create_update_list(pool: PgPool) {
    let admin = ShiftAdminService::new(pool.clone());

    let created = admin.create_driver(&driver_input(5)).await.unwrap();
    let updated = admin
        .update_driver(created.id, &driver_input(7))
        .await
        .unwrap();
    assert_eq!(updated.max_seats, 7);

    let drivers = admin.list_drivers().await.unwrap();
    assert_eq!(drivers.len(), 1);
    assert_eq!(drivers[0].max_seats, 7);

    assert_matches!(
        admin.update_driver(9_999, &driver_input(3)).await,
        Err(SchedulerError::DriverNotFound(9_999))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_driver_rejects_negative_limits(pool: PgPool) {
    let err = ShiftAdminService::new(pool.clone())
        .create_driver(&driver_input(-2))
        .await
        .unwrap_err();

    assert_matches!(err, SchedulerError::InvalidInput(ref msg) if msg.contains("max_seats"));
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_and_unset_staff(pool: PgPool) {
    let user = seed_user(&pool, "helper", UserRole::Student).await;
    let admin = ShiftAdminService::new(pool.clone());

    let promoted = admin.set_user_staff(user.id).await.unwrap();
    assert_eq!(promoted.role, UserRole::Staff);

    let demoted = admin.unset_user_staff(user.id).await.unwrap();
    assert_eq!(demoted.role, UserRole::Student);

    assert_eq!(admin.list_users().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_role_is_fixed(pool: PgPool) {
    let boss = seed_user(&pool, "boss", UserRole::Admin).await;
    let admin = ShiftAdminService::new(pool.clone());

    assert_matches!(
        admin.unset_user_staff(boss.id).await,
        Err(SchedulerError::CannotChangeAdmin(id)) if id == boss.id
    );
    assert_matches!(
        admin.set_user_staff(9_999).await,
        Err(SchedulerError::UserNotFound(9_999))
    );
}
