#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use pickup_db::models::driver::{Driver, DriverInput};
use pickup_db::models::request::Request;
use pickup_db::models::shift::Shift;
use pickup_db::models::status::{RequestStatus, UserRole};
use pickup_db::models::user::{CreateUser, User};
use pickup_db::repositories::{DriverRepo, RequestRepo, ShiftRepo, UserRepo};
use pickup_scheduler::{CreateRequestInput, RequestService};
use sqlx::PgPool;

/// Arrival date used by every fixture request.
pub fn arrival_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    arrival_date().and_hms_opt(h, m, 0).unwrap()
}

pub async fn seed_user(pool: &PgPool, open_id: &str, role: UserRole) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            open_id: open_id.to_string(),
            name: open_id.to_string(),
            phone: None,
            role: Some(role),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_driver(pool: &PgPool, seats: i32, checked: i32, carry_on: i32) -> Driver {
    DriverRepo::create(
        pool,
        &DriverInput {
            name: "Li".to_string(),
            car_model: "Sienna".to_string(),
            max_seats: seats,
            max_checked: checked,
            max_carry_on: carry_on,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_shift(pool: &PgPool, driver_id: i64) -> Shift {
    ShiftRepo::create(pool, driver_id, at(12, 0)).await.unwrap()
}

pub fn request_input(terminal: &str, checked: i32, carry_on: i32) -> CreateRequestInput {
    CreateRequestInput {
        flight_no: "CA981".to_string(),
        arrival_date: "2026-03-14".to_string(),
        terminal: terminal.to_string(),
        checked_bags: checked,
        carry_on_bags: carry_on,
        expected_arrival_time: "2026-03-14 10:00:00".to_string(),
    }
}

/// Create a fresh rider and a pending request for them.
pub async fn seed_request(pool: &PgPool, rider: &str, checked: i32, carry_on: i32) -> Request {
    let user = seed_user(pool, rider, UserRole::Student).await;
    RequestService::new(pool.clone())
        .create_request(user.id, &request_input("T2", checked, carry_on))
        .await
        .unwrap()
}

pub async fn status_of(pool: &PgPool, request_id: i64) -> RequestStatus {
    RequestRepo::find_by_id(pool, request_id)
        .await
        .unwrap()
        .expect("request exists")
        .status
}
