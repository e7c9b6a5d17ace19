//! Shift models, the aggregated load view, and the admin dashboard shape.

use pickup_core::capacity::{DriverCapacity, ShiftLoad};
use pickup_core::types::{DbId, LocalDateTime, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::driver::Driver;
use super::request::Request;
use super::status::ShiftStatus;
use super::user::User;

/// A row from the `shifts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shift {
    pub id: DbId,
    pub driver_id: DbId,
    pub departure_time: LocalDateTime,
    pub status: ShiftStatus,
    pub created_at: Timestamp,
}

/// Partial update of a shift. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct ShiftPatch {
    pub driver_id: Option<DbId>,
    pub departure_time: Option<LocalDateTime>,
}

impl ShiftPatch {
    pub fn is_empty(&self) -> bool {
        self.driver_id.is_none() && self.departure_time.is_none()
    }
}

/// A shift row locked `FOR UPDATE`, joined with its driver's limits.
#[derive(Debug, Clone, FromRow)]
pub struct LockedShift {
    pub id: DbId,
    pub status: ShiftStatus,
    pub driver_id: DbId,
    pub max_seats: i32,
    pub max_checked: i32,
    pub max_carry_on: i32,
}

impl LockedShift {
    pub fn capacity(&self) -> DriverCapacity {
        DriverCapacity {
            max_seats: self.max_seats,
            max_checked: self.max_checked,
            max_carry_on: self.max_carry_on,
        }
    }
}

/// Aggregate of everything already bound to a shift.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ShiftLoadRow {
    pub bound_requests: i64,
    pub staff: i64,
    pub checked_bags: i64,
    pub carry_on_bags: i64,
}

impl From<ShiftLoadRow> for ShiftLoad {
    fn from(row: ShiftLoadRow) -> Self {
        ShiftLoad {
            bound_requests: row.bound_requests,
            staff: row.staff,
            checked_bags: row.checked_bags,
            carry_on_bags: row.carry_on_bags,
        }
    }
}

/// The shift and driver identity revealed to a rider after publication.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShiftSummary {
    pub id: DbId,
    pub departure_time: LocalDateTime,
    pub status: ShiftStatus,
    pub driver_id: DbId,
    pub driver_name: String,
    pub car_model: String,
}

/// A [`ShiftSummary`] keyed by the request bound to that shift.
#[derive(Debug, Clone, FromRow)]
pub struct BoundShiftSummary {
    pub request_id: DbId,
    #[sqlx(flatten)]
    pub summary: ShiftSummary,
}

/// One entry of the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftDetail {
    #[serde(flatten)]
    pub shift: Shift,
    pub driver: Option<Driver>,
    pub requests: Vec<Request>,
    pub staffs: Vec<User>,
}
