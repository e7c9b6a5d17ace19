//! Rider pickup request models.

use pickup_core::types::{DbId, LocalDate, LocalDateTime, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::shift::ShiftSummary;
use super::status::RequestStatus;

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub id: DbId,
    pub user_id: DbId,
    pub flight_no: String,
    pub arrival_date: LocalDate,
    pub terminal: String,
    pub checked_bags: i32,
    pub carry_on_bags: i32,
    pub status: RequestStatus,
    pub arrival_time_api: Option<LocalDateTime>,
    pub pickup_buffer: i32,
    pub calc_pickup_time: Option<LocalDateTime>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fully resolved values for a new request row. Parsing and buffer
/// computation happen before this is built.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub flight_no: String,
    pub arrival_date: LocalDate,
    pub terminal: String,
    pub checked_bags: i32,
    pub carry_on_bags: i32,
    pub arrival_time_api: Option<LocalDateTime>,
    pub pickup_buffer: i32,
    pub calc_pickup_time: Option<LocalDateTime>,
}

/// A request as shown to its rider.
///
/// `shift` is only populated once the request is published; before that the
/// rider must not learn which driver or shift they are on.
#[derive(Debug, Clone, Serialize)]
pub struct RiderRequest {
    #[serde(flatten)]
    pub request: Request,
    pub shift: Option<ShiftSummary>,
}

/// Flight data returned by the external provider, resolved into the values
/// written back onto every matching request.
#[derive(Debug, Clone)]
pub struct FlightRefresh {
    pub flight_no: String,
    pub arrival_date: LocalDate,
    pub terminal: String,
    pub arrival_time: LocalDateTime,
    pub pickup_buffer: i32,
    pub calc_pickup_time: LocalDateTime,
}
