//! Repository for the `requests` table.

use pickup_core::types::{DbId, LocalDate};
use sqlx::PgPool;

use crate::models::request::{FlightRefresh, NewRequest, Request};
use crate::models::status::RequestStatus;
use crate::DbTransaction;

/// Column list for `requests` queries.
const COLUMNS: &str = "\
    id, user_id, flight_no, arrival_date, terminal, checked_bags, carry_on_bags, \
    status, arrival_time_api, pickup_buffer, calc_pickup_time, created_at, updated_at";

/// Provides access to rider requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Number of requests a rider owns, in any status.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM requests WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new `pending` request for a rider.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NewRequest,
    ) -> Result<Request, sqlx::Error> {
        let query = format!(
            "INSERT INTO requests \
                (user_id, flight_no, arrival_date, terminal, checked_bags, carry_on_bags, \
                 status, arrival_time_api, pickup_buffer, calc_pickup_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(user_id)
            .bind(&input.flight_no)
            .bind(input.arrival_date)
            .bind(&input.terminal)
            .bind(input.checked_bags)
            .bind(input.carry_on_bags)
            .bind(RequestStatus::Pending)
            .bind(input.arrival_time_api)
            .bind(input.pickup_buffer)
            .bind(input.calc_pickup_time)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All requests owned by a rider, oldest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE user_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Request>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_status(
        pool: &PgPool,
        status: RequestStatus,
    ) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE status = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Request>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Requests bound to a shift through `shift_requests`.
    pub async fn list_by_shift(pool: &PgPool, shift_id: DbId) -> Result<Vec<Request>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requests \
             WHERE id IN (SELECT request_id FROM shift_requests WHERE shift_id = $1) \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(shift_id)
            .fetch_all(pool)
            .await
    }

    /// Lock a request row `FOR UPDATE` inside the caller's transaction.
    pub async fn lock_by_id(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Lock a request row only if it belongs to `user_id`.
    pub async fn lock_owned(
        tx: &mut DbTransaction<'_>,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Request>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM requests WHERE id = $1 AND user_id = $2 FOR UPDATE");
        sqlx::query_as::<_, Request>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Write back the rider-editable columns of a request.
    pub async fn save_details(
        tx: &mut DbTransaction<'_>,
        request: &Request,
    ) -> Result<Request, sqlx::Error> {
        let query = format!(
            "UPDATE requests SET \
                flight_no = $2, \
                arrival_date = $3, \
                terminal = $4, \
                checked_bags = $5, \
                carry_on_bags = $6, \
                arrival_time_api = $7, \
                pickup_buffer = $8, \
                calc_pickup_time = $9, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Request>(&query)
            .bind(request.id)
            .bind(&request.flight_no)
            .bind(request.arrival_date)
            .bind(&request.terminal)
            .bind(request.checked_bags)
            .bind(request.carry_on_bags)
            .bind(request.arrival_time_api)
            .bind(request.pickup_buffer)
            .bind(request.calc_pickup_time)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn set_status(
        tx: &mut DbTransaction<'_>,
        id: DbId,
        status: RequestStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE requests SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Move every request bound to `shift_id` to `published`. Returns the
    /// number of rows changed.
    pub async fn publish_bound_to_shift(
        tx: &mut DbTransaction<'_>,
        shift_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE requests SET status = $2, updated_at = NOW() \
             WHERE id IN (SELECT request_id FROM shift_requests WHERE shift_id = $1)",
        )
        .bind(shift_id)
        .bind(RequestStatus::Published)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }

    /// Distinct flight numbers arriving on `date` whose requests have not
    /// been published yet.
    pub async fn unpublished_flights_on(
        pool: &PgPool,
        date: LocalDate,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT flight_no FROM requests \
             WHERE arrival_date = $1 AND status IN ($2, $3) \
             ORDER BY flight_no",
        )
        .bind(date)
        .bind(RequestStatus::Pending)
        .bind(RequestStatus::Assigned)
        .fetch_all(pool)
        .await
    }

    /// Write refreshed flight data onto every unpublished request for that
    /// flight and date. Returns the number of rows changed.
    pub async fn apply_flight_refresh(
        tx: &mut DbTransaction<'_>,
        refresh: &FlightRefresh,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE requests SET \
                terminal = $3, \
                arrival_time_api = $4, \
                pickup_buffer = $5, \
                calc_pickup_time = $6, \
                updated_at = NOW() \
             WHERE flight_no = $1 AND arrival_date = $2 AND status IN ($7, $8)",
        )
        .bind(&refresh.flight_no)
        .bind(refresh.arrival_date)
        .bind(&refresh.terminal)
        .bind(refresh.arrival_time)
        .bind(refresh.pickup_buffer)
        .bind(refresh.calc_pickup_time)
        .bind(RequestStatus::Pending)
        .bind(RequestStatus::Assigned)
        .execute(&mut **tx)
        .await?;
        tracing::debug!(
            flight_no = %refresh.flight_no,
            rows = result.rows_affected(),
            "Applied flight refresh",
        );
        Ok(result.rows_affected())
    }
}
