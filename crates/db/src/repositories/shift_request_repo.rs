//! Repository for the `shift_requests` bridge table.
//!
//! Rows are inserted and deleted, never updated. `request_id` is unique, so
//! the table itself refuses to bind one request to two shifts.

use pickup_core::types::DbId;
use sqlx::PgPool;

use crate::DbTransaction;

/// Name of the unique constraint on `shift_requests.request_id`.
pub const REQUEST_UNIQUE_CONSTRAINT: &str = "uq_shift_requests_request_id";

pub struct ShiftRequestRepo;

impl ShiftRequestRepo {
    pub async fn insert(
        tx: &mut DbTransaction<'_>,
        shift_id: DbId,
        request_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO shift_requests (shift_id, request_id) VALUES ($1, $2)")
            .bind(shift_id)
            .bind(request_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Delete a binding. Returns `false` if it did not exist.
    pub async fn delete(
        tx: &mut DbTransaction<'_>,
        shift_id: DbId,
        request_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM shift_requests WHERE shift_id = $1 AND request_id = $2")
                .bind(shift_id)
                .bind(request_id)
                .execute(&mut **tx)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The shift a request is bound to, if any.
    pub async fn shift_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT shift_id FROM shift_requests WHERE request_id = $1")
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }

    /// Number of bindings for a request. Never more than one.
    pub async fn count_for_request(pool: &PgPool, request_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shift_requests WHERE request_id = $1")
            .bind(request_id)
            .fetch_one(pool)
            .await
    }
}
