//! Repository for the `shifts` table.

use pickup_core::types::{DbId, LocalDateTime};
use sqlx::PgPool;

use crate::models::shift::{BoundShiftSummary, LockedShift, Shift, ShiftLoadRow, ShiftPatch};
use crate::models::status::ShiftStatus;
use crate::DbTransaction;

const COLUMNS: &str = "id, driver_id, departure_time, status, created_at";

/// Provides access to shifts.
pub struct ShiftRepo;

impl ShiftRepo {
    /// Insert a new `draft` shift.
    pub async fn create(
        pool: &PgPool,
        driver_id: DbId,
        departure_time: LocalDateTime,
    ) -> Result<Shift, sqlx::Error> {
        let query = format!(
            "INSERT INTO shifts (driver_id, departure_time, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(driver_id)
            .bind(departure_time)
            .bind(ShiftStatus::Draft)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shifts WHERE id = $1");
        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All shifts ordered by departure.
    pub async fn list(pool: &PgPool) -> Result<Vec<Shift>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shifts ORDER BY departure_time ASC, id ASC");
        sqlx::query_as::<_, Shift>(&query).fetch_all(pool).await
    }

    /// Patch a shift. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ShiftPatch,
    ) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!(
            "UPDATE shifts SET \
                driver_id = COALESCE($2, driver_id), \
                departure_time = COALESCE($3, departure_time) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .bind(patch.driver_id)
            .bind(patch.departure_time)
            .fetch_optional(pool)
            .await
    }

    /// Lock a shift row `FOR UPDATE` and read its driver's limits.
    ///
    /// Only the shift row is locked; drivers referenced by a shift cannot be
    /// deleted.
    pub async fn lock_with_capacity(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<Option<LockedShift>, sqlx::Error> {
        sqlx::query_as::<_, LockedShift>(
            "SELECT s.id, s.status, s.driver_id, d.max_seats, d.max_checked, d.max_carry_on \
             FROM shifts s \
             JOIN drivers d ON d.id = s.driver_id \
             WHERE s.id = $1 \
             FOR UPDATE OF s",
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Lock a shift row `FOR UPDATE` without touching its driver.
    pub async fn lock_by_id(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shifts WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub async fn set_status(
        tx: &mut DbTransaction<'_>,
        id: DbId,
        status: ShiftStatus,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE shifts SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Aggregate the load currently bound to a shift: bound request count,
    /// staff count, and the bag sums across bound requests.
    ///
    /// Recomputed from the bridge tables on every call; there is no cached
    /// counter on `shifts`.
    pub async fn current_load(
        tx: &mut DbTransaction<'_>,
        id: DbId,
    ) -> Result<ShiftLoadRow, sqlx::Error> {
        sqlx::query_as::<_, ShiftLoadRow>(
            "SELECT \
                (SELECT COUNT(*) FROM shift_requests WHERE shift_id = $1) AS bound_requests, \
                (SELECT COUNT(*) FROM shift_staffs WHERE shift_id = $1) AS staff, \
                bags.checked_bags, \
                bags.carry_on_bags \
             FROM ( \
                SELECT COALESCE(SUM(r.checked_bags), 0)::BIGINT AS checked_bags, \
                       COALESCE(SUM(r.carry_on_bags), 0)::BIGINT AS carry_on_bags \
                FROM shift_requests sr \
                JOIN requests r ON r.id = sr.request_id \
                WHERE sr.shift_id = $1 \
             ) bags",
        )
        .bind(id)
        .fetch_one(&mut **tx)
        .await
    }

    /// The shift each of `request_ids` is bound to, with its driver's public
    /// identity. Unbound requests are absent from the result.
    pub async fn find_summaries_for_requests(
        pool: &PgPool,
        request_ids: &[DbId],
    ) -> Result<Vec<BoundShiftSummary>, sqlx::Error> {
        sqlx::query_as::<_, BoundShiftSummary>(
            "SELECT sr.request_id, s.id, s.departure_time, s.status, \
                    d.id AS driver_id, d.name AS driver_name, d.car_model \
             FROM shift_requests sr \
             JOIN shifts s ON s.id = sr.shift_id \
             JOIN drivers d ON d.id = s.driver_id \
             WHERE sr.request_id = ANY($1)",
        )
        .bind(request_ids)
        .fetch_all(pool)
        .await
    }
}
