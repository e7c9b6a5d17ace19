//! Repository for the `shift_staffs` bridge table.

use pickup_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;
use crate::DbTransaction;

pub struct ShiftStaffRepo;

impl ShiftStaffRepo {
    /// Bind a staff member to a shift. Returns `false` if already bound.
    pub async fn insert(
        tx: &mut DbTransaction<'_>,
        shift_id: DbId,
        staff_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO shift_staffs (shift_id, staff_id) VALUES ($1, $2) \
             ON CONFLICT (shift_id, staff_id) DO NOTHING",
        )
        .bind(shift_id)
        .bind(staff_id)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unbind a staff member. Returns `false` if they were not bound.
    pub async fn delete(
        tx: &mut DbTransaction<'_>,
        shift_id: DbId,
        staff_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shift_staffs WHERE shift_id = $1 AND staff_id = $2")
            .bind(shift_id)
            .bind(staff_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Users bound as staff to a shift.
    pub async fn list_staff(pool: &PgPool, shift_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.open_id, u.name, u.phone, u.role, u.created_at, u.updated_at \
             FROM shift_staffs ss \
             JOIN users u ON u.id = ss.staff_id \
             WHERE ss.shift_id = $1 \
             ORDER BY u.id ASC",
        )
        .bind(shift_id)
        .fetch_all(pool)
        .await
    }
}
