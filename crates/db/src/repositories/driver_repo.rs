//! Repository for the `drivers` table.

use pickup_core::types::DbId;
use sqlx::PgPool;

use crate::models::driver::{Driver, DriverInput};

const COLUMNS: &str = "id, name, car_model, max_seats, max_checked, max_carry_on";

/// Provides CRUD operations for drivers. Drivers are never deleted: shifts
/// reference them with `ON DELETE RESTRICT`.
pub struct DriverRepo;

impl DriverRepo {
    pub async fn create(pool: &PgPool, input: &DriverInput) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (name, car_model, max_seats, max_checked, max_carry_on)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(&input.name)
            .bind(&input.car_model)
            .bind(input.max_seats)
            .bind(input.max_checked)
            .bind(input.max_carry_on)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers WHERE id = $1");
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Driver>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drivers ORDER BY id ASC");
        sqlx::query_as::<_, Driver>(&query).fetch_all(pool).await
    }

    /// Replace a driver's profile. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DriverInput,
    ) -> Result<Option<Driver>, sqlx::Error> {
        let query = format!(
            "UPDATE drivers SET
                name = $2,
                car_model = $3,
                max_seats = $4,
                max_checked = $5,
                max_carry_on = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.car_model)
            .bind(input.max_seats)
            .bind(input.max_checked)
            .bind(input.max_carry_on)
            .fetch_optional(pool)
            .await
    }
}
