//! Driver capacity profile.

use pickup_core::capacity::DriverCapacity;
use pickup_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `drivers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Driver {
    pub id: DbId,
    pub name: String,
    pub car_model: String,
    pub max_seats: i32,
    pub max_checked: i32,
    pub max_carry_on: i32,
}

impl Driver {
    pub fn capacity(&self) -> DriverCapacity {
        DriverCapacity {
            max_seats: self.max_seats,
            max_checked: self.max_checked,
            max_carry_on: self.max_carry_on,
        }
    }
}

/// DTO for creating a driver or replacing its profile.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverInput {
    pub name: String,
    pub car_model: String,
    pub max_seats: i32,
    pub max_checked: i32,
    pub max_carry_on: i32,
}

impl DriverInput {
    pub fn capacity(&self) -> DriverCapacity {
        DriverCapacity {
            max_seats: self.max_seats,
            max_checked: self.max_checked,
            max_carry_on: self.max_carry_on,
        }
    }
}
