//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use pickup_core::types::{DbId, Timestamp};

use super::status::UserRole;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub open_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user. Issuing identities belongs to the auth layer;
/// this exists for seeding and tests.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub open_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
}
