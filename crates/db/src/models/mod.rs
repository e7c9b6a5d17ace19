//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Create/update DTOs used by the repositories

pub mod driver;
pub mod request;
pub mod shift;
pub mod status;
pub mod user;
