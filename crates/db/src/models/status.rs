//! Status and role enums mapped to PostgreSQL enum types.
//!
//! Variant names match the labels created in `db/migrations`.

use serde::{Deserialize, Serialize};

/// Lifecycle of a rider's request: `pending -> assigned -> published`,
/// with `assigned -> pending` on unbind. `published` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Assigned,
    Published,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Assigned => "assigned",
            RequestStatus::Published => "published",
        }
    }

    /// Only pending requests may be edited by their rider or bound to a shift.
    pub fn is_mutable(self) -> bool {
        self == RequestStatus::Pending
    }
}

/// Shift status. `draft -> published` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shift_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Draft,
    Published,
}

impl ShiftStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftStatus::Draft => "draft",
            ShiftStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Staff,
    Admin,
}

impl UserRole {
    /// Role name as carried in access tokens (see `pickup_core::roles`).
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => pickup_core::roles::ROLE_STUDENT,
            UserRole::Staff => pickup_core::roles::ROLE_STAFF,
            UserRole::Admin => pickup_core::roles::ROLE_ADMIN,
        }
    }

    pub fn is_staff_equivalent(self) -> bool {
        pickup_core::roles::is_staff_equivalent(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_mutable() {
        assert!(RequestStatus::Pending.is_mutable());
        assert!(!RequestStatus::Assigned.is_mutable());
        assert!(!RequestStatus::Published.is_mutable());
    }

    #[test]
    fn role_names_match_core_constants() {
        assert_eq!(UserRole::Student.as_str(), "student");
        assert_eq!(UserRole::Staff.as_str(), "staff");
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert!(UserRole::Admin.is_staff_equivalent());
        assert!(!UserRole::Student.is_staff_equivalent());
    }
}
