//! Well-known role name constants.
//!
//! These must match the `user_role` enum in `20260301000001_create_users.sql`.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_ADMIN: &str = "admin";

/// Whether a role may chaperone a shift.
pub fn is_staff_equivalent(role: &str) -> bool {
    role == ROLE_STAFF || role == ROLE_ADMIN
}

/// Whether `role` passes a gate that requires `required`.
///
/// Admins pass every gate.
pub fn satisfies(role: &str, required: &str) -> bool {
    if role == ROLE_ADMIN {
        return true;
    }
    match required {
        ROLE_STAFF => is_staff_equivalent(role),
        other => role == other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_and_admin_are_staff_equivalent() {
        assert!(is_staff_equivalent(ROLE_STAFF));
        assert!(is_staff_equivalent(ROLE_ADMIN));
        assert!(!is_staff_equivalent(ROLE_STUDENT));
        assert!(!is_staff_equivalent(""));
    }

    #[test]
    fn admin_passes_every_gate() {
        assert!(satisfies(ROLE_ADMIN, ROLE_STUDENT));
        assert!(satisfies(ROLE_ADMIN, ROLE_STAFF));
        assert!(satisfies(ROLE_ADMIN, ROLE_ADMIN));
    }

    #[test]
    fn staff_gate() {
        assert!(satisfies(ROLE_STAFF, ROLE_STAFF));
        assert!(!satisfies(ROLE_STUDENT, ROLE_STAFF));
    }

    #[test]
    fn student_gate_rejects_staff() {
        assert!(satisfies(ROLE_STUDENT, ROLE_STUDENT));
        assert!(!satisfies(ROLE_STAFF, ROLE_STUDENT));
    }

    #[test]
    fn admin_gate_rejects_staff() {
        assert!(!satisfies(ROLE_STAFF, ROLE_ADMIN));
    }
}
