//! Well-known numeric role tags.
//!
//! These must match the seed data in `20260301000001_create_roles_table.sql`.
//! A user's `role_id` and the `role` claim in access tokens both carry one
//! of these tags.

pub const ROLE_ADMIN: i64 = 1;
pub const ROLE_HOSTESS: i64 = 2;
pub const ROLE_GUEST: i64 = 3;

/// `true` only for the administrator tag.
pub fn is_admin(role: i64) -> bool {
    role == ROLE_ADMIN
}

/// `true` for hostess (staff) or administrator.
pub fn is_staff_or_admin(role: i64) -> bool {
    role == ROLE_ADMIN || role == ROLE_HOSTESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_admin_and_staff() {
        assert!(is_admin(ROLE_ADMIN));
        assert!(is_staff_or_admin(ROLE_ADMIN));
    }

    #[test]
    fn hostess_is_staff_but_not_admin() {
        assert!(!is_admin(ROLE_HOSTESS));
        assert!(is_staff_or_admin(ROLE_HOSTESS));
    }

    #[test]
    fn guest_and_unknown_tags_are_neither() {
        for tag in [ROLE_GUEST, 0, 42, -1] {
            assert!(!is_admin(tag));
            assert!(!is_staff_or_admin(tag));
        }
    }
}
