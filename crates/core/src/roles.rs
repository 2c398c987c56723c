//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_CUSTOMER: &str = "customer";

/// Whether a role may mutate the catalog (movies, sessions, halls, ...).
pub fn is_staff_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
