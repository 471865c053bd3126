//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the admin role.
//! - [`rbac::RequireStaff`] -- Requires the hostess or admin role.

pub mod auth;
pub mod rbac;
