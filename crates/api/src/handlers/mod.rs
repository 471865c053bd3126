//! HTTP handlers, one module per resource.
//!
//! Handlers are free async functions. Authorization is expressed through the
//! extractor parameters ([`AuthUser`](crate::middleware::auth::AuthUser),
//! [`RequireStaff`](crate::middleware::rbac::RequireStaff),
//! [`RequireAdmin`](crate::middleware::rbac::RequireAdmin)); a handler
//! without one of them is public.

pub mod bookings;
pub mod health;
pub mod nomers;
pub mod promotions;
pub mod roles;
pub mod users;
