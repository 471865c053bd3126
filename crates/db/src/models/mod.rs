//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for partial patches

pub mod booking;
pub mod nomer;
pub mod promotion;
pub mod role;
pub mod user;
