//! Domain types and pure logic for the Stay booking backend.
//!
//! Nothing in this crate touches the database, the network, or the
//! filesystem; it is shared by `stay-db` and `stay-api`.

pub mod booking;
pub mod error;
pub mod policy;
pub mod roles;
pub mod types;
pub mod upload;
