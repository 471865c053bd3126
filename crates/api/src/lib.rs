//! Stay API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth,
//! uploads, routes, API docs) so integration tests and the binary entrypoint
//! can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod routes;
pub mod state;
pub mod upload;
