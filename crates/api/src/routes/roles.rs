//! Route definitions for the `/role` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Routes mounted at `/role`. All require the admin role.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(roles::create))
        .route("/readall", get(roles::read_all))
        .route("/read/{id}", get(roles::read_one))
        .route("/update/{id}", put(roles::update))
        .route("/delete/{id}", delete(roles::delete))
}
