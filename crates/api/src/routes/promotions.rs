//! Route definitions for the `/promotions` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::promotions;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(promotions::create))
        .route("/readall", get(promotions::read_all))
        .route("/read/{id}", get(promotions::read_one))
        .route("/update/{id}", put(promotions::update))
        .route("/delete/{id}", delete(promotions::delete))
}
