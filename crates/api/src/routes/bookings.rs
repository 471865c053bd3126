//! Route definitions for the `/booking` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/booking`.
///
/// ```text
/// POST   /create        -> create
/// GET    /readall       -> read_all (expanded)
/// GET    /read/{id}     -> read_one (expanded)
/// PUT    /update/{id}   -> update status
/// DELETE /delete/{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(bookings::create))
        .route("/readall", get(bookings::read_all))
        .route("/read/{id}", get(bookings::read_one))
        .route("/update/{id}", put(bookings::update))
        .route("/delete/{id}", delete(bookings::delete))
}
