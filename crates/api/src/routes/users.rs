//! Route definitions for the `/user` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST   /create        -> create
/// POST   /login         -> login
/// GET    /readall       -> read_all
/// GET    /read/{id}     -> read_one
/// PUT    /update/{id}   -> update
/// DELETE /delete/{id}   -> delete
/// PUT    /avatar/{id}   -> upload_avatar
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(users::create))
        .route("/login", post(users::login))
        .route("/readall", get(users::read_all))
        .route("/read/{id}", get(users::read_one))
        .route("/update/{id}", put(users::update))
        .route("/delete/{id}", delete(users::delete))
        .route("/avatar/{id}", put(users::upload_avatar))
}
