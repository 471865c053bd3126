//! Route definitions for the `/nomer` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::nomers;
use crate::state::AppState;

/// Routes mounted at `/nomer`, keyed by room UUID.
///
/// ```text
/// POST   /create          -> create (multipart)
/// GET    /readall         -> read_all
/// GET    /read/{uuid}     -> read_one
/// PUT    /update/{uuid}   -> update (multipart)
/// DELETE /delete/{uuid}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(nomers::create))
        .route("/readall", get(nomers::read_all))
        .route("/read/{uuid}", get(nomers::read_one))
        .route("/update/{uuid}", put(nomers::update))
        .route("/delete/{uuid}", delete(nomers::delete))
}
