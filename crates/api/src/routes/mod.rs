pub mod bookings;
pub mod health;
pub mod nomers;
pub mod promotions;
pub mod roles;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/create                   register (public)
/// /user/login                    login (public)
/// /user/readall                  list (staff)
/// /user/read/{id}                get (staff)
/// /user/update/{id}              patch (admin)
/// /user/delete/{id}              delete + booking cascade (admin)
/// /user/avatar/{id}              avatar upload (self or admin)
///
/// /role/...                      CRUD (admin)
///
/// /nomer/create|readall|read|update   (staff)
/// /nomer/delete/{uuid}                (admin)
///
/// /promotions/readall|read       (public)
/// /promotions/create|update|delete    (admin)
///
/// /booking/create                (any signed-in user)
/// /booking/readall|read|update|delete (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", users::router())
        .nest("/role", roles::router())
        .nest("/nomer", nomers::router())
        .nest("/promotions", promotions::router())
        .nest("/booking", bookings::router())
}
