//! OpenAPI document for the HTTP API, served by Swagger UI at `/api-docs`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{bookings, health, nomers, promotions, roles, users};

/// Name of the bearer-token scheme referenced by guarded operations.
pub const BEARER_AUTH: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stay API",
        description = "Room booking backend: users, roles, rooms, promotions and bookings."
    ),
    paths(
        health::health_check,
        users::create,
        users::login,
        users::read_all,
        users::read_one,
        users::update,
        users::delete,
        users::upload_avatar,
        roles::create,
        roles::read_all,
        roles::read_one,
        roles::update,
        roles::delete,
        nomers::create,
        nomers::read_all,
        nomers::read_one,
        nomers::update,
        nomers::delete,
        promotions::create,
        promotions::read_all,
        promotions::read_one,
        promotions::update,
        promotions::delete,
        bookings::create,
        bookings::read_all,
        bookings::read_one,
        bookings::update,
        bookings::delete
    ),
    components(schemas(crate::error::ErrorBody)),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "user", description = "Registration, login and user management"),
        (name = "role", description = "Role management (admin)"),
        (name = "nomer", description = "Rooms"),
        (name = "promotions", description = "Promotions"),
        (name = "booking", description = "Bookings")
    )
)]
pub struct ApiDoc;

/// Registers the JWT bearer scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_AUTH,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
