//! Handlers for the `/role` resource.
//!
//! All handlers require the admin role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stay_core::error::CoreError;
use stay_core::types::DbId;
use stay_db::models::role::{CreateRole, Role};
use stay_db::repositories::RoleRepo;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Tag for grouping role endpoints in OpenAPI documentation
pub static ROLE_TAG: &str = "role";

/// Request body for `POST /role/create`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoleRequest {
    #[serde(rename = "roleID", alias = "id")]
    #[validate(range(min = 1))]
    #[schema(value_type = i64)]
    pub id: DbId,
    #[serde(rename = "roleName", alias = "name")]
    #[validate(length(min = 3, max = 15))]
    pub name: String,
}

/// Request body for `PUT /role/update/{id}`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    #[serde(rename = "roleName", alias = "name")]
    #[validate(length(min = 3, max = 15))]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleEnvelope {
    pub msg: &'static str,
    pub role: Role,
}

/// POST /role/create
///
/// Duplicate tags or names are rejected with 409 by the `uq_roles_id` and
/// `uq_roles_name` constraints.
#[utoipa::path(
    post,
    path = "/role/create",
    tag = ROLE_TAG,
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleEnvelope),
        (status = 400, description = "Invalid role data", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 409, description = "Tag or name already taken", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateRoleRequest>,
) -> AppResult<(StatusCode, Json<RoleEnvelope>)> {
    let role = RoleRepo::create(
        &state.pool,
        &CreateRole {
            id: input.id,
            name: input.name,
        },
    )
    .await?;

    tracing::info!(role_id = role.id, name = %role.name, admin_id = admin.user_id, "Role created");

    Ok((
        StatusCode::CREATED,
        Json(RoleEnvelope {
            msg: "Role created",
            role,
        }),
    ))
}

/// GET /role/readall
#[utoipa::path(
    get,
    path = "/role/readall",
    tag = ROLE_TAG,
    responses(
        (status = 200, description = "All roles", body = Vec<Role>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<Role>>> {
    Ok(Json(RoleRepo::list(&state.pool).await?))
}

/// GET /role/read/{id}
#[utoipa::path(
    get,
    path = "/role/read/{id}",
    tag = ROLE_TAG,
    params(
        ("id" = i64, Path, description = "Role tag")
    ),
    responses(
        (status = 200, description = "The role", body = Role),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Role not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_one(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<Role>> {
    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Role", id)))?;
    Ok(Json(role))
}

/// PUT /role/update/{id}
#[utoipa::path(
    put,
    path = "/role/update/{id}",
    tag = ROLE_TAG,
    params(
        ("id" = i64, Path, description = "Role tag")
    ),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role renamed", body = RoleEnvelope),
        (status = 400, description = "Invalid role name", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Role not found", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateRoleRequest>,
) -> AppResult<Json<RoleEnvelope>> {
    let role = RoleRepo::update(&state.pool, id, &input.name)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Role", id)))?;
    Ok(Json(RoleEnvelope {
        msg: "Role updated",
        role,
    }))
}

/// DELETE /role/delete/{id}
///
/// Users still holding the tag keep it; their references become orphaned.
#[utoipa::path(
    delete,
    path = "/role/delete/{id}",
    tag = ROLE_TAG,
    params(
        ("id" = i64, Path, description = "Role tag")
    ),
    responses(
        (status = 200, description = "Role deleted", body = RoleEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Role not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<RoleEnvelope>> {
    let role = RoleRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Role", id)))?;

    tracing::info!(role_id = id, admin_id = admin.user_id, "Role deleted");

    Ok(Json(RoleEnvelope {
        msg: "Role deleted",
        role,
    }))
}
