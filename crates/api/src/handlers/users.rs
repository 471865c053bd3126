//! Handlers for the `/user` resource: registration, login, management, avatars.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stay_core::error::CoreError;
use stay_core::policy::{validate_password_policy, validate_phone};
use stay_core::roles::is_admin;
use stay_core::types::DbId;
use stay_core::upload::UploadKind;
use stay_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use stay_db::repositories::{BookingRepo, RoleRepo, UserRepo};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Multipart field carrying the avatar image.
const AVATAR_FIELD: &str = "avatar";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/create`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 5, max = 20))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_password_policy"))]
    pub password: String,
    #[serde(rename = "roleID", alias = "role_id")]
    #[schema(value_type = i64)]
    pub role_id: DbId,
}

/// Request body for `PUT /user/update/{id}`. Absent fields are left as they are.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 5, max = 20))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "validate_password_policy"))]
    pub password: Option<String>,
    #[serde(default, rename = "roleID", alias = "role_id")]
    #[schema(value_type = Option<i64>)]
    pub role_id: Option<DbId>,
}

/// Request body for `POST /user/login`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Returned by registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub msg: &'static str,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub msg: &'static str,
    pub user: UserResponse,
}

/// Returned by `DELETE /user/delete/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedUserResponse {
    pub msg: &'static str,
    pub user: UserResponse,
    /// Bookings the user had requested, removed together with the account.
    pub deleted_bookings: u64,
}

/// Multipart body of `PUT /user/avatar/{id}`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct AvatarForm {
    /// JPEG or PNG image, at most 5 MiB.
    #[schema(value_type = String)]
    avatar: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /user/create
///
/// Public registration. The role must exist; the password is hashed before
/// storage and a token is issued straight away.
///
/// Any existing role tag may be requested, admin (`roleID: 1`) included.
/// This is intentional; later role changes go through the admin-only update.
#[utoipa::path(
    post,
    path = "/user/create",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorBody),
        (status = 404, description = "Role does not exist", body = ErrorBody),
        (status = 409, description = "Username, email or phone already taken", body = ErrorBody)
    ),
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    ensure_role_exists(&state, input.role_id).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            phone: input.phone,
            password_hash,
            role_id: input.role_id,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = user.role_id, "User created");

    let token = issue_token(&state, &user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            msg: "User created",
            token,
            user: user.into(),
        }),
    ))
}

/// POST /user/login
///
/// Unknown email is 404, wrong password is 401.
#[utoipa::path(
    post,
    path = "/user/login",
    tag = USER_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Missing email or password", body = ErrorBody),
        (status = 401, description = "Wrong password", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    let token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse {
        msg: "Logged in",
        token,
        user: user.into(),
    }))
}

/// GET /user/readall
#[utoipa::path(
    get,
    path = "/user/readall",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_all(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /user/read/{id}
#[utoipa::path(
    get,
    path = "/user/read/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_one(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, id).await?;
    Ok(Json(user.into()))
}

/// PUT /user/update/{id}
///
/// Partial update. A new role must exist; a new password is re-hashed.
#[utoipa::path(
    put,
    path = "/user/update/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Invalid user data", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "User or role not found", body = ErrorBody),
        (status = 409, description = "Username, email or phone already taken", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserEnvelope>> {
    find_user(&state, id).await?;

    if let Some(role_id) = input.role_id {
        ensure_role_exists(&state, role_id).await?;
    }

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let patch = UpdateUser {
        username: input.username,
        email: input.email,
        phone: input.phone,
        password_hash,
        role_id: input.role_id,
    };

    let user = UserRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(Json(UserEnvelope {
        msg: "User updated",
        user: user.into(),
    }))
}

/// DELETE /user/delete/{id}
///
/// Removes the bookings the user requested and then the user, in one
/// transaction. Bookings where the user is only the hostess are kept.
#[utoipa::path(
    delete,
    path = "/user/delete/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User and their bookings deleted", body = DeletedUserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeletedUserResponse>> {
    let mut tx = state.pool.begin().await?;

    let deleted_bookings = BookingRepo::delete_by_user(&mut tx, id).await?;
    let Some(user) = UserRepo::delete(&mut tx, id).await? else {
        // Dropping the transaction rolls the booking removal back.
        return Err(AppError::NotFound("User not found".into()));
    };

    tx.commit().await?;

    if let Some(avatar) = &user.avatar_path {
        state.uploads.remove(avatar).await;
    }

    tracing::info!(
        user_id = id,
        deleted_bookings,
        admin_id = admin.user_id,
        "User deleted"
    );

    Ok(Json(DeletedUserResponse {
        msg: "User deleted",
        user: user.into(),
        deleted_bookings,
    }))
}

/// PUT /user/avatar/{id}
///
/// Multipart upload with an `avatar` file (JPEG or PNG, at most 5 MiB).
/// Users may change their own avatar; admins may change anyone's.
#[utoipa::path(
    put,
    path = "/user/avatar/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body(content = AvatarForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Avatar stored", body = UserEnvelope),
        (status = 400, description = "Missing file or unsupported image", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the account owner or an admin", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<UserEnvelope>> {
    if auth.user_id != id && !is_admin(auth.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only change your own avatar".into(),
        )));
    }

    let existing = find_user(&state, id).await?;

    let form = MultipartForm::read(multipart, AVATAR_FIELD).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Avatar file is required".into()))?;

    let stored = state.uploads.save(UploadKind::Avatar, &file).await?;

    let result = match UserRepo::set_avatar(&state.pool, id, &stored).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(AppError::NotFound("User not found".into())),
        Err(e) => Err(AppError::from(e)),
    };
    let user = state.uploads.discard_on_error(Some(&stored), result).await?;

    if let Some(previous) = existing.avatar_path.as_deref() {
        state.uploads.remove(previous).await;
    }

    tracing::info!(user_id = id, path = %stored, "Avatar updated");

    Ok(Json(UserEnvelope {
        msg: "Avatar updated",
        user: user.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
}

async fn ensure_role_exists(state: &AppState, role_id: DbId) -> AppResult<()> {
    RoleRepo::find_by_id(&state.pool, role_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::Core(CoreError::not_found("Role", role_id)))
}

fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    generate_token(user.id, &user.username, user.role_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
