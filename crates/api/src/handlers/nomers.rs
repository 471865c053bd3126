//! Handlers for the `/nomer` resource (rooms).
//!
//! Rooms are addressed by their public UUID. Create and update take
//! `multipart/form-data` with `nameNomer`, `description`, `price` and an
//! optional `image` file.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use stay_core::error::CoreError;
use stay_core::upload::UploadKind;
use stay_db::models::nomer::{CreateNomer, Nomer, UpdateNomer};
use stay_db::repositories::NomerRepo;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorBody};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Tag for grouping room endpoints in OpenAPI documentation
pub static NOMER_TAG: &str = "nomer";

const IMAGE_FIELD: &str = "image";
const NAME_FIELDS: &[&str] = &["nameNomer", "name"];

/// Text fields of a room form.
#[derive(Debug, Validate)]
struct NomerFields {
    #[validate(length(min = 3, max = 15))]
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
}

impl NomerFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            name: form.text_any(NAME_FIELDS),
            description: form.text("description"),
            price: form.text("price"),
        }
    }
}

/// Multipart body of room create and update. Every part is optional on update.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct NomerForm {
    /// 3 to 15 characters; `name` is accepted too.
    #[schema(rename = "nameNomer")]
    name_nomer: String,
    description: Option<String>,
    price: Option<String>,
    /// Any `image/*` file.
    #[schema(value_type = Option<String>)]
    image: Option<Vec<u8>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NomerCreated {
    pub msg: &'static str,
    pub uuid: Uuid,
    pub nomer: Nomer,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NomerEnvelope {
    pub msg: &'static str,
    pub nomer: Nomer,
}

/// POST /nomer/create
#[utoipa::path(
    post,
    path = "/nomer/create",
    tag = NOMER_TAG,
    request_body(content = NomerForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Room created", body = NomerCreated),
        (status = 400, description = "Invalid room data or image", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 409, description = "Room name already taken", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<NomerCreated>)> {
    let form = MultipartForm::read(multipart, IMAGE_FIELD).await?;
    let mut fields = NomerFields::from_form(&form);
    // A missing name fails the length rule like an empty one.
    let name = fields.name.get_or_insert_with(String::new).clone();
    fields.validate()?;

    let image_path = match &form.file {
        Some(file) => Some(state.uploads.save(UploadKind::Nomer, file).await?),
        None => None,
    };

    let input = CreateNomer {
        name,
        description: fields.description,
        price: fields.price,
        image_path: image_path.clone(),
    };
    let created = NomerRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let nomer = state
        .uploads
        .discard_on_error(image_path.as_deref(), created)
        .await?;

    tracing::info!(nomer_uuid = %nomer.uuid, user_id = staff.user_id, "Nomer created");

    Ok((
        StatusCode::CREATED,
        Json(NomerCreated {
            msg: "Nomer created",
            uuid: nomer.uuid,
            nomer,
        }),
    ))
}

/// GET /nomer/readall
#[utoipa::path(
    get,
    path = "/nomer/readall",
    tag = NOMER_TAG,
    responses(
        (status = 200, description = "All rooms", body = Vec<Nomer>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_all(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<Nomer>>> {
    Ok(Json(NomerRepo::list(&state.pool).await?))
}

/// GET /nomer/read/{uuid}
#[utoipa::path(
    get,
    path = "/nomer/read/{uuid}",
    tag = NOMER_TAG,
    params(
        ("uuid" = Uuid, Path, description = "Room UUID")
    ),
    responses(
        (status = 200, description = "The room", body = Nomer),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 404, description = "Room not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_one(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<Nomer>> {
    let nomer = NomerRepo::find_by_uuid(&state.pool, uuid)
        .await?
        .ok_or_else(|| nomer_not_found(uuid))?;
    Ok(Json(nomer))
}

/// PUT /nomer/update/{uuid}
///
/// Only submitted fields change. A new image replaces the old file.
#[utoipa::path(
    put,
    path = "/nomer/update/{uuid}",
    tag = NOMER_TAG,
    params(
        ("uuid" = Uuid, Path, description = "Room UUID")
    ),
    request_body(content = NomerForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Room updated", body = NomerEnvelope),
        (status = 400, description = "Invalid room data or image", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 404, description = "Room not found", body = ErrorBody),
        (status = 409, description = "Room name already taken", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(uuid): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<NomerEnvelope>> {
    let existing = NomerRepo::find_by_uuid(&state.pool, uuid)
        .await?
        .ok_or_else(|| nomer_not_found(uuid))?;

    let form = MultipartForm::read(multipart, IMAGE_FIELD).await?;
    let fields = NomerFields::from_form(&form);
    fields.validate()?;

    let image_path = match &form.file {
        Some(file) => Some(state.uploads.save(UploadKind::Nomer, file).await?),
        None => None,
    };

    let patch = UpdateNomer {
        name: fields.name,
        description: fields.description,
        price: fields.price,
        image_path: image_path.clone(),
    };
    let result = match NomerRepo::update(&state.pool, uuid, &patch).await {
        Ok(Some(nomer)) => Ok(nomer),
        Ok(None) => Err(nomer_not_found(uuid)),
        Err(e) => Err(AppError::from(e)),
    };
    let nomer = state
        .uploads
        .discard_on_error(image_path.as_deref(), result)
        .await?;

    if image_path.is_some() {
        if let Some(old) = existing.image_path.as_deref() {
            state.uploads.remove(old).await;
        }
    }

    Ok(Json(NomerEnvelope {
        msg: "Nomer updated",
        nomer,
    }))
}

/// DELETE /nomer/delete/{uuid}
///
/// Bookings pointing at the room are left in place.
#[utoipa::path(
    delete,
    path = "/nomer/delete/{uuid}",
    tag = NOMER_TAG,
    params(
        ("uuid" = Uuid, Path, description = "Room UUID")
    ),
    responses(
        (status = 200, description = "Room deleted", body = NomerEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Room not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(uuid): Path<Uuid>,
) -> AppResult<Json<NomerEnvelope>> {
    let nomer = NomerRepo::delete_by_uuid(&state.pool, uuid)
        .await?
        .ok_or_else(|| nomer_not_found(uuid))?;

    if let Some(path) = nomer.image_path.as_deref() {
        state.uploads.remove(path).await;
    }

    tracing::info!(nomer_uuid = %uuid, admin_id = admin.user_id, "Nomer deleted");

    Ok(Json(NomerEnvelope {
        msg: "Nomer deleted",
        nomer,
    }))
}

fn nomer_not_found(uuid: Uuid) -> AppError {
    AppError::Core(CoreError::not_found("Nomer", uuid))
}
