//! Handlers for the `/promotions` resource.
//!
//! Reads are public; writes require the admin role and take
//! `multipart/form-data` with `title`, `description` and an `image` file.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use stay_core::error::CoreError;
use stay_core::types::DbId;
use stay_core::upload::UploadKind;
use stay_db::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use stay_db::repositories::PromotionRepo;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorBody};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Tag for grouping promotion endpoints in OpenAPI documentation
pub static PROMOTION_TAG: &str = "promotions";

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Validate)]
struct PromotionFields {
    #[validate(length(min = 3, max = 100))]
    title: Option<String>,
    #[validate(length(min = 10, max = 500))]
    description: Option<String>,
}

impl PromotionFields {
    fn from_form(form: &MultipartForm) -> Self {
        Self {
            title: form.text("title"),
            description: form.text("description"),
        }
    }
}

/// Multipart body of promotion create and update. The image is required on create.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct PromotionForm {
    /// 3 to 100 characters.
    title: String,
    /// 10 to 500 characters.
    description: String,
    /// Any `image/*` file.
    #[schema(value_type = String)]
    image: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PromotionEnvelope {
    pub msg: &'static str,
    pub promotion: Promotion,
}

/// POST /promotions/create
///
/// The image is mandatory; a form without one is rejected before anything
/// is written.
#[utoipa::path(
    post,
    path = "/promotions/create",
    tag = PROMOTION_TAG,
    request_body(content = PromotionForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Promotion created", body = PromotionEnvelope),
        (status = 400, description = "Invalid promotion data or missing image", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<PromotionEnvelope>)> {
    let form = MultipartForm::read(multipart, IMAGE_FIELD).await?;
    let mut fields = PromotionFields::from_form(&form);
    let title = fields.title.get_or_insert_with(String::new).clone();
    let description = fields.description.get_or_insert_with(String::new).clone();
    fields.validate()?;

    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Image is required".into()))?;
    let image_path = state.uploads.save(UploadKind::Promotion, file).await?;

    let created = PromotionRepo::create(
        &state.pool,
        &CreatePromotion {
            title,
            description,
            image_path: image_path.clone(),
        },
    )
    .await
    .map_err(AppError::from);
    let promotion = state
        .uploads
        .discard_on_error(Some(&image_path), created)
        .await?;

    tracing::info!(promotion_id = promotion.id, admin_id = admin.user_id, "Promotion created");

    Ok((
        StatusCode::CREATED,
        Json(PromotionEnvelope {
            msg: "Promotion created",
            promotion,
        }),
    ))
}

/// GET /promotions/readall -- newest first.
#[utoipa::path(
    get,
    path = "/promotions/readall",
    tag = PROMOTION_TAG,
    responses(
        (status = 200, description = "All promotions", body = Vec<Promotion>)
    ),
)]
pub async fn read_all(State(state): State<AppState>) -> AppResult<Json<Vec<Promotion>>> {
    Ok(Json(PromotionRepo::list(&state.pool).await?))
}

/// GET /promotions/read/{id}
#[utoipa::path(
    get,
    path = "/promotions/read/{id}",
    tag = PROMOTION_TAG,
    params(
        ("id" = i64, Path, description = "Promotion id")
    ),
    responses(
        (status = 200, description = "The promotion", body = Promotion),
        (status = 404, description = "Promotion not found", body = ErrorBody)
    ),
)]
pub async fn read_one(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Promotion>> {
    let promotion = PromotionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| promotion_not_found(id))?;
    Ok(Json(promotion))
}

/// PUT /promotions/update/{id}
#[utoipa::path(
    put,
    path = "/promotions/update/{id}",
    tag = PROMOTION_TAG,
    params(
        ("id" = i64, Path, description = "Promotion id")
    ),
    request_body(content = PromotionForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Promotion updated", body = PromotionEnvelope),
        (status = 400, description = "Invalid promotion data or image", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Promotion not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<PromotionEnvelope>> {
    let existing = PromotionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| promotion_not_found(id))?;

    let form = MultipartForm::read(multipart, IMAGE_FIELD).await?;
    let fields = PromotionFields::from_form(&form);
    fields.validate()?;

    let image_path = match &form.file {
        Some(file) => Some(state.uploads.save(UploadKind::Promotion, file).await?),
        None => None,
    };

    let patch = UpdatePromotion {
        title: fields.title,
        description: fields.description,
        image_path: image_path.clone(),
    };
    let result = match PromotionRepo::update(&state.pool, id, &patch).await {
        Ok(Some(promotion)) => Ok(promotion),
        Ok(None) => Err(promotion_not_found(id)),
        Err(e) => Err(AppError::from(e)),
    };
    let promotion = state
        .uploads
        .discard_on_error(image_path.as_deref(), result)
        .await?;

    if image_path.is_some() {
        state.uploads.remove(&existing.image_path).await;
    }

    Ok(Json(PromotionEnvelope {
        msg: "Promotion updated",
        promotion,
    }))
}

/// DELETE /promotions/delete/{id}
#[utoipa::path(
    delete,
    path = "/promotions/delete/{id}",
    tag = PROMOTION_TAG,
    params(
        ("id" = i64, Path, description = "Promotion id")
    ),
    responses(
        (status = 200, description = "Promotion deleted", body = PromotionEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Admin role required", body = ErrorBody),
        (status = 404, description = "Promotion not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<PromotionEnvelope>> {
    let promotion = PromotionRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| promotion_not_found(id))?;

    state.uploads.remove(&promotion.image_path).await;

    tracing::info!(promotion_id = id, admin_id = admin.user_id, "Promotion deleted");

    Ok(Json(PromotionEnvelope {
        msg: "Promotion deleted",
        promotion,
    }))
}

fn promotion_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Promotion", id))
}
