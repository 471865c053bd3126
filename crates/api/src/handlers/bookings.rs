//! Handlers for the `/booking` resource.
//!
//! Any signed-in user can request a booking; everything else is staff work.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use stay_core::booking::{pick_random, BookingStatus};
use stay_core::error::CoreError;
use stay_core::roles::ROLE_HOSTESS;
use stay_core::types::DbId;
use stay_db::models::booking::{Booking, BookingDetail, CreateBooking};
use stay_db::repositories::{BookingRepo, NomerRepo, UserRepo};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult, ErrorBody};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// Tag for grouping booking endpoints in OpenAPI documentation
pub static BOOKING_TAG: &str = "booking";

/// Request body for `POST /booking/create`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    /// Id of the requesting user.
    #[schema(value_type = i64)]
    pub user: DbId,
    /// Public UUID of the room.
    pub nomer: Uuid,
}

/// Request body for `PUT /booking/update/{id}`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookingRequest {
    /// `Pending`, `Approved` or `Rejected`.
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingEnvelope {
    pub msg: &'static str,
    pub booking: Booking,
}

/// POST /booking/create
///
/// Resolves the user and room, assigns a hostess picked uniformly at random
/// and stores the booking as `Pending`. Nothing is written when no hostess
/// exists.
#[utoipa::path(
    post,
    path = "/booking/create",
    tag = BOOKING_TAG,
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created as Pending", body = BookingEnvelope),
        (status = 400, description = "Malformed booking request", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "User, room or hostess not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingEnvelope>)> {
    let user = UserRepo::find_by_id(&state.pool, input.user)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let nomer = NomerRepo::find_by_uuid(&state.pool, input.nomer)
        .await?
        .ok_or_else(|| AppError::NotFound("Nomer not found".into()))?;

    let hostesses = UserRepo::list_by_role(&state.pool, ROLE_HOSTESS).await?;
    let hostess_id = pick_random(&hostesses, &mut rand::rng())
        .map(|h| h.id)
        .ok_or_else(|| AppError::NotFound("No hostesses available".into()))?;

    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            user_id: user.id,
            nomer_id: nomer.id,
            hostess_id,
        },
    )
    .await?;

    tracing::info!(
        booking_id = booking.id,
        user_id = user.id,
        hostess_id,
        requested_by = auth.user_id,
        "Booking created"
    );

    Ok((
        StatusCode::CREATED,
        Json(BookingEnvelope {
            msg: "Booking created",
            booking,
        }),
    ))
}

/// GET /booking/readall
#[utoipa::path(
    get,
    path = "/booking/readall",
    tag = BOOKING_TAG,
    responses(
        (status = 200, description = "All bookings with references resolved", body = Vec<BookingDetail>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_all(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<Json<Vec<BookingDetail>>> {
    Ok(Json(BookingRepo::list_expanded(&state.pool).await?))
}

/// GET /booking/read/{id}
#[utoipa::path(
    get,
    path = "/booking/read/{id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i64, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "The booking with references resolved", body = BookingDetail),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn read_one(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingDetail>> {
    let booking = BookingRepo::find_expanded_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;
    Ok(Json(booking))
}

/// PUT /booking/update/{id}
///
/// Only the status can change, and only to one of the known values.
#[utoipa::path(
    put,
    path = "/booking/update/{id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i64, Path, description = "Booking id")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Status changed", body = BookingEnvelope),
        (status = 400, description = "Unknown status", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBookingRequest>,
) -> AppResult<Json<BookingEnvelope>> {
    let status: BookingStatus = input.status.parse()?;

    let booking = BookingRepo::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| booking_not_found(id))?;

    tracing::info!(booking_id = id, %status, user_id = staff.user_id, "Booking status changed");

    Ok(Json(BookingEnvelope {
        msg: "Booking updated",
        booking,
    }))
}

/// DELETE /booking/delete/{id}
#[utoipa::path(
    delete,
    path = "/booking/delete/{id}",
    tag = BOOKING_TAG,
    params(
        ("id" = i64, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = BookingEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Staff role required", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
)]
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingEnvelope>> {
    let booking = BookingRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| booking_not_found(id))?;

    tracing::info!(booking_id = id, user_id = staff.user_id, "Booking deleted");

    Ok(Json(BookingEnvelope {
        msg: "Booking deleted",
        booking,
    }))
}

fn booking_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Booking", id))
}
