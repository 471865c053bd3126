//! Booking entity model, DTOs, and the expanded read shape.

use serde::Serialize;
use sqlx::FromRow;
use stay_core::types::{DbId, Timestamp};
use utoipa::ToSchema;

use crate::models::nomer::Nomer;
use crate::models::user::UserResponse;

/// A booking row from the `bookings` table.
///
/// `status` holds one of the `stay_core::booking::BookingStatus` names; the
/// column carries a CHECK constraint with the same set.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Booking {
    #[schema(value_type = i64)]
    pub id: DbId,
    #[schema(value_type = i64)]
    pub user_id: DbId,
    #[schema(value_type = i64)]
    pub nomer_id: DbId,
    #[schema(value_type = i64)]
    pub hostess_id: DbId,
    pub status: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for inserting a booking. Status defaults to `Pending` in the database.
#[derive(Debug)]
pub struct CreateBooking {
    pub user_id: DbId,
    pub nomer_id: DbId,
    pub hostess_id: DbId,
}

/// A booking with its user, room, and hostess references resolved.
///
/// A reference whose target no longer exists is rendered as `null`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetail {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub status: String,
    pub user: Option<UserResponse>,
    pub nomer: Option<Nomer>,
    pub hostess: Option<UserResponse>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}
