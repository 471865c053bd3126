//! Room ("nomer") entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stay_core::types::{DbId, Timestamp};
use utoipa::ToSchema;
use uuid::Uuid;

/// A room row from the `nomers` table.
///
/// `uuid` is the public identifier used in routes; `id` is internal and is
/// what bookings reference.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Nomer {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_path: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for creating a room. The UUID is generated by the repository.
#[derive(Debug)]
pub struct CreateNomer {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_path: Option<String>,
}

/// DTO for patching a room. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateNomer {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image_path: Option<String>,
}
