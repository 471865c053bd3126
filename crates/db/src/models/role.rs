//! Role entity model.

use serde::Serialize;
use sqlx::FromRow;
use stay_core::types::{DbId, Timestamp};
use utoipa::ToSchema;

/// A role row from the `roles` table. `id` is the numeric role tag.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Role {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub name: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// DTO for creating a role with a caller-chosen tag.
#[derive(Debug)]
pub struct CreateRole {
    pub id: DbId,
    pub name: String,
}
