//! Promotion entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stay_core::types::{DbId, Timestamp};
use utoipa::ToSchema;

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Promotion {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_path: String,
    #[schema(value_type = String, format = DateTime)]
    pub upload_date: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreatePromotion {
    pub title: String,
    pub description: String,
    pub image_path: String,
}

#[derive(Debug, Default)]
pub struct UpdatePromotion {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
}
