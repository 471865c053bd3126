//! Repository for the `promotions` table.

use sqlx::PgPool;
use stay_core::types::DbId;

use crate::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};

const COLUMNS: &str = "id, title, description, image_path, upload_date, created_at, updated_at";

pub struct PromotionRepo;

impl PromotionRepo {
    pub async fn create(pool: &PgPool, input: &CreatePromotion) -> Result<Promotion, sqlx::Error> {
        let query = format!(
            "INSERT INTO promotions (title, description, image_path)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions WHERE id = $1");
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List promotions, newest upload first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Promotion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM promotions ORDER BY upload_date DESC, id DESC");
        sqlx::query_as::<_, Promotion>(&query).fetch_all(pool).await
    }

    /// Patch a promotion. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePromotion,
    ) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!(
            "UPDATE promotions SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                image_path = COALESCE($4, image_path)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_path)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Promotion>, sqlx::Error> {
        let query = format!("DELETE FROM promotions WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Promotion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
