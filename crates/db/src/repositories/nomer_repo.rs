//! Repository for the `nomers` (rooms) table.

use sqlx::PgPool;
use stay_core::types::DbId;
use uuid::Uuid;

use crate::models::nomer::{CreateNomer, Nomer, UpdateNomer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, uuid, name, description, price, image_path, created_at, updated_at";

/// Provides CRUD operations for rooms. Public lookups go by UUID.
pub struct NomerRepo;

impl NomerRepo {
    /// Insert a new room with a freshly generated v4 UUID.
    pub async fn create(pool: &PgPool, input: &CreateNomer) -> Result<Nomer, sqlx::Error> {
        let query = format!(
            "INSERT INTO nomers (uuid, name, description, price, image_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Nomer>(&query)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.price)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<Nomer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM nomers WHERE uuid = $1");
        sqlx::query_as::<_, Nomer>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Find every room whose internal id is in `ids`.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Nomer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM nomers WHERE id = ANY($1)");
        sqlx::query_as::<_, Nomer>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all rooms ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Nomer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM nomers ORDER BY name ASC");
        sqlx::query_as::<_, Nomer>(&query).fetch_all(pool).await
    }

    /// Patch a room. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        uuid: Uuid,
        input: &UpdateNomer,
    ) -> Result<Option<Nomer>, sqlx::Error> {
        let query = format!(
            "UPDATE nomers SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image_path = COALESCE($5, image_path)
             WHERE uuid = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Nomer>(&query)
            .bind(uuid)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.price)
            .bind(&input.image_path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a room by UUID, returning the removed row.
    ///
    /// Bookings that reference the room are left untouched.
    pub async fn delete_by_uuid(pool: &PgPool, uuid: Uuid) -> Result<Option<Nomer>, sqlx::Error> {
        let query = format!("DELETE FROM nomers WHERE uuid = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Nomer>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }
}
