//! Repository for the `bookings` table.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use stay_core::booking::BookingStatus;
use stay_core::types::DbId;

use crate::models::booking::{Booking, BookingDetail, CreateBooking};
use crate::models::nomer::Nomer;
use crate::models::user::UserResponse;
use crate::repositories::{NomerRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, nomer_id, hostess_id, status, created_at, updated_at";

/// Provides CRUD operations for bookings plus reference expansion.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking in `Pending` state, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (user_id, nomer_id, hostess_id, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.nomer_id)
            .bind(input.hostess_id)
            .bind(BookingStatus::default().as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bookings, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Booking>(&query).fetch_all(pool).await
    }

    /// List bookings requested by the given user.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a booking with its user, room, and hostess resolved.
    pub async fn find_expanded_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingDetail>, sqlx::Error> {
        let Some(booking) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::expand(pool, vec![booking]).await?.pop())
    }

    /// List all bookings with references resolved, most recent first.
    pub async fn list_expanded(pool: &PgPool) -> Result<Vec<BookingDetail>, sqlx::Error> {
        let bookings = Self::list(pool).await?;
        Self::expand(pool, bookings).await
    }

    /// Set the status of a booking. Returns `None` if the booking is gone.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a booking, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("DELETE FROM bookings WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete every booking requested by `user_id` inside an open transaction.
    ///
    /// Bookings where the user is only the assigned hostess are kept.
    /// Returns the number of rows removed.
    pub async fn delete_by_user(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Resolve references for a batch of bookings with one query per table.
    async fn expand(
        pool: &PgPool,
        bookings: Vec<Booking>,
    ) -> Result<Vec<BookingDetail>, sqlx::Error> {
        let mut user_ids: Vec<DbId> = bookings
            .iter()
            .flat_map(|b| [b.user_id, b.hostess_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let mut nomer_ids: Vec<DbId> = bookings.iter().map(|b| b.nomer_id).collect();
        nomer_ids.sort_unstable();
        nomer_ids.dedup();

        let users: HashMap<DbId, UserResponse> = UserRepo::find_many(pool, &user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, UserResponse::from(u)))
            .collect();
        let nomers: HashMap<DbId, Nomer> = NomerRepo::find_many(pool, &nomer_ids)
            .await?
            .into_iter()
            .map(|n| (n.id, n))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|b| BookingDetail {
                id: b.id,
                status: b.status,
                user: users.get(&b.user_id).cloned(),
                nomer: nomers.get(&b.nomer_id).cloned(),
                hostess: users.get(&b.hostess_id).cloned(),
                created_at: b.created_at,
                updated_at: b.updated_at,
            })
            .collect())
    }
}
