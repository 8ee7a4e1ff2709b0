//! Repository for the `bookings` and `booking_equipment` tables.

use roombook_core::booking::{status_ids, BookingStatus};
use roombook_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::booking::{Booking, BookingDetail, BookingInput};
use crate::repositories::notification_repo::NotificationRepo;

/// Column list for plain `bookings` queries.
const COLUMNS: &str =
    "id, user_id, room_id, start_time, end_time, purpose, status_id, created_at, updated_at";

/// Joined projection for [`BookingDetail`]; alias `b` is `bookings`.
const DETAIL_SELECT: &str = "SELECT b.id, b.user_id, u.username, b.room_id, r.name AS room_name, \
            b.start_time, b.end_time, b.purpose, b.status_id, s.name AS status, \
            ARRAY(SELECT be.equipment_id FROM booking_equipment be \
                  WHERE be.booking_id = b.id ORDER BY be.equipment_id) AS equipment_ids, \
            b.created_at, b.updated_at \
     FROM bookings b \
     JOIN users u ON u.id = b.user_id \
     JOIN rooms r ON r.id = b.room_id \
     JOIN booking_statuses s ON s.id = b.status_id";

/// Provides CRUD, conflict lookup and status transitions for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new `pending` booking and its equipment links in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &BookingInput,
    ) -> Result<Booking, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO bookings (user_id, room_id, start_time, end_time, purpose, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(input.room_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.purpose.trim())
            .bind(BookingStatus::Pending.id())
            .fetch_one(&mut *tx)
            .await?;

        Self::set_equipment_inner(&mut tx, booking.id, &input.equipment_ids).await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Find a booking by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking by ID with owner, room, status name and equipment.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, BookingDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's bookings, most recent start first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookingDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} WHERE b.user_id = $1 ORDER BY b.start_time DESC, b.id DESC"
        );
        sqlx::query_as::<_, BookingDetail>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all bookings in any of `statuses`.
    ///
    /// `oldest_first` orders by `start_time ASC` (review queues); otherwise
    /// `DESC` (history).
    pub async fn list_by_statuses(
        pool: &PgPool,
        statuses: &[BookingStatus],
        oldest_first: bool,
    ) -> Result<Vec<BookingDetail>, sqlx::Error> {
        let order = if oldest_first { "ASC" } else { "DESC" };
        let query = format!(
            "{DETAIL_SELECT} WHERE b.status_id = ANY($1) \
             ORDER BY b.start_time {order}, b.id {order}"
        );
        sqlx::query_as::<_, BookingDetail>(&query)
            .bind(status_ids(statuses))
            .fetch_all(pool)
            .await
    }

    /// Return the first booking on `room_id` that overlaps `[start, end)` and
    /// whose status is in `blocking`.
    ///
    /// `exclude_id` skips the booking being edited or reviewed so it never
    /// conflicts with itself. Read-only.
    pub async fn find_conflict(
        pool: &PgPool,
        room_id: DbId,
        start: Timestamp,
        end: Timestamp,
        blocking: &[BookingStatus],
        exclude_id: Option<DbId>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings \
             WHERE room_id = $1 \
               AND start_time < $3 \
               AND $2 < end_time \
               AND status_id = ANY($4) \
               AND ($5::BIGINT IS NULL OR id <> $5) \
             ORDER BY start_time ASC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(room_id)
            .bind(start)
            .bind(end)
            .bind(status_ids(blocking))
            .bind(exclude_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a pending booking's details and equipment links.
    ///
    /// Returns `None` if the booking does not exist or is no longer pending.
    pub async fn update_pending(
        pool: &PgPool,
        id: DbId,
        input: &BookingInput,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bookings SET \
                room_id = $3, \
                start_time = $4, \
                end_time = $5, \
                purpose = $6 \
             WHERE id = $1 AND status_id = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(BookingStatus::Pending.id())
            .bind(input.room_id)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.purpose.trim())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(booking) = updated else {
            return Ok(None);
        };

        Self::set_equipment_inner(&mut tx, booking.id, &input.equipment_ids).await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Move a booking from `from` to `to`.
    ///
    /// The `from` guard makes the update a no-op (returning `None`) when
    /// another request changed the status first.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET status_id = $3 \
             WHERE id = $1 AND status_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .fetch_optional(pool)
            .await
    }

    /// Apply a staff decision to a pending booking and notify its owner.
    ///
    /// The status change and the single notification row are written in one
    /// transaction. Returns `None` (and writes nothing) if the booking is
    /// no longer pending.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        decision: BookingStatus,
        message: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE bookings SET status_id = $3 \
             WHERE id = $1 AND status_id = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(BookingStatus::Pending.id())
            .bind(decision.id())
            .fetch_optional(&mut *tx)
            .await?;

        let Some(booking) = updated else {
            return Ok(None);
        };

        NotificationRepo::create_inner(&mut tx, booking.user_id, message).await?;

        tx.commit().await?;
        Ok(Some(booking))
    }

    /// Promote every approved booking whose end time is before `now` to
    /// `completed`. Returns the number of bookings promoted.
    pub async fn complete_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE bookings SET status_id = $1 \
             WHERE status_id = $2 AND end_time < $3",
        )
        .bind(BookingStatus::Completed.id())
        .bind(BookingStatus::Approved.id())
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Replace the equipment links of a booking inside an open transaction.
    async fn set_equipment_inner(
        tx: &mut Transaction<'_, Postgres>,
        booking_id: DbId,
        equipment_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM booking_equipment WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&mut **tx)
            .await?;

        if !equipment_ids.is_empty() {
            sqlx::query(
                "INSERT INTO booking_equipment (booking_id, equipment_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(booking_id)
            .bind(equipment_ids)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
