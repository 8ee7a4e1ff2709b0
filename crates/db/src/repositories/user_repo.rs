//! Repository for the `users` table.

use roombook_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::user::{CreateUser, User};
use crate::repositories::profile_repo::ProfileRepo;

/// Account projection with the role name and profile department joined in.
const USER_SELECT: &str = "SELECT u.id, u.username, u.email, u.password_hash, r.name AS role, \
            p.department, u.is_active, u.token_version, u.last_login_at, \
            u.failed_login_count, u.locked_until, u.created_at, u.updated_at \
     FROM users u \
     JOIN roles r ON r.id = u.role_id \
     LEFT JOIN profiles p ON p.user_id = u.id";

/// Accounts, login bookkeeping and token revocation.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user without a profile (staff accounts, fixtures).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let id = Self::insert(pool, input).await?;
        Self::fetch(pool, id).await
    }

    /// Insert a user together with their department profile in one
    /// transaction.
    ///
    /// Unique violations surface as `uq_users_username` / `uq_users_email`.
    pub async fn register(
        pool: &PgPool,
        input: &CreateUser,
        department: &str,
    ) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let id = Self::insert(&mut *tx, input).await?;
        ProfileRepo::create_inner(&mut tx, id, department).await?;
        let user = Self::fetch(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(user)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("{USER_SELECT} WHERE u.id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-sensitive lookup used by login.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("{USER_SELECT} WHERE u.username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Count a failed password attempt and return the length of the current
    /// failure streak.
    ///
    /// A streak that ended in a lock which has since expired starts over at 1.
    pub async fn record_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET \
                failed_login_count = CASE WHEN locked_until <= NOW() THEN 1 \
                                          ELSE failed_login_count + 1 END, \
                locked_until = CASE WHEN locked_until <= NOW() THEN NULL \
                                    ELSE locked_until END \
             WHERE id = $1 \
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Clear the failure streak and any lock, and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET failed_login_count = 0, locked_until = NULL, last_login_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Invalidate every access token issued to the user so far.
    ///
    /// Returns the new version, or `None` if the user does not exist.
    pub async fn revoke_tokens(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET token_version = token_version + 1 \
             WHERE id = $1 \
             RETURNING token_version",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// The role is looked up by name; an unseeded role leaves `role_id` NULL
    /// and the NOT NULL constraint rejects the row.
    async fn insert<'e, E>(executor: E, input: &CreateUser) -> Result<DbId, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash, role_id) \
             VALUES ($1, $2, $3, (SELECT id FROM roles WHERE name = $4)) \
             RETURNING id",
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(&input.role)
        .fetch_one(executor)
        .await
    }

    async fn fetch<'e, E>(executor: E, id: DbId) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{USER_SELECT} WHERE u.id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }
}
