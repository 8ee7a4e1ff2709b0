//! Repository for the `profiles` table.

use roombook_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::profile::Profile;

const COLUMNS: &str = "user_id, department, created_at, updated_at";

pub struct ProfileRepo;

impl ProfileRepo {
    /// Find the profile for a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a profile inside a caller-owned transaction.
    pub(crate) async fn create_inner(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        department: &str,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, department) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(department)
            .fetch_one(&mut **tx)
            .await
    }
}
