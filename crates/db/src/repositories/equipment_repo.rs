//! Repository for the `equipment` table.

use roombook_core::types::DbId;
use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment};

const COLUMNS: &str = "id, name, description, total_quantity, created_at, updated_at";

pub struct EquipmentRepo;

impl EquipmentRepo {
    pub async fn create(pool: &PgPool, input: &CreateEquipment) -> Result<Equipment, sqlx::Error> {
        let query = format!(
            "INSERT INTO equipment (name, description, total_quantity) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Equipment>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.total_quantity)
            .fetch_one(pool)
            .await
    }

    /// List all equipment ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY name ASC");
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Count how many of `ids` exist. Callers pass de-duplicated ids.
    pub async fn count_existing(pool: &PgPool, ids: &[DbId]) -> Result<i64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE id = ANY($1)")
                .bind(ids)
                .fetch_one(pool)
                .await?;
        Ok(count.unwrap_or(0))
    }
}
