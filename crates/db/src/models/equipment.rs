//! Bookable equipment model and DTOs.

use roombook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `equipment` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub total_quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an equipment item.
#[derive(Debug, Deserialize)]
pub struct CreateEquipment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub total_quantity: i32,
}
