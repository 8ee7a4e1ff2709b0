//! Handlers for bookable equipment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roombook_core::error::CoreError;
use roombook_db::models::equipment::{CreateEquipment, Equipment};
use roombook_db::repositories::EquipmentRepo;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/equipment
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Equipment>>>> {
    let items = EquipmentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/admin/equipment
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<DataResponse<Equipment>>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Equipment name is required".into()).into());
    }
    if input.total_quantity < 0 {
        return Err(CoreError::Validation("Quantity must not be negative".into()).into());
    }

    let item = EquipmentRepo::create(&state.pool, &input).await?;
    tracing::info!(equipment_id = item.id, created_by = staff.user_id, "Equipment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}
