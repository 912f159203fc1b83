//! Role administration handlers

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use profile_core::domain::Role;
use profile_core::dto::RoleCreateDto;

use crate::response::ApiError;
use crate::state::AppState;

/// POST /api/v1/roles
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<RoleCreateDto>,
) -> Result<Json<Role>, ApiError> {
    let role = state.role_service.create(payload).await?;
    Ok(Json(role))
}

/// GET /api/v1/roles/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Role>, ApiError> {
    state
        .role_service
        .find_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Role {} not found", name.to_uppercase())))
}

/// GET /api/v1/roles/total
pub async fn total(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let total = state.role_service.find_total().await?;
    Ok(Json(json!({ "total": total })))
}
