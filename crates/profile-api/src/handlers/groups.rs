//! Group administration handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use profile_core::domain::Group;
use profile_core::dto::{GroupCreateDto, GroupUpdateDto};
use profile_shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use profile_shared::Page;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub offset: i64,
    pub limit: Option<i64>,
    pub sort_direction: Option<String>,
    pub sort_field: Option<String>,
}

/// POST /api/v1/groups
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<GroupCreateDto>,
) -> Result<Json<Group>, ApiError> {
    let group = state.group_service.create(payload).await?;
    Ok(Json(group))
}

/// PUT /api/v1/groups
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<GroupUpdateDto>,
) -> Result<Json<Group>, ApiError> {
    let group = state.group_service.update(payload).await?;
    Ok(Json(group))
}

/// DELETE /api/v1/groups/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    state.group_service.delete(&id).await?;
    Ok(Json(json!({ "deleted": true })))
}

/// DELETE /api/v1/groups/by-name/{name}
pub async fn delete_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.group_service.delete_by_name(&name).await?;
    Ok(Json(json!({ "deleted": true })))
}

/// GET /api/v1/groups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Group>, ApiError> {
    state
        .group_service
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Group {} not found", id)))
}

/// GET /api/v1/groups/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Group>, ApiError> {
    state
        .group_service
        .find_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Group {} not found", name.to_uppercase())))
}

/// GET /api/v1/groups
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Group>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE as i64)
        .clamp(1, MAX_PAGE_SIZE as i64);
    let sort_direction = query.sort_direction.as_deref().unwrap_or("asc");
    let sort_field = query.sort_field.as_deref().unwrap_or("name");

    let page = state
        .group_service
        .find_all(query.offset.max(0), limit, sort_direction, sort_field)
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/groups/total
pub async fn total(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let total = state.group_service.find_total().await?;
    Ok(Json(json!({ "total": total })))
}
