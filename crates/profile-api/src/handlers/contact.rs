//! Contact form handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/v1/contact
pub async fn contact_us(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<Value>, ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.message.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Name, email and message are required",
        ));
    }

    state
        .mailer
        .send_contact_us(&payload.name, &payload.email, &payload.message)
        .await
        .map_err(|e| {
            error!(name = %payload.name, email = %payload.email, "send_contact_us failed: {}", e);
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
        })?;

    Ok(Json(json!({ "sent": true })))
}
