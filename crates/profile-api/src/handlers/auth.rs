//! Authentication handlers (register, verify, login)

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use profile_core::dto::RegisterDto;
use profile_core::services::UserInfo;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: i32,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserDto,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

impl From<UserInfo> for UserDto {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            email_verified: user.email_verified,
            group_id: user.group_id,
        }
    }
}

/// POST /api/v1/auth/register
///
/// The confirmation code is mailed out-of-band; delivery failure is
/// logged but never fails the registration itself.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<Json<Value>, ApiError> {
    let result = state.auth_service.register(payload).await?;
    state.mailer.send_code_confirmation(
        &result.user.username,
        &result.user.email,
        result.verification_code,
    );
    Ok(Json(json!({
        "user": UserDto::from(result.user),
        "message": "Registration successful. Please verify your email."
    })))
}

/// POST /api/v1/auth/verify
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .auth_service
        .verify_email(&payload.email, payload.code)
        .await?;
    Ok(Json(json!({ "verified": true })))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::new(
            axum::http::StatusCode::BAD_REQUEST,
            "Email and password are required",
        ));
    }

    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(AuthResponse {
        user: result.user.into(),
        access_token: result.access_token,
        refresh_token: result.refresh_token,
    }))
}
