//! Bearer-JWT guard for administrative routes

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller, inserted into request extensions by the guard.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Rejects the request with 401 unless it carries a valid access
/// token; refresh tokens are not accepted here.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(ApiError::unauthorized)?;

    let claims = state.jwt.validate_access_token(token).map_err(|e| {
        warn!("auth guard rejected token: {}", e);
        ApiError::unauthorized()
    })?;

    let user_id = claims.user_id().ok_or_else(ApiError::unauthorized)?;
    req.extensions_mut().insert(AuthUser {
        id: user_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
