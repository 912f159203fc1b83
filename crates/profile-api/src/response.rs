//! API failure envelope and DomainError -> HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use profile_core::error::DomainError;

/// Failure payload handed to callers: a message, plus field-level
/// violations when validation failed. Internals never leak here.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                errors: None,
            },
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    message: "Input data validation failed".to_string(),
                    errors: serde_json::to_value(&errors).ok(),
                },
            },
            DomainError::InvalidVerificationCode => {
                Self::new(StatusCode::BAD_REQUEST, err.to_string())
            }
            DomainError::InvalidCredentials => Self::new(StatusCode::UNAUTHORIZED, err.to_string()),
            DomainError::UserNotActive => Self::new(StatusCode::FORBIDDEN, err.to_string()),
            DomainError::GroupNotFound(_)
            | DomainError::RoleNotFound(_)
            | DomainError::UserNotFound => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            DomainError::GroupNameAlreadyExists(_)
            | DomainError::RoleNameAlreadyExists(_)
            | DomainError::EmailAlreadyExists(_)
            | DomainError::UsernameAlreadyExists(_) => {
                Self::new(StatusCode::CONFLICT, err.to_string())
            }
            DomainError::GroupHasUsers(_) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            DomainError::PasswordHashError(_)
            | DomainError::TokenGenerationError(_)
            | DomainError::DatabaseError(_)
            | DomainError::InternalError(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationErrors;

    #[test]
    fn validation_maps_to_bad_request_with_errors() {
        let err: ApiError =
            DomainError::field_violation("name", "length", "Name length at least 4 characters")
                .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.body.errors.is_some());
    }

    #[test]
    fn empty_validation_errors_still_bad_request() {
        let err: ApiError = DomainError::Validation(ValidationErrors::new()).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.message, "Input data validation failed");
    }

    #[test]
    fn not_found_kinds_map_to_404() {
        let group: ApiError = DomainError::GroupNotFound("EDITORS".to_string()).into();
        let role: ApiError = DomainError::RoleNotFound("EDITOR".to_string()).into();
        assert_eq!(group.status, StatusCode::NOT_FOUND);
        assert_eq!(role.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_name_maps_to_conflict() {
        let err: ApiError = DomainError::GroupNameAlreadyExists("EDITORS".to_string()).into();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn group_with_users_maps_to_unprocessable() {
        let err: ApiError = DomainError::GroupHasUsers("EDITORS".to_string()).into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn database_error_is_masked_as_internal() {
        let err: ApiError = DomainError::DatabaseError("connection refused".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body.message, "Something went wrong");
    }
}
