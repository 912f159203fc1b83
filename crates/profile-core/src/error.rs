//! Domain errors

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Input data validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    #[error("Role {0} not found")]
    RoleNotFound(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Group name already exists: {0}")]
    GroupNameAlreadyExists(String),

    #[error("Role name already exists: {0}")]
    RoleNameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Group {0} could not delete")]
    GroupHasUsers(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not active")]
    UserNotActive,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Single-field violation for checks that live outside a DTO,
    /// e.g. the sort-field allow-list.
    pub fn field_violation(field: &'static str, code: &'static str, message: &str) -> Self {
        let mut error = ValidationError::new(code);
        error.message = Some(message.to_string().into());
        let mut errors = ValidationErrors::new();
        errors.add(field.into(), error);
        DomainError::Validation(errors)
    }
}
