//! Authentication service

use profile_security::{JwtService, PasswordService};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::User;
use crate::dto::RegisterDto;
use crate::error::DomainError;
use crate::repositories::UserRepository;

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: JwtService) -> Self {
        Self { user_repo, jwt }
    }

    /// Register a new, inactive user. The returned verification code is
    /// mailed to the user by the caller; the account stays locked until
    /// `verify_email` confirms it.
    pub async fn register(&self, register_dto: RegisterDto) -> Result<RegisterResult, DomainError> {
        if let Err(errors) = register_dto.validate() {
            info!(email = %register_dto.email, "register validation failed: {}", errors);
            return Err(DomainError::Validation(errors));
        }

        let email = register_dto.email.to_lowercase();
        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "register failed, email already exists");
            return Err(DomainError::EmailAlreadyExists(email));
        }
        if self
            .user_repo
            .find_by_username(&register_dto.username)
            .await?
            .is_some()
        {
            warn!(username = %register_dto.username, "register failed, username already exists");
            return Err(DomainError::UsernameAlreadyExists(register_dto.username));
        }

        let hash = PasswordService::hash(&register_dto.password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let code = PasswordService::generate_verification_code();
        let user = User::new(register_dto.username, email, Some(hash), code);

        let created = self.user_repo.create(&user).await?;
        info!(id = %created.id, email = %created.email, "user registered");

        Ok(RegisterResult {
            user: UserInfo::from(&created),
            verification_code: code,
        })
    }

    pub async fn verify_email(&self, email: &str, code: i32) -> Result<(), DomainError> {
        let mut user = self
            .user_repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or(DomainError::UserNotFound)?;

        if user.verification_code != Some(code) {
            warn!(email = %user.email, "email verification failed, wrong code");
            return Err(DomainError::InvalidVerificationCode);
        }

        user.mark_verified();
        self.user_repo.update(&user).await?;
        info!(email = %user.email, "email verified");
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, DomainError> {
        let mut user = self
            .user_repo
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "login failed, email not found");
                DomainError::InvalidCredentials
            })?;

        if !user.can_login() {
            warn!(email = %email, "login failed, user not active");
            return Err(DomainError::UserNotActive);
        }

        let stored_hash = user.password.clone().ok_or(DomainError::InvalidCredentials)?;
        let valid = PasswordService::verify(password, &stored_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            warn!(email = %email, "login failed, invalid password");
            return Err(DomainError::InvalidCredentials);
        }

        let access_token = self
            .jwt
            .generate_access_token(&user.id, &user.email)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;
        let refresh_token = self
            .jwt
            .generate_refresh_token(&user.id, &user.email)
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        user.record_login();
        if let Err(e) = self.user_repo.update(&user).await {
            // A failed last-login stamp must not fail the login itself.
            error!(email = %user.email, "failed to record last login: {}", e);
        }

        info!(email = %user.email, "login successful");
        Ok(LoginResult {
            user: UserInfo::from(&user),
            access_token,
            refresh_token,
        })
    }
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: UserInfo,
    pub verification_code: i32,
}

#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub group_id: Option<Uuid>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            group_id: user.group_id,
        }
    }
}
