//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use profile_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Wrong token type: expected {expected}, got {got}")]
    WrongTokenType { expected: String, got: String },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

pub struct JwtService {
    secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: String, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            secret,
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn generate_access_token(&self, user_id: &Uuid, email: &str) -> Result<String, JwtError> {
        self.generate_token(user_id, email, TOKEN_TYPE_ACCESS, self.access_token_expiry)
    }

    pub fn generate_refresh_token(&self, user_id: &Uuid, email: &str) -> Result<String, JwtError> {
        self.generate_token(user_id, email, TOKEN_TYPE_REFRESH, self.refresh_token_expiry)
    }

    fn generate_token(
        &self,
        user_id: &Uuid,
        email: &str,
        token_type: &str,
        expiry: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: token_type.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| JwtError::ValidationError(e.to_string()))
    }

    /// Validate a bearer token for guarded routes; refresh tokens are
    /// not accepted as a login proof.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(JwtError::WrongTokenType {
                expected: TOKEN_TYPE_ACCESS.to_string(),
                got: claims.token_type,
            });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret".to_string(), 900, 604800)
    }

    #[test]
    fn access_token_round_trip() {
        let svc = service();
        let id = Uuid::new_v4();
        let token = svc.generate_access_token(&id, "user@example.com").unwrap();
        let claims = svc.validate_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(id));
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
    }

    #[test]
    fn refresh_token_rejected_as_access() {
        let svc = service();
        let id = Uuid::new_v4();
        let token = svc.generate_refresh_token(&id, "user@example.com").unwrap();
        assert!(matches!(
            svc.validate_access_token(&token),
            Err(JwtError::WrongTokenType { .. })
        ));
    }

    #[test]
    fn tampered_token_fails_validation() {
        let svc = service();
        let other = JwtService::new("other-secret".to_string(), 900, 604800);
        let token = svc
            .generate_access_token(&Uuid::new_v4(), "user@example.com")
            .unwrap();
        assert!(other.validate_token(&token).is_err());
    }
}
