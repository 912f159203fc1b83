//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    /// Group membership; an active member blocks its group's deletion.
    pub group_id: Option<Uuid>,

    pub is_active: bool,
    pub email_verified: bool,
    pub verification_code: Option<i32>,
    pub last_login: Option<DateTime<Utc>>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        username: String,
        email: String,
        password: Option<String>,
        verification_code: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email: email.to_lowercase(),
            password,
            group_id: None,
            is_active: false,
            email_verified: false,
            verification_code: Some(verification_code),
            last_login: None,
            created_at: Utc::now(),
            modified_at: None,
            removed_at: None,
        }
    }

    pub fn can_login(&self) -> bool {
        self.is_active && self.email_verified && self.removed_at.is_none()
    }

    pub fn record_login(&mut self) {
        self.last_login = Some(Utc::now());
        self.modified_at = Some(Utc::now());
    }

    pub fn mark_verified(&mut self) {
        self.email_verified = true;
        self.is_active = true;
        self.verification_code = None;
        self.modified_at = Some(Utc::now());
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_unverified() {
        let user = User::new(
            "alice".to_string(),
            "Alice@Example.com".to_string(),
            Some("hash".to_string()),
            123_456,
        );
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.can_login());
        assert_eq!(user.verification_code, Some(123_456));
    }

    #[test]
    fn verified_user_can_login() {
        let mut user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            Some("hash".to_string()),
            123_456,
        );
        user.mark_verified();
        assert!(user.can_login());
        assert_eq!(user.verification_code, None);
    }
}
