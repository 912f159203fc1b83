//! PostgreSQL user repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use profile_core::domain::User;
use profile_core::error::DomainError;
use profile_core::repositories::UserRepository;

use super::is_unique_violation;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub group_id: Option<Uuid>,
    pub is_active: bool,
    pub email_verified: bool,
    pub verification_code: Option<i32>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password: row.password,
            group_id: row.group_id,
            is_active: row.is_active,
            email_verified: row.email_verified,
            verification_code: row.verification_code,
            last_login: row.last_login,
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        }
    }
}

const USER_COLUMNS: &str = r#"
    id, username, email, password, group_id,
    is_active, email_verified, verification_code, last_login,
    created_at, modified_at, removed_at
"#;

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO users ({USER_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        );
        let row: UserRow = sqlx::query_as(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.group_id)
            .bind(user.is_active)
            .bind(user.email_verified)
            .bind(user.verification_code)
            .bind(user.last_login)
            .bind(user.created_at)
            .bind(user.modified_at)
            .bind(user.removed_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                if is_unique_violation(&e) {
                    let constraint = match &e {
                        sqlx::Error::Database(db) => db.constraint().unwrap_or_default().to_string(),
                        _ => String::new(),
                    };
                    if constraint.contains("email") {
                        DomainError::EmailAlreadyExists(user.email.clone())
                    } else {
                        DomainError::UsernameAlreadyExists(user.username.clone())
                    }
                } else {
                    error!("Database error creating user: {}", e);
                    DomainError::DatabaseError(e.to_string())
                }
            })?;

        info!(id = %row.id, "user created");
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, password = $4, group_id = $5,
                is_active = $6, email_verified = $7, verification_code = $8,
                last_login = $9, modified_at = $10, removed_at = $11
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let row: UserRow = sqlx::query_as(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.group_id)
            .bind(user.is_active)
            .bind(user.email_verified)
            .bind(user.verification_code)
            .bind(user.last_login)
            .bind(user.modified_at)
            .bind(user.removed_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating user: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND removed_at IS NULL"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding user by id: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1) AND removed_at IS NULL"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding user by email: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND removed_at IS NULL"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding user by username: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(row.map(|r| r.into()))
    }
}
