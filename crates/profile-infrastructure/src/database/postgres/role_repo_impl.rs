//! PostgreSQL role repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use profile_core::domain::Role;
use profile_core::error::DomainError;
use profile_core::repositories::RoleRepository;

use super::is_unique_violation;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn save(&self, role: &Role) -> Result<Role, DomainError> {
        let row: RoleRow = sqlx::query_as(
            r#"
            INSERT INTO roles (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, created_at, modified_at, removed_at
            "#,
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(role.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                info!(name = %role.name, "role insert hit unique constraint");
                DomainError::RoleNameAlreadyExists(role.name.clone())
            } else {
                error!("Database error creating role: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, modified_at, removed_at
            FROM roles
            WHERE id = $1 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding role by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, created_at, modified_at, removed_at
            FROM roles
            WHERE name = $1 AND removed_at IS NULL
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding role by name: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;
        Ok(row.map(|r| r.into()))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM roles WHERE removed_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting roles: {}", e);
                DomainError::DatabaseError(e.to_string())
            })
    }
}
