//! PostgreSQL group repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profile_shared::SortDirection;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use profile_core::domain::{Group, Role};
use profile_core::error::DomainError;
use profile_core::repositories::{GroupFilter, GroupRepository, GroupSortField};

use super::is_unique_violation;

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping, role joined in.
#[derive(Debug, FromRow)]
struct GroupRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
    pub role_id: Uuid,
    pub role_name: String,
    pub role_description: Option<String>,
    pub role_created_at: DateTime<Utc>,
    pub role_modified_at: Option<DateTime<Utc>>,
    pub role_removed_at: Option<DateTime<Utc>>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
            description: row.description,
            role: Role {
                id: row.role_id,
                name: row.role_name,
                description: row.role_description,
                created_at: row.role_created_at,
                modified_at: row.role_modified_at,
                removed_at: row.role_removed_at,
            },
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        }
    }
}

// Row type for writes that return only the group's own columns.
#[derive(Debug, FromRow)]
struct GroupOwnRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

const SELECT_JOINED: &str = r#"
    SELECT
        g.id, g.name, g.description, g.created_at, g.modified_at, g.removed_at,
        r.id AS role_id, r.name AS role_name, r.description AS role_description,
        r.created_at AS role_created_at, r.modified_at AS role_modified_at,
        r.removed_at AS role_removed_at
    FROM groups g
    INNER JOIN roles r ON r.id = g.role_id
"#;

const COUNT_JOINED_USERS_BY_ID: &str = r#"
    SELECT COUNT(u.id)
    FROM groups g
    INNER JOIN users u ON u.group_id = g.id
    WHERE g.id = $1
      AND g.removed_at IS NULL
      AND u.removed_at IS NULL
      AND u.is_active = TRUE
"#;

const COUNT_JOINED_USERS_BY_NAME: &str = r#"
    SELECT COUNT(u.id)
    FROM groups g
    INNER JOIN users u ON u.group_id = g.id
    WHERE g.name = $1
      AND g.removed_at IS NULL
      AND u.removed_at IS NULL
      AND u.is_active = TRUE
"#;

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn save(&self, group: &Group) -> Result<Group, DomainError> {
        let row: GroupOwnRow = sqlx::query_as(
            r#"
            INSERT INTO groups (id, name, description, role_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, created_at, modified_at, removed_at
            "#,
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.description)
        .bind(group.role.id)
        .bind(group.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            if is_unique_violation(&e) {
                info!(name = %group.name, "group insert hit unique constraint");
                DomainError::GroupNameAlreadyExists(group.name.clone())
            } else {
                error!("Database error creating group: {}", e);
                DomainError::DatabaseError(e.to_string())
            }
        })?;

        Ok(Group {
            id: row.id,
            name: row.name,
            description: row.description,
            role: group.role.clone(),
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        })
    }

    async fn update(&self, group: &Group) -> Result<Group, DomainError> {
        let row: GroupOwnRow = sqlx::query_as(
            r#"
            UPDATE groups
            SET description = $2, role_id = $3, modified_at = $4
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, name, description, created_at, modified_at, removed_at
            "#,
        )
        .bind(group.id)
        .bind(&group.description)
        .bind(group.role.id)
        .bind(group.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error updating group: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(Group {
            id: row.id,
            name: row.name,
            description: row.description,
            role: group.role.clone(),
            created_at: row.created_at,
            modified_at: row.modified_at,
            removed_at: row.removed_at,
        })
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError> {
        let sql = format!("{} WHERE g.id = $1 AND g.removed_at IS NULL", SELECT_JOINED);
        let row: Option<GroupRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding group by id: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError> {
        let sql = format!("{} WHERE g.name = $1 AND g.removed_at IS NULL", SELECT_JOINED);
        let row: Option<GroupRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding group by name: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(row.map(|r| r.into()))
    }

    async fn find_one(&self, filter: &GroupFilter) -> Result<Option<Group>, DomainError> {
        match filter {
            GroupFilter::Id(id) => self.find_by_id(id).await,
            GroupFilter::Name(name) => self.find_by_name(name).await,
        }
    }

    async fn find_and_count(
        &self,
        offset: i64,
        limit: i64,
        sort_field: GroupSortField,
        sort_direction: SortDirection,
    ) -> Result<(Vec<Group>, i64), DomainError> {
        // sort_field comes from the allow-list enum, never a raw string.
        let sql = format!(
            "{} WHERE g.removed_at IS NULL ORDER BY g.{} {} OFFSET $1 LIMIT $2",
            SELECT_JOINED,
            sort_field.as_column(),
            sort_direction.as_sql(),
        );
        let rows: Vec<GroupRow> = sqlx::query_as(&sql)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing groups: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        let total = self.count().await?;
        Ok((rows.into_iter().map(|r| r.into()).collect(), total))
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM groups WHERE removed_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error counting groups: {}", e);
                DomainError::DatabaseError(e.to_string())
            })
    }

    async fn count_joined_users(&self, filter: &GroupFilter) -> Result<i64, DomainError> {
        let query = match filter {
            GroupFilter::Id(id) => sqlx::query_scalar(COUNT_JOINED_USERS_BY_ID).bind(*id),
            GroupFilter::Name(name) => {
                sqlx::query_scalar(COUNT_JOINED_USERS_BY_NAME).bind(name.clone())
            }
        };
        query.fetch_one(&self.pool).await.map_err(|e: sqlx::Error| {
            error!("Database error counting group users: {}", e);
            DomainError::DatabaseError(e.to_string())
        })
    }

    /// Soft delete with a dependents re-check in the same transaction,
    /// so a concurrently added member cannot slip between the service's
    /// pre-check and the update.
    async fn soft_delete(&self, filter: &GroupFilter) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Database error starting delete transaction: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        let dependents: i64 = match filter {
            GroupFilter::Id(id) => sqlx::query_scalar(COUNT_JOINED_USERS_BY_ID).bind(*id),
            GroupFilter::Name(name) => {
                sqlx::query_scalar(COUNT_JOINED_USERS_BY_NAME).bind(name.clone())
            }
        }
        .fetch_one(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error re-checking group users: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        if dependents > 0 {
            // Transaction rolls back on drop.
            return Err(DomainError::GroupHasUsers(filter.to_string()));
        }

        let result = match filter {
            GroupFilter::Id(id) => {
                sqlx::query("UPDATE groups SET removed_at = NOW() WHERE id = $1 AND removed_at IS NULL")
                    .bind(*id)
            }
            GroupFilter::Name(name) => {
                sqlx::query("UPDATE groups SET removed_at = NOW() WHERE name = $1 AND removed_at IS NULL")
                    .bind(name.clone())
            }
        }
        .execute(&mut *tx)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error soft-deleting group: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e| {
            error!("Database error committing delete: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(result.rows_affected())
    }
}
