//! PostgreSQL repository implementations

pub mod group_repo_impl;
pub mod role_repo_impl;
pub mod user_repo_impl;

pub use group_repo_impl::PgGroupRepository;
pub use role_repo_impl::PgRoleRepository;
pub use user_repo_impl::PgUserRepository;

/// Postgres unique-constraint violations surface as SQLSTATE 23505.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
