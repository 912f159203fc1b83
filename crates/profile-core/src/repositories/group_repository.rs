//! Group repository trait (port)

use async_trait::async_trait;
use profile_shared::SortDirection;
use uuid::Uuid;

use crate::domain::Group;
use crate::error::DomainError;

/// Lookup key for single-group operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupFilter {
    Id(Uuid),
    /// Must already be upper-cased by the caller.
    Name(String),
}

impl std::fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupFilter::Id(id) => write!(f, "{}", id),
            GroupFilter::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Allow-listed sort keys for paginated listings. Caller-supplied field
/// names never reach an order-by clause as raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSortField {
    Name,
    CreatedAt,
    ModifiedAt,
}

impl GroupSortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            "modified_at" => Some(Self::ModifiedAt),
            _ => None,
        }
    }

    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::ModifiedAt => "modified_at",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    async fn save(&self, group: &Group) -> Result<Group, DomainError>;
    async fn update(&self, group: &Group) -> Result<Group, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError>;
    async fn find_one(&self, filter: &GroupFilter) -> Result<Option<Group>, DomainError>;
    /// Returns one page plus the total count of the unfiltered
    /// (active) collection, not just the page.
    async fn find_and_count(
        &self,
        offset: i64,
        limit: i64,
        sort_field: GroupSortField,
        sort_direction: SortDirection,
    ) -> Result<(Vec<Group>, i64), DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
    /// Count of active users joined to the matching group.
    async fn count_joined_users(&self, filter: &GroupFilter) -> Result<i64, DomainError>;
    /// Sets the soft-deletion marker; returns affected rows.
    async fn soft_delete(&self, filter: &GroupFilter) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_allow_list() {
        assert_eq!(GroupSortField::parse("name"), Some(GroupSortField::Name));
        assert_eq!(
            GroupSortField::parse("created_at"),
            Some(GroupSortField::CreatedAt)
        );
        assert_eq!(GroupSortField::parse("id; DROP TABLE groups"), None);
        assert_eq!(GroupSortField::parse("role"), None);
    }
}
