//! Group entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// A named group referencing exactly one role. Names are stored
/// upper-cased; every name-keyed lookup must upper-case its argument
/// the same way or reads silently diverge from writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Non-owning reference, persisted as `role_id`.
    pub role: Role,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    /// Soft-deletion marker; rows are never hard-deleted.
    pub removed_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn new(name: String, description: Option<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_uppercase(),
            description,
            role,
            created_at: Utc::now(),
            modified_at: None,
            removed_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_group_uppercases_name() {
        let role = Role::new("EDITOR".to_string(), None);
        let group = Group::new("editors".to_string(), None, role);
        assert_eq!(group.name, "EDITORS");
        assert_eq!(group.role.name, "EDITOR");
        assert!(!group.is_deleted());
    }
}
