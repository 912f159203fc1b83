//! Role entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A role many groups may reference. Roles do not own their groups;
/// deleting a role is outside this service's scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_uppercase(),
            description,
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
    fn new_role_uppercases_name() {
        let role = Role::new("editor".to_string(), None);
        assert_eq!(role.name, "EDITOR");
        assert!(!role.is_deleted());
    }
}
