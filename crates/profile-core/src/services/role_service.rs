//! Role administration service

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::Role;
use crate::dto::RoleCreateDto;
use crate::error::DomainError;
use crate::repositories::RoleRepository;

/// Role lookup and creation; the peer collaborator the group service
/// resolves role names through. Role names are upper-cased on every
/// read and write so lookups are case-insensitive.
pub struct RoleService {
    role_repo: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(role_repo: Arc<dyn RoleRepository>) -> Self {
        Self { role_repo }
    }

    pub async fn create(&self, role_dto: RoleCreateDto) -> Result<Role, DomainError> {
        if let Err(errors) = role_dto.validate() {
            info!(name = %role_dto.name, "create role validation failed: {}", errors);
            return Err(DomainError::Validation(errors));
        }

        let role = Role::new(role_dto.name, role_dto.description);
        let created = self.role_repo.save(&role).await?;
        info!(id = %created.id, name = %created.name, "role created");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        self.role_repo.find_by_id(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        self.role_repo.find_by_name(&name.to_uppercase()).await
    }

    pub async fn find_total(&self) -> Result<i64, DomainError> {
        self.role_repo.count().await
    }

    /// Resolve a role name or fail; used where a missing role is a hard
    /// error rather than an empty result.
    pub async fn resolve(&self, name: &str) -> Result<Role, DomainError> {
        self.find_by_name(name).await?.ok_or_else(|| {
            warn!(role = %name, "role not found");
            DomainError::RoleNotFound(name.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::role_repository::MockRoleRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn find_by_name_uppercases_argument() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_name()
            .with(eq("EDITOR"))
            .returning(|_| Ok(Some(Role::new("EDITOR".to_string(), None))));
        let service = RoleService::new(Arc::new(repo));

        let found = service.find_by_name("editor").await.unwrap();
        assert_eq!(found.unwrap().name, "EDITOR");
    }

    #[tokio::test]
    async fn create_uppercases_name() {
        let mut repo = MockRoleRepository::new();
        repo.expect_save()
            .withf(|role: &Role| role.name == "EDITOR")
            .returning(|role| Ok(role.clone()));
        let service = RoleService::new(Arc::new(repo));

        let created = service
            .create(RoleCreateDto {
                name: "editor".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(created.name, "EDITOR");
    }

    #[tokio::test]
    async fn resolve_missing_role_fails() {
        let mut repo = MockRoleRepository::new();
        repo.expect_find_by_name().returning(|_| Ok(None));
        let service = RoleService::new(Arc::new(repo));

        let err = service.resolve("GHOST").await.unwrap_err();
        assert!(matches!(err, DomainError::RoleNotFound(name) if name == "GHOST"));
    }
}
