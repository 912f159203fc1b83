//! Group administration service
//!
//! Enforces the group domain invariants around the persistence port:
//! upper-cased name canonicalization on every name-keyed path, role
//! resolution before any write, a dependents check before soft
//! deletion, and re-classification of every collaborator error.

use chrono::Utc;
use profile_shared::{Page, SortDirection};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::Group;
use crate::dto::{GroupCreateDto, GroupUpdateDto};
use crate::error::DomainError;
use crate::repositories::{GroupFilter, GroupRepository, GroupSortField};
use crate::services::RoleService;

pub struct GroupService {
    group_repo: Arc<dyn GroupRepository>,
    role_service: Arc<RoleService>,
}

impl GroupService {
    pub fn new(group_repo: Arc<dyn GroupRepository>, role_service: Arc<RoleService>) -> Self {
        Self {
            group_repo,
            role_service,
        }
    }

    pub async fn create(&self, group_dto: GroupCreateDto) -> Result<Group, DomainError> {
        if let Err(errors) = group_dto.validate() {
            info!(name = %group_dto.name, "create group validation failed: {}", errors);
            return Err(DomainError::Validation(errors));
        }

        let role = self.role_service.resolve(&group_dto.role).await.map_err(|e| {
            if matches!(e, DomainError::RoleNotFound(_)) {
                info!(
                    group = %group_dto.name,
                    role = %group_dto.role,
                    "create group failed, role not found"
                );
            }
            e
        })?;

        let group = Group::new(group_dto.name, group_dto.description, role);
        let created = self.group_repo.save(&group).await?;
        info!(id = %created.id, name = %created.name, "group created");
        Ok(created)
    }

    /// Mutates description and role only; `name` is the lookup key.
    pub async fn update(&self, group_dto: GroupUpdateDto) -> Result<Group, DomainError> {
        if let Err(errors) = group_dto.validate() {
            info!(name = %group_dto.name, "update group validation failed: {}", errors);
            return Err(DomainError::Validation(errors));
        }

        let name = group_dto.name.to_uppercase();
        let mut group = self
            .group_repo
            .find_by_name(&name)
            .await?
            .ok_or_else(|| {
                info!(name = %name, "update group failed, group not found");
                DomainError::GroupNotFound(name.clone())
            })?;

        let role = self.role_service.resolve(&group_dto.role).await?;

        group.description = group_dto.description;
        group.role = role;
        group.modified_at = Some(Utc::now());
        self.group_repo.update(&group).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.delete_with_filter(GroupFilter::Id(*id)).await
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), DomainError> {
        self.delete_with_filter(GroupFilter::Name(name.to_uppercase()))
            .await
    }

    /// Dependents check then soft delete. The repository re-checks
    /// dependents inside one transaction, so the gap between these two
    /// calls cannot admit a concurrent member.
    async fn delete_with_filter(&self, filter: GroupFilter) -> Result<(), DomainError> {
        let user_count = self.group_repo.count_joined_users(&filter).await?;
        if user_count > 0 {
            warn!(group = %filter, user_count, "delete group failed, group has users");
            return Err(DomainError::GroupHasUsers(filter.to_string()));
        }

        let affected = self.group_repo.soft_delete(&filter).await?;
        if affected == 0 {
            return Err(DomainError::GroupNotFound(filter.to_string()));
        }
        info!(group = %filter, "group deleted");
        Ok(())
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError> {
        self.group_repo.find_by_id(id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError> {
        self.group_repo.find_by_name(&name.to_uppercase()).await
    }

    pub async fn find_one(&self, filter: &GroupFilter) -> Result<Option<Group>, DomainError> {
        self.group_repo.find_one(filter).await
    }

    pub async fn find_all(
        &self,
        offset: i64,
        limit: i64,
        sort_direction: &str,
        sort_field: &str,
    ) -> Result<Page<Group>, DomainError> {
        let direction = SortDirection::parse(sort_direction).ok_or_else(|| {
            DomainError::field_violation(
                "sort_direction",
                "sort_direction",
                &format!("Sort direction {} is not one of ASC, DESC", sort_direction),
            )
        })?;
        let field = GroupSortField::parse(sort_field).ok_or_else(|| {
            DomainError::field_violation(
                "sort_field",
                "sort_field",
                &format!("Sort field {} is not allowed", sort_field),
            )
        })?;

        let (data, total) = self
            .group_repo
            .find_and_count(offset, limit, field, direction)
            .await?;
        Ok(Page { data, total })
    }

    pub async fn find_total(&self) -> Result<i64, DomainError> {
        self.group_repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::group_repository::MockGroupRepository;
    use crate::repositories::role_repository::MockRoleRepository;
    use mockall::predicate::eq;

    fn editor_role() -> Role {
        Role::new("EDITOR".to_string(), None)
    }

    fn service(
        group_repo: MockGroupRepository,
        role_repo: MockRoleRepository,
    ) -> GroupService {
        GroupService::new(
            Arc::new(group_repo),
            Arc::new(RoleService::new(Arc::new(role_repo))),
        )
    }

    fn create_dto(name: &str, role: &str) -> GroupCreateDto {
        GroupCreateDto {
            name: name.to_string(),
            role: role.to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_uppercases_name_before_save() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_name()
            .with(eq("EDITOR"))
            .returning(|_| Ok(Some(editor_role())));
        let mut groups = MockGroupRepository::new();
        groups
            .expect_save()
            .withf(|group: &Group| group.name == "EDITORS" && group.role.name == "EDITOR")
            .returning(|group| Ok(group.clone()));

        let created = service(groups, roles)
            .create(create_dto("editors", "EDITOR"))
            .await
            .unwrap();
        assert_eq!(created.name, "EDITORS");
    }

    #[tokio::test]
    async fn create_with_short_name_fails_validation() {
        let groups = MockGroupRepository::new();
        let roles = MockRoleRepository::new();

        let err = service(groups, roles)
            .create(create_dto("ed", "EDITOR"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_with_missing_role_performs_no_write() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().returning(|_| Ok(None));
        let mut groups = MockGroupRepository::new();
        groups.expect_save().times(0);

        let err = service(groups, roles)
            .create(create_dto("editors", "GHOST"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoleNotFound(_)));
    }

    #[tokio::test]
    async fn create_duplicate_name_is_reported() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_name()
            .returning(|_| Ok(Some(editor_role())));
        let mut groups = MockGroupRepository::new();
        groups
            .expect_save()
            .returning(|_| Err(DomainError::GroupNameAlreadyExists("EDITORS".to_string())));

        let err = service(groups, roles)
            .create(create_dto("editors", "EDITOR"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GroupNameAlreadyExists(_)));
    }

    #[tokio::test]
    async fn find_by_name_is_case_insensitive() {
        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_by_name()
            .with(eq("ABC"))
            .times(2)
            .returning(|_| {
                Ok(Some(Group::new("ABC".to_string(), None, editor_role())))
            });
        let service = service(groups, MockRoleRepository::new());

        let lower = service.find_by_name("abc").await.unwrap().unwrap();
        let upper = service.find_by_name("ABC").await.unwrap().unwrap();
        assert_eq!(lower.name, upper.name);
    }

    #[tokio::test]
    async fn delete_with_dependents_is_blocked() {
        let mut groups = MockGroupRepository::new();
        groups
            .expect_count_joined_users()
            .with(eq(GroupFilter::Name("EDITORS".to_string())))
            .returning(|_| Ok(1));
        groups.expect_soft_delete().times(0);

        let err = service(groups, MockRoleRepository::new())
            .delete_by_name("editors")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GroupHasUsers(_)));
    }

    #[tokio::test]
    async fn delete_without_dependents_soft_deletes() {
        let id = Uuid::new_v4();
        let mut groups = MockGroupRepository::new();
        groups
            .expect_count_joined_users()
            .with(eq(GroupFilter::Id(id)))
            .returning(|_| Ok(0));
        groups
            .expect_soft_delete()
            .with(eq(GroupFilter::Id(id)))
            .returning(|_| Ok(1));

        service(groups, MockRoleRepository::new())
            .delete(&id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_affecting_zero_rows_is_not_found() {
        let mut groups = MockGroupRepository::new();
        groups.expect_count_joined_users().returning(|_| Ok(0));
        groups.expect_soft_delete().returning(|_| Ok(0));

        let err = service(groups, MockRoleRepository::new())
            .delete_by_name("ghosts")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GroupNotFound(_)));
    }

    #[tokio::test]
    async fn update_missing_group_is_not_found() {
        let mut groups = MockGroupRepository::new();
        groups.expect_find_by_name().returning(|_| Ok(None));

        let err = service(groups, MockRoleRepository::new())
            .update(GroupUpdateDto {
                name: "editors".to_string(),
                role: "EDITOR".to_string(),
                description: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::GroupNotFound(name) if name == "EDITORS"));
    }

    #[tokio::test]
    async fn update_changes_description_and_role_only() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_name()
            .with(eq("VIEWER"))
            .returning(|_| Ok(Some(Role::new("VIEWER".to_string(), None))));
        let mut groups = MockGroupRepository::new();
        groups.expect_find_by_name().with(eq("EDITORS")).returning(|_| {
            Ok(Some(Group::new("EDITORS".to_string(), None, editor_role())))
        });
        groups
            .expect_update()
            .withf(|group: &Group| {
                group.name == "EDITORS"
                    && group.role.name == "VIEWER"
                    && group.description.as_deref() == Some("read only")
            })
            .returning(|group| Ok(group.clone()));

        let updated = service(groups, roles)
            .update(GroupUpdateDto {
                name: "editors".to_string(),
                role: "viewer".to_string(),
                description: Some("read only".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(updated.role.name, "VIEWER");
    }

    #[tokio::test]
    async fn find_all_normalizes_sort_direction() {
        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_and_count()
            .with(
                eq(0),
                eq(20),
                eq(GroupSortField::Name),
                eq(SortDirection::Desc),
            )
            .returning(|_, _, _, _| Ok((vec![], 0)));

        let page = service(groups, MockRoleRepository::new())
            .find_all(0, 20, "desc", "name")
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn find_all_rejects_unknown_sort_field() {
        let groups = MockGroupRepository::new();

        let err = service(groups, MockRoleRepository::new())
            .find_all(0, 20, "asc", "role; DROP TABLE groups")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
