//! Repository traits (ports)

pub mod group_repository;
pub mod role_repository;
pub mod user_repository;

pub use group_repository::{GroupFilter, GroupRepository, GroupSortField};
pub use role_repository::RoleRepository;
pub use user_repository::UserRepository;
