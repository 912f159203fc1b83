//! Domain services

pub mod auth_service;
pub mod group_service;
pub mod role_service;

pub use auth_service::{AuthService, LoginResult, RegisterResult, UserInfo};
pub use group_service::GroupService;
pub use role_service::RoleService;
