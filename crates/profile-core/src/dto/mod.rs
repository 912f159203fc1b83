//! Data-transfer objects with declarative validation rules

pub mod group;
pub mod role;
pub mod user;

pub use group::{GroupCreateDto, GroupUpdateDto};
pub use role::RoleCreateDto;
pub use user::RegisterDto;
