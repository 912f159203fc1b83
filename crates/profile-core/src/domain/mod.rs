//! Domain entities

pub mod group;
pub mod role;
pub mod user;

pub use group::Group;
pub use role::Role;
pub use user::User;
