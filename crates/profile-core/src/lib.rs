//! # Profile Core
//!
//! Domain entities, DTO validation, repository traits (ports), and the
//! administrative services for groups, roles, and users.

pub mod domain;
pub mod dto;
pub mod error;
pub mod repositories;
pub mod services;

pub use domain::*;
pub use error::DomainError;
