//! # Profile Infrastructure
//!
//! PostgreSQL repository implementations and the SMTP mailer (adapters).

pub mod database;
pub mod mail;

pub use database::{create_pool, PgGroupRepository, PgRoleRepository, PgUserRepository};
pub use mail::Mailer;
