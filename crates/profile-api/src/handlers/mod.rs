//! HTTP handlers

pub mod auth;
pub mod contact;
pub mod groups;
pub mod health;
pub mod roles;
