//! # Profile Shared
//!
//! Shared configuration, telemetry, constants, and common types.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::AppError;
pub use types::*;
