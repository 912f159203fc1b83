//! # Profile Security
//!
//! JWT issue/validation and Argon2 password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService};
pub use password::PasswordService;
