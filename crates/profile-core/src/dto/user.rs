//! User DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterDto {
    #[validate(length(min = 4, max = 128, message = "Username length at least 4 characters"))]
    pub username: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password length at least 8 characters"))]
    pub password: String,
}
