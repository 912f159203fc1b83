//! Role DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleCreateDto {
    #[validate(length(min = 4, max = 128, message = "Name length at least 4 characters"))]
    pub name: String,

    #[validate(length(max = 512, message = "Description too long"))]
    pub description: Option<String>,
}
