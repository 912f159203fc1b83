//! Group DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupCreateDto {
    #[validate(length(min = 4, max = 128, message = "Name length at least 4 characters"))]
    pub name: String,

    #[validate(length(min = 4, max = 128, message = "Role length at least 4 characters"))]
    pub role: String,

    #[validate(length(max = 512, message = "Description too long"))]
    pub description: Option<String>,
}

/// Update payload; `name` is the lookup key and is never changed here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupUpdateDto {
    #[validate(length(min = 4, max = 128, message = "Name length at least 4 characters"))]
    pub name: String,

    #[validate(length(min = 4, max = 128, message = "Role length at least 4 characters"))]
    pub role: String,

    #[validate(length(max = 512, message = "Description too long"))]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_is_rejected() {
        let dto = GroupCreateDto {
            name: "ed".to_string(),
            role: "EDITOR".to_string(),
            description: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn valid_dto_passes() {
        let dto = GroupCreateDto {
            name: "editors".to_string(),
            role: "EDITOR".to_string(),
            description: Some("Editorial staff".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn oversized_description_is_rejected() {
        let dto = GroupUpdateDto {
            name: "editors".to_string(),
            role: "EDITOR".to_string(),
            description: Some("x".repeat(513)),
        };
        assert!(dto.validate().is_err());
    }
}
