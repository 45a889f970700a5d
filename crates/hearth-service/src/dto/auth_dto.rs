//! Authentication DTOs.

use chrono::{DateTime, Utc};
use hearth_core::{User, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = hearth_core::rules::not_blank)
    )]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[schema(value_type = String)]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_at: i64,
    pub user: UserDto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::Email;

    #[test]
    fn test_register_request_valid() {
        let request = RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_register_request_blank_name() {
        let request = RegisterRequest {
            name: "   ".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_invalid_email() {
        let request = RegisterRequest {
            name: "Jane".to_string(),
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let request = RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_user_dto_from_user() {
        let user = User::new(
            "Jane".to_string(),
            Email::new("jane@example.com").unwrap(),
            "hash".to_string(),
        );
        let dto = UserDto::from(&user);
        assert_eq!(dto.id, user.id);
        assert_eq!(dto.email, "jane@example.com");

        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("createdAt"));
        assert!(!json.contains("hash"));
    }
}
