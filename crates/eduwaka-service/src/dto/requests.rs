//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Account registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 150, message = "Username must be 2-150 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(max = 30, message = "First name must be at most 30 characters"))]
    #[serde(default)]
    pub first_name: Option<String>,

    #[validate(length(max = 30, message = "Last name must be at most 30 characters"))]
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Change password request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// Account Requests
// ============================================================================

/// Update current account request
///
/// Unknown fields are rejected so a `password` key cannot slip through
/// this route; password changes go through their own endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateAccountRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "First name must be at most 30 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 30, message = "Last name must be at most 30 characters"))]
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "a".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            first_name: None,
            last_name: None,
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            username: "adaeze".to_string(),
            email: "adaeze@example.com".to_string(),
            password: "SecurePass1".to_string(),
            first_name: Some("Adaeze".to_string()),
            last_name: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let request = LoginRequest {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
