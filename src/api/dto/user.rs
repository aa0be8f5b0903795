//! User-related DTOs for API requests and responses.

use crate::models::{NewUser, UpdateUser, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
///
/// Unknown fields, including a client-supplied `_id`, are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
}

impl CreateUserRequest {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
        }
    }
}

/// Request body for a partial update; absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "email must not be empty"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            email: self.email,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data, keyed the way document-store clients expect.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_response_uses_document_id_key() {
        let id = Uuid::new_v4();
        let response = UserResponse::from(User {
            id,
            name: "John".to_string(),
            email: "john@doe.com".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"_id": id.to_string(), "name": "John", "email": "john@doe.com"})
        );
    }

    #[test]
    fn test_create_request_ignores_client_id() {
        let request: CreateUserRequest =
            serde_json::from_value(json!({"_id": "abc", "name": "John", "email": "john@doe.com"}))
                .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.into_new_user().name, "John");
    }

    #[test]
    fn test_update_request_present_fields_must_be_non_empty() {
        let request: UpdateUserRequest = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(request.validate().is_err());

        let request: UpdateUserRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.into_update_user().is_empty());
    }
}
