//! User-related DTOs.

use chrono::{DateTime, Utc};
use roster_core::{User, UserChanges, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a new user. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "roster_core::rules::not_blank", message = "Name must not be blank")
    )]
    #[schema(example = "Ann")]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "ann@example.com")]
    pub email: String,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    #[schema(example = 30)]
    pub age: i32,
}

/// Request to update a user. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "roster_core::rules::not_blank", message = "Name must not be blank")
    )]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            age: request.age,
        }
    }
}

/// User response DTO, also the element type of the cached collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::ValidateExt;

    fn valid_create() -> CreateUserRequest {
        CreateUserRequest {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            age: 30,
        }
    }

    #[test]
    fn test_create_request_valid() {
        assert!(valid_create().validate_request().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_fields() {
        let mut request = valid_create();
        request.email = "not-an-email".to_string();
        assert!(request.validate_request().is_err());

        let mut request = valid_create();
        request.age = -1;
        assert!(request.validate_request().is_err());

        let mut request = valid_create();
        request.name = "   ".to_string();
        assert!(request.validate_request().is_err());

        let mut request = valid_create();
        request.name = "x".repeat(101);
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_create_request_requires_all_fields() {
        let result = serde_json::from_str::<CreateUserRequest>(r#"{"name":"Ann","age":30}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_validates_present_fields_only() {
        assert!(UpdateUserRequest::default().validate_request().is_ok());

        let request = UpdateUserRequest {
            age: Some(200),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_update_request_rejects_blank_name() {
        let request = UpdateUserRequest {
            name: Some("   ".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate_request().is_err());

        let request = UpdateUserRequest {
            name: Some("Ann".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(request.validate_request().is_ok());
    }

    #[test]
    fn test_update_request_into_changes() {
        let request: UpdateUserRequest = serde_json::from_str(r#"{"age":31}"#).unwrap();
        let changes = UserChanges::from(request);
        assert_eq!(changes.age, Some(31));
        assert!(changes.name.is_none());
        assert!(changes.email.is_none());
    }

    #[test]
    fn test_response_from_user() {
        let user = User::new("Ann", "ann@example.com", 30);
        let id = user.id;
        let response = UserResponse::from(user);
        assert_eq!(response.id, id);
        assert_eq!(response.age, 30);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["id"], id.to_string());
    }
}
