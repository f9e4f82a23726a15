//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{NewUser, UpdateUser, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a user.
///
/// Missing or `null` fields decode as empty and are reported by
/// [`CreateUserRequest::into_new_user`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Alice", "email": "alice@example.com"}))]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Trims both fields and checks name, then email.
    pub fn into_new_user(self) -> AppResult<NewUser> {
        let name = self.name.unwrap_or_default().trim().to_string();
        let email = self.email.unwrap_or_default().trim().to_string();

        if name.is_empty() {
            return Err(AppError::MissingName);
        }
        if email.is_empty() {
            return Err(AppError::MissingEmail);
        }

        Ok(NewUser { name, email })
    }
}

/// Request body for a partial update. Absent and `null` both leave a field unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[schema(example = json!({"email": "alice@example.org"}))]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Present values are forwarded untrimmed, empty strings included.
    pub fn into_update_user(self) -> AppResult<UpdateUser> {
        let update = UpdateUser {
            name: self.name,
            email: self.email,
        };

        if update.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }

        Ok(update)
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"id": 1, "name": "Alice", "email": "alice@example.com"}))]
pub struct UserResponse {
    pub id: i64,
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

    fn create(name: Option<&str>, email: Option<&str>) -> AppResult<NewUser> {
        CreateUserRequest {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
        .into_new_user()
    }

    #[test]
    fn test_create_trims_fields() {
        let user = create(Some(" Alice "), Some(" a@b.com ")).unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "a@b.com");
    }

    #[test]
    fn test_create_checks_name_before_email() {
        assert!(matches!(create(None, None), Err(AppError::MissingName)));
        assert!(matches!(create(Some("  "), Some("x@y")), Err(AppError::MissingName)));
        assert!(matches!(create(Some("Bob"), Some("\t")), Err(AppError::MissingEmail)));
        assert!(matches!(create(Some("Bob"), None), Err(AppError::MissingEmail)));
    }

    #[test]
    fn test_update_requires_a_field() {
        assert!(matches!(
            UpdateUserRequest::default().into_update_user(),
            Err(AppError::NoFieldsToUpdate)
        ));
    }

    #[test]
    fn test_update_forwards_values_untouched() {
        let update = UpdateUserRequest {
            name: Some(String::new()),
            email: Some(" spaced@example.com ".to_string()),
        }
        .into_update_user()
        .unwrap();

        assert_eq!(update.name.as_deref(), Some(""));
        assert_eq!(update.email.as_deref(), Some(" spaced@example.com "));
    }

    #[test]
    fn test_update_null_fields_are_absent() {
        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"name": null, "email": null, "extra": 1}"#).unwrap();
        assert!(request.name.is_none());
        assert!(request.email.is_none());
    }

    #[test]
    fn test_user_response_shape() {
        let response = UserResponse::from(User {
            id: 7,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        });
        assert_eq!(
            serde_json::to_value(response).unwrap(),
            serde_json::json!({"id": 7, "name": "Alice", "email": "alice@example.com"})
        );
    }
}
