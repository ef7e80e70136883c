//! User domain entity and the account request types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Always a hash, never plain text
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// Create a user record with a freshly generated id
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
        }
    }
}

/// Data handed to a repository to create a user.
///
/// The repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    #[schema(example = "kale")]
    pub name: String,
    /// Email address (unique)
    #[schema(example = "kale@gmail.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[schema(example = "password1", min_length = 8)]
    pub password: String,
    /// Must equal `password`
    #[schema(example = "password1")]
    pub password_confirm: String,
}

/// Login request.
///
/// `name` is accepted for compatibility but plays no part in authentication.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "kale")]
    pub name: String,
    #[schema(example = "kale@gmail.com")]
    pub email: String,
    #[schema(example = "password1")]
    pub password: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[schema(example = "kale@gmail.com")]
    pub email: String,
    /// New password (minimum 8 characters)
    #[schema(example = "newpass1", min_length = 8)]
    pub new_password: String,
    /// Must equal `newPassword`
    #[schema(example = "newpass1")]
    pub password_confirm: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Display name
    #[schema(example = "kale")]
    pub name: String,
    /// Email address
    #[schema(example = "kale@gmail.com")]
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
