//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::AuthResult;
use crate::domain::User;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: String,
    /// `user` (default), `admin` or `moderator`
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Returned by register and login; the token is also set as the `jwt` cookie
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            id: result.user.id,
            name: result.user.name,
            email: result.user.email,
            role: result.user.role.to_string(),
            token: result.token,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

/// Blank or missing fields keep their current values
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
    pub email: Option<String>,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: Option<String>,
    /// Ignored unless the caller is an admin
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
}
