use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_ROLE: &str = "user";

/// Stored account. The password hash never leaves this crate in a response.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str, password_hash: String, full_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(email),
            password_hash,
            full_name,
            is_active: true,
            roles: vec![DEFAULT_ROLE.to_string()],
            created_at: now,
            updated_at: now,
        }
    }
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "jane@shop.dev")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            roles: user.roles,
        }
    }
}

/// User fields plus a freshly signed token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}

/// Upper and lower case letters plus a digit or symbol.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_digit_or_symbol = password.chars().any(|c| !c.is_alphabetic());

    if has_upper && has_lower && has_digit_or_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("weak_password").with_message(
            "The password must have a Uppercase, lowercase letter and a number".into(),
        ))
    }
}

/// Signup payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "jane@shop.dev")]
    pub email: String,
    #[validate(
        length(min = 6, max = 50),
        custom(function = "validate_password_strength")
    )]
    #[schema(example = "Abc123")]
    pub password: String,
    #[validate(length(min = 1))]
    #[schema(example = "Jane Doe")]
    pub full_name: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, max = 50))]
    pub password: String,
}
