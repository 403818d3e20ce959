use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AuthError, AuthResult};
use crate::models::User;

/// Credential store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AuthResult<User>;

    /// Lookup by normalized email, including the password hash
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the active flag of a stored user, returning whether it existed.
    pub async fn set_active(&self, email: &str, is_active: bool) -> bool {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.is_active = is_active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(AuthError::Conflict(format!(
                "Key (email)=({}) already exists.",
                user.email
            )));
        }

        users.insert(user.email.clone(), user.clone());
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }
}
