//! In-memory user repository.
//!
//! Backs the test suites and `serve --in-memory`. State lives for the
//! lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::UserRepository;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

/// UserRepository over a `HashMap` keyed by id.
///
/// Email uniqueness is checked and the record inserted under a single write
/// lock, so concurrent registrations of one email cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::EmailAlreadyUsed);
        }

        let user = User::new(new_user.name, new_user.email, new_user.password_hash);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(&self, email: &str, password_hash: String) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.email == email)
            .ok_or(AppError::UserNotFound)?;
        user.password_hash = password_hash;
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::UserNotFound)
    }
}
