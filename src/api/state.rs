//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, InMemoryUserStore, UserRepository, UserStore};
use crate::services::{TokenIssuer, UserManager, UserService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account usecases
    pub user_service: Arc<dyn UserService>,
    /// Database connection, absent when running on the in-memory store
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create state backed by the relational store.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let repo = Arc::new(UserStore::new(database.get_connection()));
        Self::with_repository(repo, config, Some(database))
    }

    /// Create state backed by a fresh in-memory store.
    pub fn in_memory(config: &Config) -> Self {
        Self::with_repository(Arc::new(InMemoryUserStore::new()), config, None)
    }

    /// Wire the usecases over any repository implementation.
    pub fn with_repository(
        repo: Arc<dyn UserRepository>,
        config: &Config,
        database: Option<Arc<Database>>,
    ) -> Self {
        let tokens = TokenIssuer::from_config(config);
        Self::new(Arc::new(UserManager::new(repo, tokens)), database)
    }

    /// Create application state with a manually injected service.
    pub fn new(user_service: Arc<dyn UserService>, database: Option<Arc<Database>>) -> Self {
        Self {
            user_service,
            database,
        }
    }
}
