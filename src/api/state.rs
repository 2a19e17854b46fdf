//! Shared application state
//!
//! Everything route handlers need, cheap to clone per request.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::handlers::{BlogHandler, CreateUserHandler, LoginHandler};
use crate::repository::{BlogRepository, InMemoryStore, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: TokenService,
    pub require_auth_for_writes: bool,
}

impl AppState {
    pub fn new(
        blogs: Arc<dyn BlogRepository>,
        users: Arc<dyn UserRepository>,
        config: &Config,
    ) -> Self {
        Self {
            blogs,
            users,
            tokens: TokenService::new(&config.jwt_secret, config.token_ttl_secs),
            require_auth_for_writes: config.require_auth_for_writes,
        }
    }

    /// State backed by one in-memory store for both repositories.
    pub fn in_memory(store: InMemoryStore, config: &Config) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, config)
    }

    pub fn blog_handler(&self) -> BlogHandler {
        BlogHandler::new(self.blogs.clone(), self.require_auth_for_writes)
    }

    pub fn create_user_handler(&self) -> CreateUserHandler {
        CreateUserHandler::new(self.users.clone())
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(self.users.clone(), self.tokens.clone())
    }
}
