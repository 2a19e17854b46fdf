//! In-memory store
//!
//! Keeps records in insertion-ordered vectors behind a single lock, so
//! listings come back in creation order like the Postgres store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BlogRepository, RepositoryError, UserRepository};
use crate::domain::{BlogRecord, NewBlog, NewUserRecord, User};

#[derive(Debug, Default)]
struct State {
    blogs: Vec<BlogRecord>,
    users: Vec<User>,
}

/// Process-local implementation of both repositories.
///
/// Cloning shares the underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every blog and user.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.blogs.clear();
        state.users.clear();
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<BlogRecord>, RepositoryError> {
        Ok(self.state.read().await.blogs.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<BlogRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<BlogRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .blogs
            .iter()
            .filter(|b| b.owner == Some(owner))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        blog: NewBlog,
        owner: Option<Uuid>,
    ) -> Result<BlogRecord, RepositoryError> {
        let record = blog.into_record(Uuid::new_v4(), owner);
        self.state.write().await.blogs.push(record.clone());
        Ok(record)
    }

    async fn update_likes(
        &self,
        id: Uuid,
        likes: u64,
    ) -> Result<Option<BlogRecord>, RepositoryError> {
        let mut state = self.state.write().await;
        Ok(state.blogs.iter_mut().find(|b| b.id == id).map(|blog| {
            blog.likes = likes;
            blog.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut state = self.state.write().await;
        let before = state.blogs.len();
        state.blogs.retain(|b| b.id != id);
        Ok(state.blogs.len() != before)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.state.read().await.users.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: NewUserRecord) -> Result<User, RepositoryError> {
        // Check and insert under one write lock
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::DuplicateUsername(user.username));
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.push(created.clone());
        Ok(created)
    }
}
