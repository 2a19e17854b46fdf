//! Repositories
//!
//! Storage ports for blogs and users, with a Postgres implementation for
//! deployments and an in-memory one for tests and local runs.

mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogRecord, NewBlog, NewUserRecord, User};

pub use memory::InMemoryStore;
pub use postgres::PgStore;

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// A stored row violates a domain invariant
    #[error("corrupt record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// All blogs, oldest first
    async fn list(&self) -> Result<Vec<BlogRecord>, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<BlogRecord>, RepositoryError>;

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<BlogRecord>, RepositoryError>;

    async fn create(
        &self,
        blog: NewBlog,
        owner: Option<Uuid>,
    ) -> Result<BlogRecord, RepositoryError>;

    /// Returns `None` when no blog has this id
    async fn update_likes(
        &self,
        id: Uuid,
        likes: u64,
    ) -> Result<Option<BlogRecord>, RepositoryError>;

    /// Returns whether a blog was removed
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, oldest first
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Fails with `DuplicateUsername` if the username is taken
    async fn create(&self, user: NewUserRecord) -> Result<User, RepositoryError>;
}
