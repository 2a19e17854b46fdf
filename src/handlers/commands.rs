//! Command definitions
//!
//! Commands carry raw client input into the handlers, which validate it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// Blogs
// =========================================================================

/// Command to create a blog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBlogCommand {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl CreateBlogCommand {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = Some(likes);
        self
    }
}

/// Command to overwrite a blog's like count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLikesCommand {
    pub blog_id: Uuid,
    pub likes: Option<i64>,
}

impl UpdateLikesCommand {
    pub fn new(blog_id: Uuid, likes: Option<i64>) -> Self {
        Self { blog_id, likes }
    }
}

/// Command to delete a blog
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteBlogCommand {
    pub blog_id: Uuid,
}

impl DeleteBlogCommand {
    pub fn new(blog_id: Uuid) -> Self {
        Self { blog_id }
    }
}

// =========================================================================
// Users
// =========================================================================

/// Command to register a user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl CreateUserCommand {
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            name: Some(name.into()),
            password: Some(password.into()),
        }
    }
}

/// Command to exchange credentials for a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub username: String,
    pub name: String,
}
