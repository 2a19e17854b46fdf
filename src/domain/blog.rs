//! Blog records
//!
//! Input is validated once, when a `NewBlog` is built from untrusted data.
//! A `BlogRecord` is what storage hands back and is trusted from then on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DomainError;

/// A stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub url: String,
    #[serde(default)]
    pub likes: u64,
    /// User who created the post, if it was created with a token
    #[serde(rename = "user", default)]
    pub owner: Option<Uuid>,
}

/// A validated blog ready to be stored.
///
/// # Invariants
/// - `title` and `url` are non-blank
/// - `likes` is non-negative by construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    title: String,
    author: Option<String>,
    url: String,
    likes: u64,
}

impl NewBlog {
    /// Validate raw input fields.
    ///
    /// `likes` arrives signed because clients may send any JSON number;
    /// a missing value defaults to zero.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> Result<Self, DomainError> {
        let title = required_field("Blog", "title", title)?;
        let url = required_field("Blog", "url", url)?;
        let likes = validate_likes(likes.unwrap_or(0))?;

        Ok(Self {
            title,
            author,
            url,
            likes,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn likes(&self) -> u64 {
        self.likes
    }

    /// Attach storage identity to produce a record.
    pub fn into_record(self, id: Uuid, owner: Option<Uuid>) -> BlogRecord {
        BlogRecord {
            id,
            title: self.title,
            author: self.author,
            url: self.url,
            likes: self.likes,
            owner,
        }
    }
}

/// Check a client-supplied like count.
pub fn validate_likes(likes: i64) -> Result<u64, DomainError> {
    u64::try_from(likes).map_err(|_| {
        DomainError::Validation(format!(
            "Blog validation failed: likes: `likes` ({}) must not be negative",
            likes
        ))
    })
}

pub(super) fn required_field(
    entity: &str,
    field: &str,
    value: Option<String>,
) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::Validation(format!(
            "{} validation failed: {}: `{}` is required",
            entity, field, field
        ))),
    }
}
