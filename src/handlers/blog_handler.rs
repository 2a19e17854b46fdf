//! Blog Handler
//!
//! Create, like-update and delete for blogs.

use std::sync::Arc;

use crate::domain::{validate_likes, BlogRecord, DomainError, NewBlog, OperationContext};
use crate::error::AppError;
use crate::repository::BlogRepository;

use super::{CreateBlogCommand, DeleteBlogCommand, UpdateLikesCommand};

/// Handler for blog writes
#[derive(Clone)]
pub struct BlogHandler {
    blogs: Arc<dyn BlogRepository>,
    require_auth_for_writes: bool,
}

impl BlogHandler {
    pub fn new(blogs: Arc<dyn BlogRepository>, require_auth_for_writes: bool) -> Self {
        Self {
            blogs,
            require_auth_for_writes,
        }
    }

    fn ensure_authenticated(&self, context: &OperationContext) -> Result<(), AppError> {
        if self.require_auth_for_writes && !context.is_authenticated() {
            return Err(AppError::TokenMissing);
        }
        Ok(())
    }

    /// Validate and store a new blog.
    ///
    /// The requesting user, if any, becomes the owner.
    pub async fn create(
        &self,
        command: CreateBlogCommand,
        context: &OperationContext,
    ) -> Result<BlogRecord, AppError> {
        self.ensure_authenticated(context)?;

        let blog = NewBlog::new(command.title, command.author, command.url, command.likes)?;
        let created = self.blogs.create(blog, context.request_user_id).await?;

        tracing::info!(
            blog_id = %created.id,
            owner = ?created.owner,
            username = ?context.request_username,
            correlation_id = ?context.correlation_id,
            "Blog created"
        );

        Ok(created)
    }

    /// Overwrite the like count of an existing blog.
    pub async fn update_likes(
        &self,
        command: UpdateLikesCommand,
        context: &OperationContext,
    ) -> Result<BlogRecord, AppError> {
        let likes = command.likes.ok_or_else(|| {
            DomainError::Validation("Blog validation failed: likes: `likes` is required".into())
        })?;
        let likes = validate_likes(likes)?;

        let updated = self
            .blogs
            .update_likes(command.blog_id, likes)
            .await?
            .ok_or_else(|| AppError::BlogNotFound(command.blog_id.to_string()))?;

        tracing::info!(
            blog_id = %updated.id,
            likes = updated.likes,
            correlation_id = ?context.correlation_id,
            "Blog likes updated"
        );

        Ok(updated)
    }

    /// Delete a blog. Deleting a missing blog succeeds.
    ///
    /// When writes require auth, an owned blog may only be deleted by its
    /// owner.
    pub async fn delete(
        &self,
        command: DeleteBlogCommand,
        context: &OperationContext,
    ) -> Result<(), AppError> {
        self.ensure_authenticated(context)?;

        let Some(blog) = self.blogs.find(command.blog_id).await? else {
            tracing::debug!(blog_id = %command.blog_id, "Delete of missing blog ignored");
            return Ok(());
        };

        if self.require_auth_for_writes {
            if let Some(owner) = blog.owner {
                if context.request_user_id != Some(owner) {
                    return Err(DomainError::forbidden("only the creator can delete a blog").into());
                }
            }
        }

        self.blogs.delete(command.blog_id).await?;

        tracing::info!(
            blog_id = %command.blog_id,
            username = ?context.request_username,
            correlation_id = ?context.correlation_id,
            "Blog deleted"
        );

        Ok(())
    }
}
