//! User Creation Handler
//!
//! Validates registration input, hashes the password and stores the user.

use std::sync::Arc;

use crate::auth::hash_password;
use crate::domain::{NewUser, OperationContext, User};
use crate::error::AppError;
use crate::repository::UserRepository;

use super::CreateUserCommand;

/// Handler for user creation
#[derive(Clone)]
pub struct CreateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl CreateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Execute the create user command
    pub async fn execute(
        &self,
        command: CreateUserCommand,
        context: &OperationContext,
    ) -> Result<User, AppError> {
        let new_user = NewUser::new(command.username, command.name, command.password)?;

        // Uniqueness is also enforced by the store
        if self.users.find_by_username(new_user.username()).await?.is_some() {
            return Err(AppError::DuplicateUsername(new_user.username().to_string()));
        }

        let password = new_user.password().to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))??;

        let user = self.users.create(new_user.into_record(password_hash)).await?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            correlation_id = ?context.correlation_id,
            "User created"
        );

        Ok(user)
    }
}
