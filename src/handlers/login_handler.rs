//! Login Handler
//!
//! Exchanges a username and password for a signed token.

use std::sync::Arc;

use crate::auth::{verify_password, TokenService};
use crate::domain::OperationContext;
use crate::error::AppError;
use crate::repository::UserRepository;

use super::{LoginCommand, LoginResult};

/// Handler for login
#[derive(Clone)]
pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Unknown username and wrong password produce the same error.
    pub async fn execute(
        &self,
        command: LoginCommand,
        context: &OperationContext,
    ) -> Result<LoginResult, AppError> {
        let Some(user) = self.users.find_by_username(&command.username).await? else {
            tracing::info!(
                username = %command.username,
                correlation_id = ?context.correlation_id,
                "Login rejected: unknown user"
            );
            return Err(AppError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        let password = command.password;
        let valid = tokio::task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| AppError::Internal(format!("password check task failed: {}", e)))??;

        if !valid {
            tracing::info!(
                username = %user.username,
                correlation_id = ?context.correlation_id,
                "Login rejected: wrong password"
            );
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.username)?;

        tracing::info!(
            user_id = %user.id,
            correlation_id = ?context.correlation_id,
            "User logged in"
        );

        Ok(LoginResult {
            token,
            username: user.username,
            name: user.name,
        })
    }
}
