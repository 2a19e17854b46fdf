//! bloglist Library
//!
//! Blog listing backend: blog CRUD, user registration, token login and
//! like statistics. Re-exports modules for integration testing.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
mod error;
pub mod handlers;
pub mod repository;
pub mod stats;

pub use config::Config;
pub use domain::{BlogRecord, DomainError, NewBlog, OperationContext, User};
pub use error::{AppError, AppResult, ErrorResponse};
pub use stats::{AuthorLikeTotal, AuthorPostCount, BlogStats, FavoritePost};
