//! Domain module
//!
//! Core domain types and validation rules.

pub mod blog;
pub mod context;
pub mod error;
pub mod user;

pub use blog::{validate_likes, BlogRecord, NewBlog};
pub use context::OperationContext;
pub use error::DomainError;
pub use user::{NewUser, NewUserRecord, User};
