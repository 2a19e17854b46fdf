//! Command Handlers module
//!
//! Handlers validate commands, apply ownership and auth rules, and
//! coordinate the repositories.

mod blog_handler;
mod commands;
mod login_handler;
mod user_handler;


pub use blog_handler::BlogHandler;
pub use commands::*;
pub use login_handler::LoginHandler;
pub use user_handler::CreateUserHandler;
