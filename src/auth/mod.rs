//! Authentication
//!
//! Password hashing and login tokens.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{bearer_token, Claims, TokenError, TokenService};
