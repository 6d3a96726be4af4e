//! # Stockroom Security
//!
//! JWT token issuance/validation and Argon2 password hashing.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
