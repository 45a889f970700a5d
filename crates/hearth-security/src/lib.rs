//! # Hearth Security
//!
//! Security module for the Hearth property service providing JWT
//! authentication and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
