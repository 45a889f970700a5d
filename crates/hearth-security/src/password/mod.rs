//! Password hashing.

mod hasher;

pub use hasher::{validate_password_strength, PasswordHasher};
