//! # Hearth Service
//!
//! Business logic layer for the Hearth property service. Contains the
//! cache service, request/response DTOs, and the application services
//! for authentication, properties, favorites, and recommendations.

mod auth_service;
pub mod cache;
pub mod dto;
mod property_service;
mod user_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::{AuthService, AuthServiceImpl};
pub use property_service::{PropertyService, PropertyServiceImpl};
pub use user_service::{UserService, UserServiceImpl};
