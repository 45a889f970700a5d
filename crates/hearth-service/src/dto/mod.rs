//! Request and response DTOs.

mod auth_dto;
mod property_dto;
mod user_dto;

pub use auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
pub use property_dto::{
    CreatePropertyRequest, DataSource, PropertyListResponse, PropertyQuery, PropertyResponse,
    UpdatePropertyRequest,
};
pub use user_dto::{RecommendRequest, RecommendationDto};
