//! MySQL repository implementations.

mod property_repository;
mod user_repository;

pub use property_repository::MySqlPropertyRepository;
pub use user_repository::MySqlUserRepository;
