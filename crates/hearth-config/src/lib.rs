//! Configuration management for the Hearth property service.
//!
//! Layered configuration loading with TOML files and environment
//! variable overrides.

mod app_config;
mod loader;

pub use app_config::{
    AppConfig, AppMetadata, DatabaseConfig, RedisConfig, SecurityConfig, ServerConfig,
};
pub use loader::ConfigLoader;
