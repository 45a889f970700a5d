//! HTTP request handlers grouped by resource.

pub mod auth_controller;
pub mod health_controller;
pub mod property_controller;
pub mod user_controller;
