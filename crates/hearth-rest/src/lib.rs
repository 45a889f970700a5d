//! # Hearth REST
//!
//! REST API layer for the Hearth property service, built on Axum.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
