//! # Hearth Server Library
//!
//! Startup wiring for the Hearth property service: configuration,
//! database and Redis pools, service construction, and the HTTP server.

pub mod startup;
