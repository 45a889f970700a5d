//! # Hearth Repository
//!
//! Data access layer for the Hearth property service. Provides the
//! MySQL connection pool, repository traits, and their implementations.

mod filter;
pub mod mysql;
mod pool;
mod traits;

pub use filter::{PropertyFilter, PropertySort, SortDirection, SortField};
pub use pool::{create_pool, DatabasePool};
pub use traits::{PropertyRepository, UserRepository};
