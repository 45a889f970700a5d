//! Domain entities and value objects for the Hearth property-listing
//! service. This module contains the core business concepts of the
//! application.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
