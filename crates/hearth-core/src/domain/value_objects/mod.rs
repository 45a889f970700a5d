//! Value objects.

mod email;

pub use email::{Email, EmailError};
