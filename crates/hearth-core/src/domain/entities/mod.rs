//! Domain entities.

mod property;
mod recommendation;
mod user;

pub use property::{FurnishingStatus, ListedBy, ListingType, Property};
pub use recommendation::Recommendation;
pub use user::User;
