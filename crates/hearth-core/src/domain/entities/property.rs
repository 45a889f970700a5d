//! Property entity and its enumerations.

use crate::{PropertyId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Furnishing status of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum FurnishingStatus {
    #[serde(rename = "Furnished")]
    Furnished,
    #[serde(rename = "Semi-Furnished")]
    SemiFurnished,
    #[serde(rename = "Unfurnished")]
    Unfurnished,
}

impl FurnishingStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Furnished => "Furnished",
            Self::SemiFurnished => "Semi-Furnished",
            Self::Unfurnished => "Unfurnished",
        }
    }

    /// Parses a furnishing status from its wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Furnished" => Some(Self::Furnished),
            "Semi-Furnished" => Some(Self::SemiFurnished),
            "Unfurnished" => Some(Self::Unfurnished),
            _ => None,
        }
    }
}

impl fmt::Display for FurnishingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who listed the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ListedBy {
    Builder,
    Owner,
    Agent,
}

impl ListedBy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Builder => "Builder",
            Self::Owner => "Owner",
            Self::Agent => "Agent",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Builder" => Some(Self::Builder),
            "Owner" => Some(Self::Owner),
            "Agent" => Some(Self::Agent),
            _ => None,
        }
    }
}

impl fmt::Display for ListedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the property is offered for rent or for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ListingType {
    Rent,
    Sale,
}

impl ListingType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Sale => "sale",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rent" => Some(Self::Rent),
            "sale" => Some(Self::Sale),
            _ => None,
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property listing entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Internal unique identifier.
    pub id: PropertyId,

    /// Human-facing external identifier, e.g. "PROP1000". Unique,
    /// immutable after creation.
    pub external_id: String,

    pub title: String,

    /// Free-form category such as "Apartment" or "Villa".
    pub property_type: String,

    pub price: f64,

    pub location_state: String,

    pub location_city: String,

    pub area_sq_ft: f64,

    pub bedrooms: i32,

    pub bathrooms: i32,

    pub amenities: Vec<String>,

    pub furnishing_status: FurnishingStatus,

    pub available_from: Option<NaiveDate>,

    pub listed_by: ListedBy,

    pub tags: Vec<String>,

    pub color_theme: Option<String>,

    /// Average rating from 0.0 to 5.0.
    pub rating: Option<f64>,

    pub is_verified: bool,

    pub listing_type: ListingType,

    /// The user who created this listing. None for seeded data without
    /// an owner; ownership checks deny mutations in that case unless
    /// the caller matches.
    pub created_by: Option<UserId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Bumps the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Returns true when the given user owns this listing.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.created_by == Some(user_id)
    }
}
