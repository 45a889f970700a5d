//! Filter and sort descriptors for property listing queries.

use chrono::NaiveDate;
use hearth_core::{FurnishingStatus, ListedBy, ListingType};

/// Filter criteria for listing properties. All fields are optional and
/// combined with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub property_type: Option<String>,
    pub listing_type: Option<ListingType>,
    pub furnishing_status: Option<FurnishingStatus>,
    pub listed_by: Option<ListedBy>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub bedrooms: Option<i32>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub max_bathrooms: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub is_verified: Option<bool>,
    /// Only properties available on or before this date.
    pub available_from: Option<NaiveDate>,
    /// Only properties available on or after this date.
    pub available_after: Option<NaiveDate>,
    /// Properties must carry every listed amenity.
    pub amenities: Vec<String>,
    /// Properties must carry at least one of the listed tags.
    pub tags: Vec<String>,
    /// Substring match against the title.
    pub keywords: Option<String>,
}

/// Whitelisted sortable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Price,
    #[default]
    CreatedAt,
    UpdatedAt,
    AreaSqFt,
    Bedrooms,
    Bathrooms,
    Rating,
}

impl SortField {
    /// Parses a client-supplied sort field name. Unknown names are
    /// rejected so arbitrary strings never reach the SQL layer.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "price" => Some(Self::Price),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "areaSqFt" => Some(Self::AreaSqFt),
            "bedrooms" => Some(Self::Bedrooms),
            "bathrooms" => Some(Self::Bathrooms),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }

    /// Returns the database column for this field.
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::AreaSqFt => "area_sq_ft",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::Rating => "rating",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort descriptor. Defaults to newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertySort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl PropertySort {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_whitelist() {
        assert_eq!(SortField::parse("price"), Some(SortField::Price));
        assert_eq!(SortField::parse("areaSqFt"), Some(SortField::AreaSqFt));
        assert_eq!(SortField::parse("id; DROP TABLE properties"), None);
        assert_eq!(SortField::parse("created_at"), None);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let sort = PropertySort::default();
        assert_eq!(sort.field, SortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.field.column(), "created_at");
        assert_eq!(sort.direction.keyword(), "DESC");
    }
}
