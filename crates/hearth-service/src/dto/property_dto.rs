//! Property DTOs.

use chrono::NaiveDate;
use hearth_core::{
    FurnishingStatus, HearthError, HearthResult, ListedBy, ListingType, Page, PageRequest,
    Property, PropertyId, UserId,
};
use hearth_repository::{PropertyFilter, PropertySort, SortDirection, SortField};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Where a response's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Cache,
    Database,
}

/// Query parameters accepted by the property listing endpoint.
///
/// The parameter names are part of the public API and also feed the
/// cache key derivation, so they must stay stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyQuery {
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub furnishing_status: Option<String>,
    pub listed_by: Option<String>,
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
    /// Available on or before this date.
    pub available_from: Option<NaiveDate>,
    /// Available on or after this date.
    pub available_after: Option<NaiveDate>,
    /// Comma-separated list; properties must have all of them.
    pub amenities: Option<String>,
    /// Comma-separated list; properties must have at least one.
    pub tags: Option<String>,
    /// Substring match against the title.
    pub keywords: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl PropertyQuery {
    /// Returns the present parameters as name/value pairs for cache key
    /// derivation. Names use their wire spelling.
    #[must_use]
    pub fn cache_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = Vec::new();

        let mut push_str = |name: &str, value: &Option<String>| {
            if let Some(v) = value {
                params.push((name.to_string(), v.clone()));
            }
        };
        push_str("propertyType", &self.property_type);
        push_str("listingType", &self.listing_type);
        push_str("furnishingStatus", &self.furnishing_status);
        push_str("listedBy", &self.listed_by);
        push_str("state", &self.state);
        push_str("city", &self.city);
        push_str("amenities", &self.amenities);
        push_str("tags", &self.tags);
        push_str("keywords", &self.keywords);
        push_str("sortBy", &self.sort_by);
        push_str("sortOrder", &self.sort_order);

        macro_rules! push_display {
            ($name:literal, $field:expr) => {
                if let Some(v) = $field {
                    params.push(($name.to_string(), v.to_string()));
                }
            };
        }
        push_display!("minPrice", self.min_price);
        push_display!("maxPrice", self.max_price);
        push_display!("minArea", self.min_area);
        push_display!("maxArea", self.max_area);
        push_display!("bedrooms", self.bedrooms);
        push_display!("minBedrooms", self.min_bedrooms);
        push_display!("maxBedrooms", self.max_bedrooms);
        push_display!("bathrooms", self.bathrooms);
        push_display!("minBathrooms", self.min_bathrooms);
        push_display!("maxBathrooms", self.max_bathrooms);
        push_display!("minRating", self.min_rating);
        push_display!("maxRating", self.max_rating);
        push_display!("isVerified", self.is_verified);
        push_display!("availableFrom", self.available_from);
        push_display!("availableAfter", self.available_after);
        push_display!("page", self.page);
        push_display!("limit", self.limit);

        params
    }

    /// Builds the repository filter, rejecting unknown enum values.
    pub fn to_filter(&self) -> HearthResult<PropertyFilter> {
        let listing_type = self
            .listing_type
            .as_deref()
            .map(|v| {
                ListingType::parse(v)
                    .ok_or_else(|| HearthError::validation(format!("Invalid listingType: {}", v)))
            })
            .transpose()?;

        let furnishing_status = self
            .furnishing_status
            .as_deref()
            .map(|v| {
                FurnishingStatus::parse(v).ok_or_else(|| {
                    HearthError::validation(format!("Invalid furnishingStatus: {}", v))
                })
            })
            .transpose()?;

        let listed_by = self
            .listed_by
            .as_deref()
            .map(|v| {
                ListedBy::parse(v)
                    .ok_or_else(|| HearthError::validation(format!("Invalid listedBy: {}", v)))
            })
            .transpose()?;

        let split_csv = |value: &Option<String>| -> Vec<String> {
            value
                .as_deref()
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        };

        Ok(PropertyFilter {
            property_type: self.property_type.clone(),
            listing_type,
            furnishing_status,
            listed_by,
            state: self.state.clone(),
            city: self.city.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_area: self.min_area,
            max_area: self.max_area,
            bedrooms: self.bedrooms,
            min_bedrooms: self.min_bedrooms,
            max_bedrooms: self.max_bedrooms,
            bathrooms: self.bathrooms,
            min_bathrooms: self.min_bathrooms,
            max_bathrooms: self.max_bathrooms,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            is_verified: self.is_verified,
            available_from: self.available_from,
            available_after: self.available_after,
            amenities: split_csv(&self.amenities),
            tags: split_csv(&self.tags),
            keywords: self.keywords.clone(),
        })
    }

    /// Builds the sort descriptor, rejecting non-whitelisted fields.
    pub fn to_sort(&self) -> HearthResult<PropertySort> {
        let field = self
            .sort_by
            .as_deref()
            .map(|v| {
                SortField::parse(v)
                    .ok_or_else(|| HearthError::validation(format!("Invalid sortBy: {}", v)))
            })
            .transpose()?
            .unwrap_or_default();

        let direction = self
            .sort_order
            .as_deref()
            .map(|v| {
                SortDirection::parse(v)
                    .ok_or_else(|| HearthError::validation(format!("Invalid sortOrder: {}", v)))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(PropertySort::new(field, direction))
    }

    /// Builds the page request with defaults applied.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

/// Paginated list of properties with its data source annotation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListResponse {
    pub source: DataSource,
    /// Number of items on this page.
    pub count: usize,
    /// Total matching items across all pages.
    pub total: u64,
    pub total_pages: u64,
    pub current_page: usize,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Property>,
}

impl PropertyListResponse {
    /// Builds a database-sourced response from a repository page.
    #[must_use]
    pub fn from_page(page: Page<Property>) -> Self {
        Self {
            source: DataSource::Database,
            count: page.len(),
            total: page.total_elements,
            total_pages: page.total_pages,
            current_page: page.page,
            data: page.content,
        }
    }
}

/// A single property with its data source annotation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub source: DataSource,
    #[schema(value_type = Object)]
    pub data: Property,
}

/// Request to create a property listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    /// Optional external identifier; generated when omitted.
    #[validate(length(min = 1, max = 50))]
    pub external_id: Option<String>,

    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = hearth_core::rules::not_blank)
    )]
    pub title: String,

    #[validate(length(min = 1, max = 50))]
    pub property_type: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(range(min = 0.0, message = "Area cannot be negative"))]
    pub area_sq_ft: f64,

    #[validate(range(min = 0))]
    pub bedrooms: i32,

    #[validate(range(min = 0))]
    pub bathrooms: i32,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[schema(value_type = String)]
    pub furnishing_status: FurnishingStatus,

    pub available_from: Option<NaiveDate>,

    #[schema(value_type = String)]
    pub listed_by: ListedBy,

    #[serde(default)]
    pub tags: Vec<String>,

    pub color_theme: Option<String>,

    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,

    #[serde(default)]
    pub is_verified: bool,

    #[schema(value_type = String)]
    pub listing_type: ListingType,
}

impl CreatePropertyRequest {
    /// Builds the property entity owned by the given user.
    #[must_use]
    pub fn into_property(self, external_id: String, owner: UserId) -> Property {
        let now = chrono::Utc::now();
        Property {
            id: PropertyId::new(),
            external_id,
            title: self.title,
            property_type: self.property_type,
            price: self.price,
            location_state: self.state,
            location_city: self.city,
            area_sq_ft: self.area_sq_ft,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            furnishing_status: self.furnishing_status,
            available_from: self.available_from,
            listed_by: self.listed_by,
            tags: self.tags,
            color_theme: self.color_theme,
            rating: self.rating,
            is_verified: self.is_verified,
            listing_type: self.listing_type,
            created_by: Some(owner),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to update a property listing. Absent fields are unchanged;
/// the external identifier and owner are immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub property_type: Option<String>,

    #[validate(range(min = 0.0))]
    pub price: Option<f64>,

    #[validate(length(min = 1, max = 100))]
    pub state: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    #[validate(range(min = 0.0))]
    pub area_sq_ft: Option<f64>,

    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,

    pub amenities: Option<Vec<String>>,

    #[schema(value_type = Option<String>)]
    pub furnishing_status: Option<FurnishingStatus>,

    pub available_from: Option<NaiveDate>,

    #[schema(value_type = Option<String>)]
    pub listed_by: Option<ListedBy>,

    pub tags: Option<Vec<String>>,

    pub color_theme: Option<String>,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,

    pub is_verified: Option<bool>,

    #[schema(value_type = Option<String>)]
    pub listing_type: Option<ListingType>,
}

impl UpdatePropertyRequest {
    /// Applies the present fields to a property and bumps its update
    /// timestamp.
    pub fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(state) = self.state {
            property.location_state = state;
        }
        if let Some(city) = self.city {
            property.location_city = city;
        }
        if let Some(area) = self.area_sq_ft {
            property.area_sq_ft = area;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if let Some(amenities) = self.amenities {
            property.amenities = amenities;
        }
        if let Some(furnishing) = self.furnishing_status {
            property.furnishing_status = furnishing;
        }
        if let Some(available_from) = self.available_from {
            property.available_from = Some(available_from);
        }
        if let Some(listed_by) = self.listed_by {
            property.listed_by = listed_by;
        }
        if let Some(tags) = self.tags {
            property.tags = tags;
        }
        if let Some(color_theme) = self.color_theme {
            property.color_theme = Some(color_theme);
        }
        if let Some(rating) = self.rating {
            property.rating = Some(rating);
        }
        if let Some(is_verified) = self.is_verified {
            property.is_verified = is_verified;
        }
        if let Some(listing_type) = self.listing_type {
            property.listing_type = listing_type;
        }
        property.touch();
    }
}
