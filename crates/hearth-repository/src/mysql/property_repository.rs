//! MySQL property repository implementation.

use crate::{traits::PropertyRepository, DatabasePool, PropertyFilter, PropertySort};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use hearth_core::{
    FurnishingStatus, HearthError, HearthResult, ListedBy, ListingType, Page, PageRequest,
    Property, PropertyId, UserId,
};
use sqlx::types::Json;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL property repository implementation.
#[derive(Clone)]
pub struct MySqlPropertyRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlPropertyRepository {
    /// Creates a new MySQL property repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a property.
#[derive(Debug, FromRow)]
pub(crate) struct PropertyRow {
    id: String, // MySQL stores UUID as CHAR(36)
    external_id: String,
    title: String,
    property_type: String,
    price: f64,
    location_state: String,
    location_city: String,
    area_sq_ft: f64,
    bedrooms: i32,
    bathrooms: i32,
    amenities: Json<Vec<String>>,
    furnishing_status: String,
    available_from: Option<NaiveDate>,
    listed_by: String,
    tags: Json<Vec<String>>,
    color_theme: Option<String>,
    rating: Option<f64>,
    is_verified: bool,
    listing_type: String,
    created_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = HearthError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| HearthError::Internal(format!("Invalid UUID in database: {}", e)))?;

        let created_by = row
            .created_by
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| HearthError::Internal(format!("Invalid UUID in database: {}", e)))?
            .map(UserId::from_uuid);

        Ok(Property {
            id: PropertyId::from_uuid(id),
            external_id: row.external_id,
            title: row.title,
            property_type: row.property_type,
            price: row.price,
            location_state: row.location_state,
            location_city: row.location_city,
            area_sq_ft: row.area_sq_ft,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            amenities: row.amenities.0,
            furnishing_status: FurnishingStatus::parse(&row.furnishing_status).ok_or_else(
                || {
                    HearthError::Internal(format!(
                        "Invalid furnishing status in database: {}",
                        row.furnishing_status
                    ))
                },
            )?,
            available_from: row.available_from,
            listed_by: ListedBy::parse(&row.listed_by).ok_or_else(|| {
                HearthError::Internal(format!("Invalid listed_by in database: {}", row.listed_by))
            })?,
            tags: row.tags.0,
            color_theme: row.color_theme,
            rating: row.rating,
            is_verified: row.is_verified,
            listing_type: ListingType::parse(&row.listing_type).ok_or_else(|| {
                HearthError::Internal(format!(
                    "Invalid listing type in database: {}",
                    row.listing_type
                ))
            })?,
            created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROPERTY_COLUMNS: &str = "id, external_id, title, property_type, price, \
     location_state, location_city, area_sq_ft, bedrooms, bathrooms, amenities, \
     furnishing_status, available_from, listed_by, tags, color_theme, rating, \
     is_verified, listing_type, created_by, created_at, updated_at";

/// Appends the filter conditions to a query builder. Shared between the
/// page query and the count query so the two always agree.
fn push_filters(qb: &mut QueryBuilder<'_, MySql>, filter: &PropertyFilter) {
    if let Some(ref property_type) = filter.property_type {
        qb.push(" AND property_type = ").push_bind(property_type.clone());
    }
    if let Some(listing_type) = filter.listing_type {
        qb.push(" AND listing_type = ").push_bind(listing_type.as_str());
    }
    if let Some(furnishing) = filter.furnishing_status {
        qb.push(" AND furnishing_status = ").push_bind(furnishing.as_str());
    }
    if let Some(listed_by) = filter.listed_by {
        qb.push(" AND listed_by = ").push_bind(listed_by.as_str());
    }
    if let Some(ref state) = filter.state {
        qb.push(" AND location_state = ").push_bind(state.clone());
    }
    if let Some(ref city) = filter.city {
        qb.push(" AND location_city = ").push_bind(city.clone());
    }
    if let Some(min_price) = filter.min_price {
        qb.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price <= ").push_bind(max_price);
    }
    if let Some(min_area) = filter.min_area {
        qb.push(" AND area_sq_ft >= ").push_bind(min_area);
    }
    if let Some(max_area) = filter.max_area {
        qb.push(" AND area_sq_ft <= ").push_bind(max_area);
    }
    if let Some(bedrooms) = filter.bedrooms {
        qb.push(" AND bedrooms = ").push_bind(bedrooms);
    }
    if let Some(min_bedrooms) = filter.min_bedrooms {
        qb.push(" AND bedrooms >= ").push_bind(min_bedrooms);
    }
    if let Some(max_bedrooms) = filter.max_bedrooms {
        qb.push(" AND bedrooms <= ").push_bind(max_bedrooms);
    }
    if let Some(bathrooms) = filter.bathrooms {
        qb.push(" AND bathrooms = ").push_bind(bathrooms);
    }
    if let Some(min_bathrooms) = filter.min_bathrooms {
        qb.push(" AND bathrooms >= ").push_bind(min_bathrooms);
    }
    if let Some(max_bathrooms) = filter.max_bathrooms {
        qb.push(" AND bathrooms <= ").push_bind(max_bathrooms);
    }
    if let Some(min_rating) = filter.min_rating {
        qb.push(" AND rating >= ").push_bind(min_rating);
    }
    if let Some(max_rating) = filter.max_rating {
        qb.push(" AND rating <= ").push_bind(max_rating);
    }
    if let Some(is_verified) = filter.is_verified {
        qb.push(" AND is_verified = ").push_bind(is_verified);
    }
    if let Some(available_from) = filter.available_from {
        qb.push(" AND available_from IS NOT NULL AND available_from <= ")
            .push_bind(available_from);
    }
    if let Some(available_after) = filter.available_after {
        qb.push(" AND available_from IS NOT NULL AND available_from >= ")
            .push_bind(available_after);
    }
    // Every requested amenity must be present
    for amenity in &filter.amenities {
        qb.push(" AND JSON_CONTAINS(amenities, JSON_QUOTE(")
            .push_bind(amenity.clone())
            .push("))");
    }
    // At least one requested tag must be present
    if !filter.tags.is_empty() {
        qb.push(" AND (");
        let mut first = true;
        for tag in &filter.tags {
            if !first {
                qb.push(" OR ");
            }
            first = false;
            qb.push("JSON_CONTAINS(tags, JSON_QUOTE(")
                .push_bind(tag.clone())
                .push("))");
        }
        qb.push(")");
    }
    if let Some(ref keywords) = filter.keywords {
        qb.push(" AND title LIKE ")
            .push_bind(format!("%{}%", keywords));
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn find_by_id(&self, id: PropertyId) -> HearthResult<Option<Property>> {
        debug!("Finding property by id: {}", id);

        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?"
        ))
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Property::try_from).transpose()
    }

    async fn find_page(
        &self,
        filter: &PropertyFilter,
        sort: &PropertySort,
        page: PageRequest,
    ) -> HearthResult<Page<Property>> {
        debug!("Listing properties, page: {}, size: {}", page.page, page.size);

        let mut count_qb =
            QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM properties WHERE 1=1");
        push_filters(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;

        let mut qb = QueryBuilder::<MySql>::new(format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE 1=1"
        ));
        push_filters(&mut qb, filter);
        // Sort column is whitelisted, never client input
        qb.push(" ORDER BY ")
            .push(sort.field.column())
            .push(" ")
            .push(sort.direction.keyword());
        qb.push(" LIMIT ").push_bind(page.limit() as i64);
        qb.push(" OFFSET ").push_bind(page.offset() as i64);

        let rows: Vec<PropertyRow> = qb
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        let properties: Vec<Property> = rows
            .into_iter()
            .map(Property::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(properties, page.page, page.size, total as u64))
    }

    async fn exists_by_external_id(&self, external_id: &str) -> HearthResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM properties WHERE external_id = ? LIMIT 1")
                .bind(external_id)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn insert(&self, property: &Property) -> HearthResult<Property> {
        debug!("Inserting property: {}", property.external_id);

        sqlx::query(
            r#"
            INSERT INTO properties
                (id, external_id, title, property_type, price, location_state,
                 location_city, area_sq_ft, bedrooms, bathrooms, amenities,
                 furnishing_status, available_from, listed_by, tags, color_theme,
                 rating, is_verified, listing_type, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(property.id.into_inner().to_string())
        .bind(&property.external_id)
        .bind(&property.title)
        .bind(&property.property_type)
        .bind(property.price)
        .bind(&property.location_state)
        .bind(&property.location_city)
        .bind(property.area_sq_ft)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(Json(&property.amenities))
        .bind(property.furnishing_status.as_str())
        .bind(property.available_from)
        .bind(property.listed_by.as_str())
        .bind(Json(&property.tags))
        .bind(&property.color_theme)
        .bind(property.rating)
        .bind(property.is_verified)
        .bind(property.listing_type.as_str())
        .bind(property.created_by.map(|id| id.into_inner().to_string()))
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(property.id)
            .await?
            .ok_or_else(|| HearthError::Internal("Failed to fetch inserted property".to_string()))
    }

    async fn update(&self, property: &Property) -> HearthResult<Property> {
        debug!("Updating property: {}", property.id);

        // external_id and created_by are immutable after creation
        sqlx::query(
            r#"
            UPDATE properties
            SET title = ?, property_type = ?, price = ?, location_state = ?,
                location_city = ?, area_sq_ft = ?, bedrooms = ?, bathrooms = ?,
                amenities = ?, furnishing_status = ?, available_from = ?,
                listed_by = ?, tags = ?, color_theme = ?, rating = ?,
                is_verified = ?, listing_type = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&property.title)
        .bind(&property.property_type)
        .bind(property.price)
        .bind(&property.location_state)
        .bind(&property.location_city)
        .bind(property.area_sq_ft)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(Json(&property.amenities))
        .bind(property.furnishing_status.as_str())
        .bind(property.available_from)
        .bind(property.listed_by.as_str())
        .bind(Json(&property.tags))
        .bind(&property.color_theme)
        .bind(property.rating)
        .bind(property.is_verified)
        .bind(property.listing_type.as_str())
        .bind(property.updated_at)
        .bind(property.id.into_inner().to_string())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(property.id)
            .await?
            .ok_or_else(|| HearthError::Internal("Failed to fetch updated property".to_string()))
    }

    async fn delete(&self, id: PropertyId) -> HearthResult<bool> {
        debug!("Deleting property: {}", id);

        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id.into_inner().to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlPropertyRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlPropertyRepository")
            .finish_non_exhaustive()
    }
}
