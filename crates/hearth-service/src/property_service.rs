//! Property listing service with look-aside caching.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{
    CreatePropertyRequest, DataSource, PropertyListResponse, PropertyQuery, PropertyResponse,
    UpdatePropertyRequest,
};
use async_trait::async_trait;
use hearth_core::{HearthError, HearthResult, Property, PropertyId, UserId, ValidateExt};
use hearth_repository::PropertyRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Service for property listing operations.
#[async_trait]
pub trait PropertyService: Send + Sync {
    /// Lists properties matching the query, served from the cache when
    /// possible.
    async fn list(&self, query: PropertyQuery) -> HearthResult<PropertyListResponse>;

    /// Fetches a single property, served from the cache when possible.
    async fn get(&self, id: PropertyId) -> HearthResult<PropertyResponse>;

    /// Creates a property listing owned by the caller.
    async fn create(&self, owner: UserId, request: CreatePropertyRequest)
        -> HearthResult<Property>;

    /// Updates a property. Only the owner may update it.
    async fn update(
        &self,
        caller: UserId,
        id: PropertyId,
        request: UpdatePropertyRequest,
    ) -> HearthResult<Property>;

    /// Deletes a property. Only the owner may delete it.
    async fn delete(&self, caller: UserId, id: PropertyId) -> HearthResult<()>;
}

/// Default property service implementation.
pub struct PropertyServiceImpl<R: PropertyRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheInterface>,
}

impl<R: PropertyRepository> PropertyServiceImpl<R> {
    /// Creates a new property service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { repository, cache }
    }

    /// Loads a property and checks that the caller owns it.
    async fn find_owned(&self, caller: UserId, id: PropertyId) -> HearthResult<Property> {
        let property = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HearthError::not_found("Property", id))?;

        if !property.is_owned_by(caller) {
            return Err(HearthError::forbidden(
                "Only the owner can modify this property",
            ));
        }

        Ok(property)
    }

    /// Drops the cached entry for one property and every cached list.
    ///
    /// Lists are invalidated wholesale: any mutation can change the
    /// membership of an unknown number of filtered lists, so clearing
    /// them all is the only correct option without tracking which
    /// queries each property matches.
    async fn invalidate(&self, id: PropertyId) {
        let deleted = self.cache.delete(&[cache_keys::property_by_id(id)]).await;
        let cleared = self
            .cache
            .clear_by_pattern(cache_keys::PROPERTIES_LIST_PATTERN)
            .await;
        debug!(
            "Invalidated cache for property {}: entry deleted={}, lists cleared={}",
            id, deleted, cleared
        );
    }
}

#[async_trait]
impl<R: PropertyRepository> PropertyService for PropertyServiceImpl<R> {
    async fn list(&self, query: PropertyQuery) -> HearthResult<PropertyListResponse> {
        let key = cache_keys::properties_list(&query.cache_params());

        if let Some(mut cached) = self.cache.get::<PropertyListResponse>(&key).await {
            cached.source = DataSource::Cache;
            return Ok(cached);
        }

        let filter = query.to_filter()?;
        let sort = query.to_sort()?;
        let page = self.repository.find_page(&filter, &sort, query.page_request()).await?;

        let response = PropertyListResponse::from_page(page);
        self.cache.set(&key, &response, cache_keys::LIST_TTL).await;

        Ok(response)
    }

    async fn get(&self, id: PropertyId) -> HearthResult<PropertyResponse> {
        let key = cache_keys::property_by_id(id);

        if let Some(property) = self.cache.get::<Property>(&key).await {
            return Ok(PropertyResponse {
                source: DataSource::Cache,
                data: property,
            });
        }

        let property = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| HearthError::not_found("Property", id))?;

        self.cache.set(&key, &property, cache_keys::DEFAULT_TTL).await;

        Ok(PropertyResponse {
            source: DataSource::Database,
            data: property,
        })
    }

    async fn create(
        &self,
        owner: UserId,
        request: CreatePropertyRequest,
    ) -> HearthResult<Property> {
        request.validate_request()?;

        let external_id = request
            .external_id
            .clone()
            .unwrap_or_else(|| format!("PROP{}", chrono::Utc::now().timestamp_millis()));

        if self.repository.exists_by_external_id(&external_id).await? {
            return Err(HearthError::conflict(format!(
                "Property with id {} already exists",
                external_id
            )));
        }

        let property = request.into_property(external_id, owner);
        let stored = self.repository.insert(&property).await?;

        info!("Created property {} ({})", stored.external_id, stored.id);
        // A new row can enter any cached list, but it has no entity
        // entry yet, so only the lists need clearing.
        let cleared = self
            .cache
            .clear_by_pattern(cache_keys::PROPERTIES_LIST_PATTERN)
            .await;
        debug!("Cleared {} cached lists after creating {}", cleared, stored.id);

        Ok(stored)
    }

    async fn update(
        &self,
        caller: UserId,
        id: PropertyId,
        request: UpdatePropertyRequest,
    ) -> HearthResult<Property> {
        request.validate_request()?;

        let mut property = self.find_owned(caller, id).await?;
        request.apply_to(&mut property);

        let stored = self.repository.update(&property).await?;

        info!("Updated property {}", id);
        self.invalidate(id).await;

        Ok(stored)
    }

    async fn delete(&self, caller: UserId, id: PropertyId) -> HearthResult<()> {
        self.find_owned(caller, id).await?;

        if !self.repository.delete(id).await? {
            return Err(HearthError::not_found("Property", id));
        }

        info!("Deleted property {}", id);
        self.invalidate(id).await;

        Ok(())
    }
}
