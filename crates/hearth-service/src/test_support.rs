//! In-memory doubles for service tests.

use crate::cache::CacheInterface;
use async_trait::async_trait;
use hearth_core::{
    HearthResult, Page, PageRequest, Property, PropertyId, Recommendation, User, UserId,
};
use hearth_repository::{PropertyFilter, PropertyRepository, PropertySort, UserRepository};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory cache backend. Patterns support a trailing `*` only, which
/// is all the services use.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    enabled: bool,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            enabled: true,
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: std::time::Duration) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    async fn delete(&self, keys: &[String]) -> u64 {
        if keys.is_empty() {
            return 0;
        }
        let mut entries = self.entries.lock().unwrap();
        keys.iter().filter(|k| entries.remove(*k).is_some()).count() as u64
    }

    async fn clear_by_pattern(&self, pattern: &str) -> u64 {
        let prefix = pattern.trim_end_matches('*');
        let mut entries = self.entries.lock().unwrap();
        let matching: Vec<String> = entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        for key in &matching {
            entries.remove(key);
        }
        matching.len() as u64
    }
}

/// In-memory property repository. Filtering supports only what the
/// tests exercise; the SQL translation has its own tests.
#[derive(Default)]
pub struct InMemoryPropertyRepository {
    properties: Mutex<Vec<Property>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            properties: Mutex::new(properties),
        }
    }

    pub fn count(&self) -> usize {
        self.properties.lock().unwrap().len()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn find_by_id(&self, id: PropertyId) -> HearthResult<Option<Property>> {
        Ok(self
            .properties
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn find_page(
        &self,
        filter: &PropertyFilter,
        _sort: &PropertySort,
        page: PageRequest,
    ) -> HearthResult<Page<Property>> {
        let properties = self.properties.lock().unwrap();
        let matching: Vec<Property> = properties
            .iter()
            .filter(|p| {
                filter
                    .city
                    .as_deref()
                    .map_or(true, |city| p.location_city == city)
                    && filter.bedrooms.map_or(true, |b| p.bedrooms == b)
                    && filter
                        .listing_type
                        .map_or(true, |lt| p.listing_type == lt)
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let content: Vec<Property> = matching
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .collect();
        Ok(Page::new(content, page.page, page.size, total))
    }

    async fn exists_by_external_id(&self, external_id: &str) -> HearthResult<bool> {
        Ok(self
            .properties
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.external_id == external_id))
    }

    async fn insert(&self, property: &Property) -> HearthResult<Property> {
        self.properties.lock().unwrap().push(property.clone());
        Ok(property.clone())
    }

    async fn update(&self, property: &Property) -> HearthResult<Property> {
        let mut properties = self.properties.lock().unwrap();
        if let Some(existing) = properties.iter_mut().find(|p| p.id == property.id) {
            *existing = property.clone();
        }
        Ok(property.clone())
    }

    async fn delete(&self, id: PropertyId) -> HearthResult<bool> {
        let mut properties = self.properties.lock().unwrap();
        let before = properties.len();
        properties.retain(|p| p.id != id);
        Ok(properties.len() < before)
    }
}

/// In-memory user repository with favorites and recommendations.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    favorites: Mutex<Vec<(UserId, PropertyId)>>,
    recommendations: Mutex<Vec<Recommendation>>,
    properties: Mutex<Vec<Property>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    /// Seeds properties so `list_favorites` can resolve them.
    pub fn seed_properties(&self, properties: Vec<Property>) {
        *self.properties.lock().unwrap() = properties;
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> HearthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> HearthResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> HearthResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn save(&self, user: &User) -> HearthResult<User> {
        self.users.lock().unwrap().push(user.clone());
        Ok(user.clone())
    }

    async fn add_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<bool> {
        let mut favorites = self.favorites.lock().unwrap();
        if favorites.contains(&(user_id, property_id)) {
            return Ok(false);
        }
        favorites.push((user_id, property_id));
        Ok(true)
    }

    async fn remove_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> HearthResult<bool> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|&(u, p)| !(u == user_id && p == property_id));
        Ok(favorites.len() < before)
    }

    async fn is_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<bool> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .contains(&(user_id, property_id)))
    }

    async fn list_favorites(&self, user_id: UserId) -> HearthResult<Vec<Property>> {
        let favorites = self.favorites.lock().unwrap();
        let properties = self.properties.lock().unwrap();
        Ok(favorites
            .iter()
            .filter(|&&(u, _)| u == user_id)
            .filter_map(|&(_, p)| properties.iter().find(|prop| prop.id == p).cloned())
            .collect())
    }

    async fn insert_recommendation(&self, rec: &Recommendation) -> HearthResult<Recommendation> {
        self.recommendations.lock().unwrap().push(rec.clone());
        Ok(rec.clone())
    }

    async fn recommendation_exists(
        &self,
        property_id: PropertyId,
        recommended_by: UserId,
        recipient_id: UserId,
    ) -> HearthResult<bool> {
        Ok(self.recommendations.lock().unwrap().iter().any(|r| {
            r.property_id == property_id
                && r.recommended_by == recommended_by
                && r.recipient_id == recipient_id
        }))
    }

    async fn list_received_recommendations(
        &self,
        recipient_id: UserId,
    ) -> HearthResult<Vec<Recommendation>> {
        Ok(self
            .recommendations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.recipient_id == recipient_id)
            .cloned()
            .collect())
    }
}

/// Builds a property for tests.
pub fn sample_property(external_id: &str, city: &str, owner: Option<UserId>) -> Property {
    use hearth_core::{FurnishingStatus, ListedBy, ListingType};

    let now = chrono::Utc::now();
    Property {
        id: PropertyId::new(),
        external_id: external_id.to_string(),
        title: format!("Listing {}", external_id),
        property_type: "Apartment".to_string(),
        price: 25_000.0,
        location_state: "Maharashtra".to_string(),
        location_city: city.to_string(),
        area_sq_ft: 900.0,
        bedrooms: 2,
        bathrooms: 2,
        amenities: vec!["lift".to_string()],
        furnishing_status: FurnishingStatus::Furnished,
        available_from: None,
        listed_by: ListedBy::Owner,
        tags: vec!["affordable".to_string()],
        color_theme: None,
        rating: Some(4.1),
        is_verified: true,
        listing_type: ListingType::Rent,
        created_by: owner,
        created_at: now,
        updated_at: now,
    }
}
