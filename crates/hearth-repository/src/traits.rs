//! Repository trait definitions.

use crate::{PropertyFilter, PropertySort};
use async_trait::async_trait;
use hearth_core::{
    HearthResult, Page, PageRequest, Property, PropertyId, Recommendation, User, UserId,
};

/// Repository for user accounts, favorites, and recommendations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> HearthResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> HearthResult<Option<User>>;

    async fn exists_by_email(&self, email: &str) -> HearthResult<bool>;

    /// Inserts a new user and returns the stored row.
    async fn save(&self, user: &User) -> HearthResult<User>;

    /// Adds a property to the user's favorites. Returns false when the
    /// property was already a favorite.
    async fn add_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<bool>;

    /// Removes a property from the user's favorites. Returns false when
    /// the property was not a favorite.
    async fn remove_favorite(&self, user_id: UserId, property_id: PropertyId)
        -> HearthResult<bool>;

    async fn is_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<bool>;

    /// Lists the user's favorite properties, most recently added first.
    async fn list_favorites(&self, user_id: UserId) -> HearthResult<Vec<Property>>;

    async fn insert_recommendation(&self, rec: &Recommendation) -> HearthResult<Recommendation>;

    /// Checks whether the sender already recommended this property to
    /// this recipient.
    async fn recommendation_exists(
        &self,
        property_id: PropertyId,
        recommended_by: UserId,
        recipient_id: UserId,
    ) -> HearthResult<bool>;

    /// Lists recommendations received by a user, newest first.
    async fn list_received_recommendations(
        &self,
        recipient_id: UserId,
    ) -> HearthResult<Vec<Recommendation>>;
}

/// Repository for property listings.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn find_by_id(&self, id: PropertyId) -> HearthResult<Option<Property>>;

    /// Returns a page of properties matching the filter, ordered by the
    /// given sort descriptor.
    async fn find_page(
        &self,
        filter: &PropertyFilter,
        sort: &PropertySort,
        page: PageRequest,
    ) -> HearthResult<Page<Property>>;

    async fn exists_by_external_id(&self, external_id: &str) -> HearthResult<bool>;

    async fn insert(&self, property: &Property) -> HearthResult<Property>;

    async fn update(&self, property: &Property) -> HearthResult<Property>;

    /// Deletes a property. Returns false when no row matched.
    async fn delete(&self, id: PropertyId) -> HearthResult<bool>;
}
