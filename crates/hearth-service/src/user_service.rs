//! Favorites and peer-to-peer recommendations.

use crate::dto::{RecommendRequest, RecommendationDto};
use async_trait::async_trait;
use hearth_core::{
    HearthError, HearthResult, Property, PropertyId, Recommendation, UserId, ValidateExt,
};
use hearth_repository::{PropertyRepository, UserRepository};
use std::sync::Arc;
use tracing::info;

/// Service for user favorites and recommendations.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Adds a property to the user's favorites.
    async fn add_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<()>;

    /// Removes a property from the user's favorites.
    async fn remove_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<()>;

    /// Lists the user's favorite properties.
    async fn list_favorites(&self, user_id: UserId) -> HearthResult<Vec<Property>>;

    /// Recommends a property to another user, addressed by email.
    async fn recommend(
        &self,
        sender: UserId,
        property_id: PropertyId,
        request: RecommendRequest,
    ) -> HearthResult<Recommendation>;

    /// Lists recommendations the user has received, newest first.
    async fn received_recommendations(
        &self,
        user_id: UserId,
    ) -> HearthResult<Vec<RecommendationDto>>;
}

/// Default user service implementation.
pub struct UserServiceImpl<U: UserRepository, P: PropertyRepository> {
    users: Arc<U>,
    properties: Arc<P>,
}

impl<U: UserRepository, P: PropertyRepository> UserServiceImpl<U, P> {
    /// Creates a new user service.
    pub fn new(users: Arc<U>, properties: Arc<P>) -> Self {
        Self { users, properties }
    }

    async fn require_property(&self, property_id: PropertyId) -> HearthResult<Property> {
        self.properties
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| HearthError::not_found("Property", property_id))
    }
}

#[async_trait]
impl<U: UserRepository, P: PropertyRepository> UserService for UserServiceImpl<U, P> {
    async fn add_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<()> {
        self.require_property(property_id).await?;

        if !self.users.add_favorite(user_id, property_id).await? {
            return Err(HearthError::conflict("Property is already a favorite"));
        }

        info!("User {} favorited property {}", user_id, property_id);
        Ok(())
    }

    async fn remove_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<()> {
        if !self.users.remove_favorite(user_id, property_id).await? {
            return Err(HearthError::not_found("Favorite", property_id));
        }

        info!("User {} unfavorited property {}", user_id, property_id);
        Ok(())
    }

    async fn list_favorites(&self, user_id: UserId) -> HearthResult<Vec<Property>> {
        self.users.list_favorites(user_id).await
    }

    async fn recommend(
        &self,
        sender: UserId,
        property_id: PropertyId,
        request: RecommendRequest,
    ) -> HearthResult<Recommendation> {
        request.validate_request()?;

        self.require_property(property_id).await?;

        let recipient = self
            .users
            .find_by_email(&request.recipient_email)
            .await?
            .ok_or_else(|| {
                HearthError::not_found("User", request.recipient_email.clone())
            })?;

        if recipient.id == sender {
            return Err(HearthError::BusinessRule(
                "Cannot recommend a property to yourself".to_string(),
            ));
        }

        if self
            .users
            .recommendation_exists(property_id, sender, recipient.id)
            .await?
        {
            return Err(HearthError::conflict(
                "Property already recommended to this user",
            ));
        }

        let rec = Recommendation::new(property_id, sender, recipient.id, request.message);
        let stored = self.users.insert_recommendation(&rec).await?;

        info!(
            "User {} recommended property {} to {}",
            sender, property_id, recipient.id
        );
        Ok(stored)
    }

    async fn received_recommendations(
        &self,
        user_id: UserId,
    ) -> HearthResult<Vec<RecommendationDto>> {
        let recs = self.users.list_received_recommendations(user_id).await?;

        let mut dtos = Vec::with_capacity(recs.len());
        for rec in recs {
            // A recommended property may have been deleted since
            let property = self.properties.find_by_id(rec.property_id).await?;
            dtos.push(RecommendationDto::from_parts(rec, property));
        }

        Ok(dtos)
    }
}
