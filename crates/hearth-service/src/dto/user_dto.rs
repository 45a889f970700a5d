//! Favorites and recommendation DTOs.

use chrono::{DateTime, Utc};
use hearth_core::{Property, PropertyId, Recommendation, RecommendationId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to recommend a property to another user by email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[validate(email(message = "Invalid recipient email address"))]
    pub recipient_email: String,

    #[validate(length(max = 500, message = "Message cannot exceed 500 characters"))]
    pub message: Option<String>,
}

/// A received recommendation, with the property attached when it still
/// exists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDto {
    #[schema(value_type = String)]
    pub id: RecommendationId,
    #[schema(value_type = String)]
    pub property_id: PropertyId,
    /// None when the property has been deleted since.
    #[schema(value_type = Option<Object>)]
    pub property: Option<Property>,
    #[schema(value_type = String)]
    pub recommended_by: UserId,
    pub message: Option<String>,
    pub recommended_at: DateTime<Utc>,
}

impl RecommendationDto {
    /// Combines a recommendation with its (possibly deleted) property.
    #[must_use]
    pub fn from_parts(rec: Recommendation, property: Option<Property>) -> Self {
        Self {
            id: rec.id,
            property_id: rec.property_id,
            property,
            recommended_by: rec.recommended_by,
            message: rec.message,
            recommended_at: rec.recommended_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_validation() {
        let valid = RecommendRequest {
            recipient_email: "friend@example.com".to_string(),
            message: Some("Check this out".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RecommendRequest {
            recipient_email: "nope".to_string(),
            message: None,
        };
        assert!(bad_email.validate().is_err());

        let long_message = RecommendRequest {
            recipient_email: "friend@example.com".to_string(),
            message: Some("x".repeat(501)),
        };
        assert!(long_message.validate().is_err());
    }

    #[test]
    fn test_dto_from_parts_without_property() {
        let rec = Recommendation::new(PropertyId::new(), UserId::new(), UserId::new(), None);
        let dto = RecommendationDto::from_parts(rec.clone(), None);
        assert_eq!(dto.id, rec.id);
        assert!(dto.property.is_none());
    }
}
