//! Property recommendation entity.

use crate::{PropertyId, RecommendationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recommendation of a property from one user to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: RecommendationId,

    /// The recommended property.
    pub property_id: PropertyId,

    /// The user who sent the recommendation.
    pub recommended_by: UserId,

    /// The user who received the recommendation.
    pub recipient_id: UserId,

    /// Optional note attached by the sender.
    pub message: Option<String>,

    pub recommended_at: DateTime<Utc>,
}

impl Recommendation {
    #[must_use]
    pub fn new(
        property_id: PropertyId,
        recommended_by: UserId,
        recipient_id: UserId,
        message: Option<String>,
    ) -> Self {
        Self {
            id: RecommendationId::new(),
            property_id,
            recommended_by,
            recipient_id,
            message,
            recommended_at: Utc::now(),
        }
    }
}
