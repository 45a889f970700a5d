//! MySQL user repository implementation.

use crate::mysql::property_repository::PropertyRow;
use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hearth_core::{
    Email, HearthError, HearthResult, Property, PropertyId, Recommendation, RecommendationId,
    User, UserId,
};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // MySQL stores UUID as CHAR(36)
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = HearthError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| HearthError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(User {
            id: UserId::from_uuid(id),
            name: row.name,
            email: Email::new_unchecked(row.email),
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Database row representation of a recommendation.
#[derive(Debug, FromRow)]
struct RecommendationRow {
    id: String,
    property_id: String,
    recommended_by: String,
    recipient_id: String,
    message: Option<String>,
    recommended_at: DateTime<Utc>,
}

impl TryFrom<RecommendationRow> for Recommendation {
    type Error = HearthError;

    fn try_from(row: RecommendationRow) -> Result<Self, Self::Error> {
        let parse = |s: &str| {
            Uuid::parse_str(s)
                .map_err(|e| HearthError::Internal(format!("Invalid UUID in database: {}", e)))
        };

        Ok(Recommendation {
            id: RecommendationId::from_uuid(parse(&row.id)?),
            property_id: PropertyId::from_uuid(parse(&row.property_id)?),
            recommended_by: UserId::from_uuid(parse(&row.recommended_by)?),
            recipient_id: UserId::from_uuid(parse(&row.recipient_id)?),
            message: row.message,
            recommended_at: row.recommended_at,
        })
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> HearthResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> HearthResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER(?)"
        ))
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> HearthResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE LOWER(email) = LOWER(?) LIMIT 1")
                .bind(email)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn save(&self, user: &User) -> HearthResult<User> {
        debug!("Saving new user: {}", user.email);

        let id_str = user.id.into_inner().to_string();

        // MySQL doesn't support RETURNING, so insert then select
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| HearthError::Internal("Failed to fetch inserted user".to_string()))
    }

    async fn add_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<bool> {
        debug!("Adding favorite {} for user {}", property_id, user_id);

        let result = sqlx::query(
            "INSERT IGNORE INTO favorites (user_id, property_id, created_at) VALUES (?, ?, NOW())",
        )
        .bind(user_id.into_inner().to_string())
        .bind(property_id.into_inner().to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_favorite(
        &self,
        user_id: UserId,
        property_id: PropertyId,
    ) -> HearthResult<bool> {
        debug!("Removing favorite {} for user {}", property_id, user_id);

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ? AND property_id = ?")
            .bind(user_id.into_inner().to_string())
            .bind(property_id.into_inner().to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_favorite(&self, user_id: UserId, property_id: PropertyId) -> HearthResult<bool> {
        let result: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM favorites WHERE user_id = ? AND property_id = ? LIMIT 1",
        )
        .bind(user_id.into_inner().to_string())
        .bind(property_id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn list_favorites(&self, user_id: UserId) -> HearthResult<Vec<Property>> {
        debug!("Listing favorites for user {}", user_id);

        let rows = sqlx::query_as::<_, PropertyRow>(
            r#"
            SELECT p.id, p.external_id, p.title, p.property_type, p.price,
                   p.location_state, p.location_city, p.area_sq_ft, p.bedrooms,
                   p.bathrooms, p.amenities, p.furnishing_status, p.available_from,
                   p.listed_by, p.tags, p.color_theme, p.rating, p.is_verified,
                   p.listing_type, p.created_by, p.created_at, p.updated_at
            FROM properties p
            INNER JOIN favorites f ON f.property_id = p.id
            WHERE f.user_id = ?
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id.into_inner().to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Property::try_from).collect()
    }

    async fn insert_recommendation(&self, rec: &Recommendation) -> HearthResult<Recommendation> {
        debug!(
            "Recording recommendation of {} from {} to {}",
            rec.property_id, rec.recommended_by, rec.recipient_id
        );

        sqlx::query(
            r#"
            INSERT INTO recommendations
                (id, property_id, recommended_by, recipient_id, message, recommended_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(rec.id.into_inner().to_string())
        .bind(rec.property_id.into_inner().to_string())
        .bind(rec.recommended_by.into_inner().to_string())
        .bind(rec.recipient_id.into_inner().to_string())
        .bind(&rec.message)
        .bind(rec.recommended_at)
        .execute(self.pool.inner())
        .await?;

        Ok(rec.clone())
    }

    async fn recommendation_exists(
        &self,
        property_id: PropertyId,
        recommended_by: UserId,
        recipient_id: UserId,
    ) -> HearthResult<bool> {
        let result: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM recommendations
            WHERE property_id = ? AND recommended_by = ? AND recipient_id = ?
            LIMIT 1
            "#,
        )
        .bind(property_id.into_inner().to_string())
        .bind(recommended_by.into_inner().to_string())
        .bind(recipient_id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(result.is_some())
    }

    async fn list_received_recommendations(
        &self,
        recipient_id: UserId,
    ) -> HearthResult<Vec<Recommendation>> {
        debug!("Listing recommendations received by {}", recipient_id);

        let rows = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, property_id, recommended_by, recipient_id, message, recommended_at
            FROM recommendations
            WHERE recipient_id = ?
            ORDER BY recommended_at DESC
            "#,
        )
        .bind(recipient_id.into_inner().to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Recommendation::try_from).collect()
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
