//! Favorites and recommendation endpoints.

use crate::extractors::AuthenticatedUser;
use crate::responses::{created, no_content, ok, ApiResponse, ApiResult, AppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use hearth_core::{Property, PropertyId, Recommendation};
use hearth_service::dto::{RecommendRequest, RecommendationDto};
use uuid::Uuid;

/// Adds a property to the caller's favorites.
#[utoipa::path(
    post,
    path = "/api/v1/users/favorites/{propertyId}",
    params(("propertyId" = String, Path, description = "Property ID")),
    responses(
        (status = 201, description = "Added to favorites"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Property not found"),
        (status = 409, description = "Already a favorite"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(property_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .user_service
        .add_favorite(user.user_id()?, PropertyId::from_uuid(property_id))
        .await?;
    Ok(StatusCode::CREATED)
}

/// Removes a property from the caller's favorites.
#[utoipa::path(
    delete,
    path = "/api/v1/users/favorites/{propertyId}",
    params(("propertyId" = String, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Not a favorite"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(property_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .user_service
        .remove_favorite(user.user_id()?, PropertyId::from_uuid(property_id))
        .await?;
    Ok(no_content())
}

/// Lists the caller's favorite properties.
#[utoipa::path(
    get,
    path = "/api/v1/users/favorites",
    responses(
        (status = 200, description = "Favorite properties", body = Vec<Object>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<Property>> {
    let favorites = state.user_service.list_favorites(user.user_id()?).await?;
    ok(favorites)
}

/// Recommends a property to another user by email.
#[utoipa::path(
    post,
    path = "/api/v1/users/recommendations/{propertyId}",
    params(("propertyId" = String, Path, description = "Property ID")),
    request_body = RecommendRequest,
    responses(
        (status = 201, description = "Recommendation sent", body = Object),
        (status = 400, description = "Invalid request or self-recommendation"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Property or recipient not found"),
        (status = 409, description = "Already recommended to this user"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn recommend_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(property_id): Path<Uuid>,
    Json(request): Json<RecommendRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Recommendation>>), AppError> {
    let recommendation = state
        .user_service
        .recommend(user.user_id()?, PropertyId::from_uuid(property_id), request)
        .await?;
    Ok(created(recommendation))
}

/// Lists recommendations the caller has received.
#[utoipa::path(
    get,
    path = "/api/v1/users/recommendations",
    responses(
        (status = 200, description = "Received recommendations", body = Vec<RecommendationDto>),
        (status = 401, description = "Not authenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn received_recommendations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Vec<RecommendationDto>> {
    let recommendations = state
        .user_service
        .received_recommendations(user.user_id()?)
        .await?;
    ok(recommendations)
}

/// Creates the user routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route(
            "/favorites/:property_id",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/recommendations", get(received_recommendations))
        .route("/recommendations/:property_id", post(recommend_property))
}
