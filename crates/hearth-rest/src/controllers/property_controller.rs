//! Property listing endpoints.

use crate::extractors::AuthenticatedUser;
use crate::responses::{created, no_content, ok, ApiResponse, ApiResult, AppError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use hearth_core::{Property, PropertyId};
use hearth_service::dto::{
    CreatePropertyRequest, PropertyListResponse, PropertyQuery, PropertyResponse,
    UpdatePropertyRequest,
};
use uuid::Uuid;

/// Lists properties with filtering, sorting, and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    params(PropertyQuery),
    responses(
        (status = 200, description = "Matching properties", body = PropertyListResponse),
        (status = 400, description = "Invalid filter or sort parameter"),
    ),
    tag = "properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> ApiResult<PropertyListResponse> {
    let response = state.property_service.list(query).await?;
    ok(response)
}

/// Fetches a single property by ID.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 200, description = "The property", body = PropertyResponse),
        (status = 404, description = "Property not found"),
    ),
    tag = "properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PropertyResponse> {
    let response = state.property_service.get(PropertyId::from_uuid(id)).await?;
    ok(response)
}

/// Creates a property listing owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Property created", body = Object),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Duplicate property ID"),
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Property>>), AppError> {
    let property = state
        .property_service
        .create(user.user_id()?, request)
        .await?;
    Ok(created(property))
}

/// Updates a property. Only the owner may update it.
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property ID")),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Property updated", body = Object),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePropertyRequest>,
) -> ApiResult<Property> {
    let property = state
        .property_service
        .update(user.user_id()?, PropertyId::from_uuid(id), request)
        .await?;
    ok(property)
}

/// Deletes a property. Only the owner may delete it.
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Property ID")),
    responses(
        (status = 204, description = "Property deleted"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller does not own the property"),
        (status = 404, description = "Property not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "properties"
)]
pub async fn delete_property(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .property_service
        .delete(user.user_id()?, PropertyId::from_uuid(id))
        .await?;
    Ok(no_content())
}

/// Creates the property routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/:id",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
}
