//! OpenAPI documentation.

use crate::controllers::{
    auth_controller, health_controller, property_controller, user_controller,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Hearth API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hearth Property API",
        description = "Property listing service with authentication, favorites, and recommendations"
    ),
    paths(
        auth_controller::register,
        auth_controller::login,
        auth_controller::me,
        property_controller::list_properties,
        property_controller::get_property,
        property_controller::create_property,
        property_controller::update_property,
        property_controller::delete_property,
        user_controller::add_favorite,
        user_controller::remove_favorite,
        user_controller::list_favorites,
        user_controller::recommend_property,
        user_controller::received_recommendations,
        health_controller::health,
        health_controller::liveness,
        health_controller::readiness,
    ),
    components(schemas(
        hearth_service::dto::RegisterRequest,
        hearth_service::dto::LoginRequest,
        hearth_service::dto::AuthResponse,
        hearth_service::dto::UserDto,
        hearth_service::dto::DataSource,
        hearth_service::dto::PropertyListResponse,
        hearth_service::dto::PropertyResponse,
        hearth_service::dto::CreatePropertyRequest,
        hearth_service::dto::UpdatePropertyRequest,
        hearth_service::dto::RecommendRequest,
        hearth_service::dto::RecommendationDto,
        health_controller::HealthResponse,
        hearth_core::ErrorResponse,
        hearth_core::FieldError,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "properties", description = "Property listings"),
        (name = "users", description = "Favorites and recommendations"),
        (name = "health", description = "Health checks"),
    )
)]
pub struct ApiDoc;

/// Adds the bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
