//! Application router assembly.

use crate::controllers::{
    auth_controller, health_controller, property_controller, user_controller,
};
use crate::middleware::{auth_middleware, logging_middleware, AuthMiddlewareState};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::{middleware as axum_middleware, routing::get, Router};
use hearth_config::ServerConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assembles the full application router.
pub fn create_router(
    state: AppState,
    auth_state: AuthMiddlewareState,
    config: &ServerConfig,
) -> Router {
    let api = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/properties", property_controller::router())
        .nest("/users", user_controller::router());

    let mut router = Router::new()
        .route("/", get(root))
        .merge(health_controller::router())
        .nest("/api/v1", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(state);

    if config.cors_enabled {
        router = router.layer(cors_layer(&config.cors_origins));
    }

    router
}

async fn root() -> &'static str {
    "Hearth property service is running"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
