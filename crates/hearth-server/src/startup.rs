//! Server startup wiring.

use deadpool_redis::Runtime;
use hearth_config::{AppConfig, RedisConfig};
use hearth_core::{HearthError, HearthResult};
use hearth_repository::mysql::{MySqlPropertyRepository, MySqlUserRepository};
use hearth_repository::DatabasePool;
use hearth_rest::middleware::AuthMiddlewareState;
use hearth_rest::AppState;
use hearth_security::{PasswordHasher, TokenProvider};
use hearth_service::cache::{CacheInterface, RedisCacheService};
use hearth_service::{AuthServiceImpl, PropertyServiceImpl, UserServiceImpl};
use std::sync::Arc;
use tracing::info;

/// Fully wired application components.
pub struct Application {
    pub router: axum::Router,
    pub db_pool: Arc<DatabasePool>,
}

/// Builds the cache service from configuration.
///
/// A disabled or unreachable Redis never prevents startup; the service
/// degrades to uncached reads.
pub fn build_cache(config: &RedisConfig) -> HearthResult<RedisCacheService> {
    if !config.enabled {
        info!("Redis cache is disabled; running without caching");
        return Ok(RedisCacheService::disabled());
    }

    let pool = deadpool_redis::Config::from_url(&config.url)
        .builder()
        .map_err(|e| HearthError::Cache(format!("Invalid Redis configuration: {}", e)))?
        .max_size(config.pool_size as usize)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| HearthError::Cache(format!("Failed to create Redis pool: {}", e)))?;

    info!("Redis cache pool created for {}", config.url);
    Ok(RedisCacheService::new(Arc::new(pool)))
}

/// Wires repositories, services, and the router from configuration.
pub async fn build_application(config: &AppConfig) -> HearthResult<Application> {
    let db_pool = Arc::new(DatabasePool::new(&config.database).await?);
    db_pool.run_migrations().await?;

    let cache: Arc<dyn CacheInterface> = Arc::new(build_cache(&config.redis)?);

    let user_repository = Arc::new(MySqlUserRepository::new(db_pool.clone()));
    let property_repository = Arc::new(MySqlPropertyRepository::new(db_pool.clone()));

    let security_config = Arc::new(config.security.clone());
    let token_provider = Arc::new(TokenProvider::new(security_config));
    let password_hasher = PasswordHasher::with_cost(config.security.password_hash_cost);

    let auth_service = Arc::new(AuthServiceImpl::new(
        user_repository.clone(),
        password_hasher,
        (*token_provider).clone(),
    ));
    let property_service = Arc::new(PropertyServiceImpl::new(
        property_repository.clone(),
        cache.clone(),
    ));
    let user_service = Arc::new(UserServiceImpl::new(user_repository, property_repository));

    let app_state = AppState::new(auth_service, property_service, user_service);
    let auth_state = AuthMiddlewareState::new(token_provider);

    let router = hearth_rest::create_router(app_state, auth_state, &config.server);

    Ok(Application { router, db_pool })
}

/// Logs server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:    http://{}", config.server.addr());
    info!("Health:      http://{}/health", config.server.addr());
    info!("Swagger UI:  http://{}/swagger-ui", config.server.addr());
    info!("Environment: {}", config.app.environment);
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_redis_builds_noop_cache() {
        let config = RedisConfig {
            enabled: false,
            ..Default::default()
        };
        let cache = build_cache(&config).unwrap();
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_enabled_redis_builds_pool_lazily() {
        // deadpool connects lazily, so pool creation succeeds without a
        // running Redis server.
        let config = RedisConfig {
            enabled: true,
            url: "redis://localhost:6399".to_string(),
            ..Default::default()
        };
        let cache = build_cache(&config).unwrap();
        assert!(cache.is_enabled());
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }
}
