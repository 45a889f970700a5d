//! End-to-end router tests with stubbed services.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use hearth_config::{SecurityConfig, ServerConfig};
use hearth_core::{
    HearthError, HearthResult, Property, PropertyId, Recommendation, UserId,
};
use hearth_rest::middleware::AuthMiddlewareState;
use hearth_rest::{create_router, AppState};
use hearth_security::TokenProvider;
use hearth_service::dto::{
    AuthResponse, CreatePropertyRequest, DataSource, LoginRequest, PropertyListResponse,
    PropertyQuery, PropertyResponse, RecommendRequest, RecommendationDto, RegisterRequest,
    UpdatePropertyRequest, UserDto,
};
use hearth_service::{AuthService, PropertyService, UserService};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn register(&self, request: RegisterRequest) -> HearthResult<AuthResponse> {
        Ok(stub_auth_response(&request.name, &request.email))
    }

    async fn login(&self, request: LoginRequest) -> HearthResult<AuthResponse> {
        if request.password == "correct-password" {
            Ok(stub_auth_response("Jane", &request.email))
        } else {
            Err(HearthError::InvalidCredentials)
        }
    }

    async fn current_user(&self, user_id: UserId) -> HearthResult<UserDto> {
        Ok(UserDto {
            id: user_id,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            created_at: Utc::now(),
        })
    }
}

fn stub_auth_response(name: &str, email: &str) -> AuthResponse {
    AuthResponse {
        token: "stub-token".to_string(),
        token_type: "Bearer".to_string(),
        expires_at: Utc::now().timestamp() + 3600,
        user: UserDto {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        },
    }
}

struct StubPropertyService;

#[async_trait]
impl PropertyService for StubPropertyService {
    async fn list(&self, _query: PropertyQuery) -> HearthResult<PropertyListResponse> {
        Ok(PropertyListResponse {
            source: DataSource::Database,
            count: 0,
            total: 0,
            total_pages: 0,
            current_page: 1,
            data: vec![],
        })
    }

    async fn get(&self, id: PropertyId) -> HearthResult<PropertyResponse> {
        Err(HearthError::not_found("Property", id))
    }

    async fn create(
        &self,
        owner: UserId,
        request: CreatePropertyRequest,
    ) -> HearthResult<Property> {
        Ok(request.into_property("PROP1".to_string(), owner))
    }

    async fn update(
        &self,
        _caller: UserId,
        id: PropertyId,
        _request: UpdatePropertyRequest,
    ) -> HearthResult<Property> {
        Err(HearthError::not_found("Property", id))
    }

    async fn delete(&self, _caller: UserId, id: PropertyId) -> HearthResult<()> {
        Err(HearthError::not_found("Property", id))
    }
}

struct StubUserService;

#[async_trait]
impl UserService for StubUserService {
    async fn add_favorite(&self, _user_id: UserId, _property_id: PropertyId) -> HearthResult<()> {
        Ok(())
    }

    async fn remove_favorite(
        &self,
        _user_id: UserId,
        property_id: PropertyId,
    ) -> HearthResult<()> {
        Err(HearthError::not_found("Favorite", property_id))
    }

    async fn list_favorites(&self, _user_id: UserId) -> HearthResult<Vec<Property>> {
        Ok(vec![])
    }

    async fn recommend(
        &self,
        sender: UserId,
        property_id: PropertyId,
        request: RecommendRequest,
    ) -> HearthResult<Recommendation> {
        Ok(Recommendation::new(
            property_id,
            sender,
            UserId::new(),
            request.message,
        ))
    }

    async fn received_recommendations(
        &self,
        _user_id: UserId,
    ) -> HearthResult<Vec<RecommendationDto>> {
        Ok(vec![])
    }
}

fn test_provider() -> Arc<TokenProvider> {
    Arc::new(TokenProvider::new(Arc::new(SecurityConfig {
        jwt_secret: "router-test-secret".to_string(),
        ..Default::default()
    })))
}

fn test_app(provider: Arc<TokenProvider>) -> Router {
    let state = AppState::new(
        Arc::new(StubAuthService),
        Arc::new(StubPropertyService),
        Arc::new(StubUserService),
    );
    create_router(
        state,
        AuthMiddlewareState::new(provider),
        &ServerConfig::default(),
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(test_provider());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "UP");
}

#[tokio::test]
async fn test_list_properties_is_public() {
    let app = test_app(test_provider());

    let response = app
        .oneshot(
            Request::get("/api/v1/properties?city=Pune&page=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["source"], "database");
}

#[tokio::test]
async fn test_unknown_property_maps_to_404() {
    let app = test_app(test_provider());

    let response = app
        .oneshot(
            Request::get("/api/v1/properties/0191e7a0-0000-7000-8000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_property_requires_auth() {
    let app = test_app(test_provider());

    let response = app
        .oneshot(
            Request::post("/api/v1/properties")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = test_app(test_provider());

    let response = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let provider = test_provider();
    let user_id = UserId::new();
    let issued = provider
        .generate_token(user_id, "Jane", "jane@example.com")
        .unwrap();
    let app = test_app(provider);

    let response = app
        .oneshot(
            Request::get("/api/v1/auth/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", issued.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id.to_string());
}

#[tokio::test]
async fn test_create_property_with_token() {
    let provider = test_provider();
    let issued = provider
        .generate_token(UserId::new(), "Jane", "jane@example.com")
        .unwrap();
    let app = test_app(provider);

    let body = serde_json::json!({
        "title": "2BHK near the park",
        "propertyType": "Apartment",
        "price": 25000.0,
        "state": "Maharashtra",
        "city": "Pune",
        "areaSqFt": 950.0,
        "bedrooms": 2,
        "bathrooms": 2,
        "amenities": ["lift", "parking"],
        "furnishingStatus": "Semi-Furnished",
        "listedBy": "Owner",
        "tags": ["near-park"],
        "listingType": "rent"
    });

    let response = app
        .oneshot(
            Request::post("/api/v1/properties")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", issued.token))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "2BHK near the park");
    assert_eq!(json["data"]["externalId"], "PROP1");
}

#[tokio::test]
async fn test_recommend_returns_created() {
    let provider = test_provider();
    let issued = provider
        .generate_token(UserId::new(), "Jane", "jane@example.com")
        .unwrap();
    let app = test_app(provider);

    let property_id = PropertyId::new();
    let body = serde_json::json!({
        "recipientEmail": "amit@example.com",
        "message": "Worth a look"
    });

    let response = app
        .oneshot(
            Request::post(format!("/api/v1/users/recommendations/{}", property_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", issued.token))
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["propertyId"], property_id.to_string());
}
