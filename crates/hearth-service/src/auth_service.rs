//! Registration, login, and current-user lookups.

use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserDto};
use async_trait::async_trait;
use hearth_core::{Email, HearthError, HearthResult, User, UserId, ValidateExt};
use hearth_repository::UserRepository;
use hearth_security::{PasswordHasher, TokenProvider};
use std::sync::Arc;
use tracing::info;

/// Service for authentication operations.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new account and issues a token.
    async fn register(&self, request: RegisterRequest) -> HearthResult<AuthResponse>;

    /// Verifies credentials and issues a token.
    async fn login(&self, request: LoginRequest) -> HearthResult<AuthResponse>;

    /// Returns the account behind an authenticated request.
    async fn current_user(&self, user_id: UserId) -> HearthResult<UserDto>;
}

/// Default authentication service implementation.
pub struct AuthServiceImpl<R: UserRepository> {
    repository: Arc<R>,
    hasher: PasswordHasher,
    tokens: TokenProvider,
}

impl<R: UserRepository> AuthServiceImpl<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, hasher: PasswordHasher, tokens: TokenProvider) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    fn issue_response(&self, user: &User) -> HearthResult<AuthResponse> {
        let issued = self
            .tokens
            .generate_token(user.id, &user.name, user.email.as_str())?;

        Ok(AuthResponse {
            token: issued.token,
            token_type: issued.token_type,
            expires_at: issued.expires_at,
            user: UserDto::from(user),
        })
    }
}

#[async_trait]
impl<R: UserRepository> AuthService for AuthServiceImpl<R> {
    async fn register(&self, request: RegisterRequest) -> HearthResult<AuthResponse> {
        request.validate_request()?;

        let email = Email::new(&request.email)
            .map_err(|e| HearthError::validation(e.to_string()))?;

        if self.repository.exists_by_email(email.as_str()).await? {
            return Err(HearthError::conflict("Email is already registered"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(request.name.trim().to_string(), email, password_hash);
        let stored = self.repository.save(&user).await?;

        info!("Registered new user {}", stored.id);
        self.issue_response(&stored)
    }

    async fn login(&self, request: LoginRequest) -> HearthResult<AuthResponse> {
        request.validate_request()?;

        // Same error for unknown email and bad password so the endpoint
        // doesn't leak which accounts exist.
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or(HearthError::InvalidCredentials)?;

        if !self.hasher.verify(&request.password, &user.password_hash)? {
            return Err(HearthError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        self.issue_response(&user)
    }

    async fn current_user(&self, user_id: UserId) -> HearthResult<UserDto> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| HearthError::not_found("User", user_id))?;

        Ok(UserDto::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryUserRepository;
    use hearth_config::SecurityConfig;

    fn service() -> AuthServiceImpl<InMemoryUserRepository> {
        let config = SecurityConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            ..Default::default()
        };
        AuthServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordHasher::with_cost(1),
            TokenProvider::new(Arc::new(config)),
        )
    }

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "password123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let service = service();

        let registered = service.register(register_request()).await.unwrap();
        assert_eq!(registered.token_type, "Bearer");
        assert_eq!(registered.user.email, "jane@example.com");

        let logged_in = service
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service.register(register_request()).await.unwrap();

        let result = service.register(register_request()).await;
        assert!(matches!(result, Err(HearthError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service();
        service.register(register_request()).await.unwrap();

        let result = service
            .login(LoginRequest {
                email: "jane@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;
        assert!(matches!(result, Err(HearthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let service = service();
        let result = service
            .login(LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(HearthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_current_user() {
        let service = service();
        let registered = service.register(register_request()).await.unwrap();

        let me = service.current_user(registered.user.id).await.unwrap();
        assert_eq!(me.email, "jane@example.com");

        let missing = service.current_user(UserId::new()).await;
        assert!(matches!(missing, Err(HearthError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let service = service();
        let mut request = register_request();
        request.email = "Jane@Example.COM".to_string();

        let registered = service.register(request).await.unwrap();
        assert_eq!(registered.user.email, "jane@example.com");
    }
}
