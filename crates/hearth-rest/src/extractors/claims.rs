//! Extractor for authenticated user claims.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use hearth_core::{HearthError, UserId};
use hearth_security::Claims;

/// Extractor that requires a valid authenticated user.
///
/// The auth middleware validates the bearer token and stores the claims
/// in request extensions; this extractor rejects the request with 401
/// when no claims are present.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    /// Returns the caller's user ID.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0.user_id().ok_or_else(|| {
            AppError(HearthError::InvalidToken(
                "Token does not carry a user id".to_string(),
            ))
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError(HearthError::unauthorized("Authentication required")))
    }
}
