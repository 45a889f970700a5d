//! Shared application state for handlers.

use hearth_service::{AuthService, PropertyService, UserService};
use std::sync::Arc;

/// Application state holding the service layer.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub property_service: Arc<dyn PropertyService>,
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        property_service: Arc<dyn PropertyService>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        Self {
            auth_service,
            property_service,
            user_service,
        }
    }
}
