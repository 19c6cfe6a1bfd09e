pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::components::google_calendar::{CalendarProvider, TokenManager};
use handlers::{auth_handler, auth_redirect_handler, create_event_handler, health_handler};

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Credentials of the authorized session
    pub tokens: TokenManager,
    /// Identity provider and calendar API
    pub provider: Arc<dyn CalendarProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CalendarProvider>) -> Self {
        Self {
            tokens: TokenManager::new(),
            provider,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/auth", get(auth_handler))
        .route("/auth/redirect", get(auth_redirect_handler))
        .route("/create-event", get(create_event_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
