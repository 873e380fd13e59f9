//! API Module
//!
//! HTTP API layer for the session service.

pub mod error;
pub mod health;
pub mod session;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::config::Settings;

/// Create the router with all endpoints
pub fn create_router(settings: Settings) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Session endpoints
        .route("/session", get(session::create_session))
        .route("/logout", get(session::logout))
        // Add state and middleware
        .with_state(Arc::new(settings))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::new(create_router(Settings::default())).unwrap();

        let response = server.get("/health").await;

        response.assert_status_ok();
        response.assert_text("OK");
    }
}
