//! Frontdesk HTTP API
//!
//! The server-side surface of the dashboard, built with Axum. It serves
//! the compiled SPA bundle and exposes the trusted-boundary routes the
//! SPA cannot (or must not) perform itself.
//!
//! # Endpoints
//!
//! ## Runtime config
//! - `GET /api/config` - Public runtime configuration for the SPA
//!
//! ## Helpdesk proxy (API key injected server-side)
//! - `GET /api/helpdesk/conversations` - List conversations
//! - `GET /api/helpdesk/conversations/:id/messages` - List messages
//! - `POST /api/helpdesk/conversations/:id/messages` - Send a message
//! - `GET /api/helpdesk/contacts` - One page of contacts
//!
//! ## Reports (admin key held server-side)
//! - `GET /api/reports/usage` - Token-usage buckets for a month
//!
//! ## Assistant
//! - `POST /api/assistant/reply` - Relay a message to the automation webhook
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! Everything else falls through to the SPA bundle with an `index.html`
//! fallback for client-side routes.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Runtime config for the SPA
        .route("/config", get(routes::runtime_config::runtime_config))
        // Helpdesk proxy
        .route(
            "/helpdesk/conversations",
            get(routes::helpdesk::list_conversations),
        )
        .route(
            "/helpdesk/conversations/:id/messages",
            get(routes::helpdesk::list_messages).post(routes::helpdesk::send_message),
        )
        .route("/helpdesk/contacts", get(routes::helpdesk::list_contacts))
        // Usage reports
        .route("/reports/usage", get(routes::usage::usage_report))
        // Assistant webhook relay
        .route("/assistant/reply", post(routes::assistant::assistant_reply));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let ui_dir = state.config.server.ui_dir.clone();
    let spa = ServeDir::new(&ui_dir)
        .not_found_service(ServeFile::new(format!("{}/index.html", ui_dir)));

    let cors = cors_layer(&state.config.server.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Restrict CORS to the configured origins; an empty list means the SPA is
/// served by this process and any origin is acceptable for the API.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Frontdesk listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Frontdesk shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app(config: Config) -> Router {
        build_router(AppState::new(config))
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_runtime_config_reports_setup_required() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["setup_required"], true);
        assert_eq!(body["platform_name"], "Frontdesk");
    }

    #[tokio::test]
    async fn test_helpdesk_routes_unconfigured() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/helpdesk/conversations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_usage_rejects_malformed_month() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports/usage?month=May-2025")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_assistant_unconfigured() {
        let app = create_test_app(Config::default());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/assistant/reply")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"message": "hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
