//! AgentDesk provisioning service
//!
//! A single stateless endpoint that provisions a support-agent account:
//! it creates an auth identity on the backend platform, then registers
//! two directory rows describing that identity. Cross-origin requests
//! are permitted from any origin so the admin panel can call it
//! directly.

pub mod config;
pub mod platform;
pub mod provision;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::platform::AuthPlatform;

/// Shared service state.
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn AuthPlatform>,
}

/// Build the service router.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-client-info"),
            header::HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route("/", post(provision::create_support_agent))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
