//! AgentDesk provisioning service entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agentdesk_api::config::ServiceConfig;
use agentdesk_api::platform::HttpPlatform;
use agentdesk_api::{build_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();
    let state = AppState {
        platform: Arc::new(HttpPlatform::new(&config)),
    };
    let app = build_router(state);

    tracing::info!("provisioning service listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}
