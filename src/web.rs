use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

use crate::api;
use crate::config::ServerConfig;
use crate::service::RegionCostService;

/// Estimate requests are small JSON documents
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application: API under `/api`, static files everywhere else
pub fn app(service: Arc<RegionCostService>, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors);

    Router::new()
        .nest("/api", api::router(service))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware)
}

pub async fn run(config: &ServerConfig, service: Arc<RegionCostService>) -> Result<()> {
    let app = app(service, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Web server running at http://localhost:{}", config.port);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
