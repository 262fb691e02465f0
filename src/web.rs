use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ErrorResponse;
use crate::forecast::ForecastGateway;

/// Full HTTP application: the API under `/api`, JSON 404 for everything else
pub fn app(gateway: Arc<ForecastGateway>) -> Router {
    Router::new()
        .nest("/api", api::router(gateway))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}

pub async fn run(gateway: ForecastGateway, port: u16) -> Result<()> {
    let app = app(Arc::new(gateway));

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server is running at http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
