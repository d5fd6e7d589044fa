//! Health check endpoint
//!
//! GET /health - status, version and database reachability

use armory_core::ArmoryStore;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tracing::warn;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check(
    Extension(store): Extension<ArmoryStore>,
) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!("Database health check failed: {}", e);
            false
        }
    };

    let (status, code) = if database_ok {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: if database_ok { "healthy" } else { "unhealthy" },
        }),
    )
}
