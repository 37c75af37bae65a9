//! Health check handlers and response types.

use crate::constants::HEALTH_CHECK_TIMEOUT_SECS;
use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub storage: String,
    pub signature_font: String,
    pub version: &'static str,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the blob store accepts writes.
pub async fn readiness_check(state: Arc<AppState>) -> impl IntoResponse {
    let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);

    let storage = state.storage.clone();
    let storage_status = run_check(
        timeout,
        async move { storage.health_check().await },
        "not_ready",
    )
    .await;

    let ready = storage_status == "healthy";
    if !ready {
        tracing::error!(storage = %storage_status, "Storage readiness check failed");
    }

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "storage": if ready { "ready".to_string() } else { storage_status },
        })),
    )
}

/// Full health check: storage probe plus the signature font on disk.
pub async fn health_check(state: Arc<AppState>) -> impl IntoResponse {
    let timeout = Duration::from_secs(HEALTH_CHECK_TIMEOUT_SECS);

    let storage = state.storage.clone();
    let storage_status = run_check(
        timeout,
        async move { storage.health_check().await },
        "unhealthy",
    )
    .await;

    let font_path = state.config.signing.font_path.clone();
    let font_status = match tokio::fs::metadata(&font_path).await {
        Ok(meta) if meta.is_file() => "healthy".to_string(),
        Ok(_) => "unhealthy: not a file".to_string(),
        Err(e) => format!("unhealthy: {}", e),
    };

    let healthy = storage_status == "healthy" && font_status == "healthy";
    let response = HealthCheckResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage: storage_status,
        signature_font: font_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
