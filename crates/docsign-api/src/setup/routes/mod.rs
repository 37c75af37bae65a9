//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::constants::{DOCS_PATH, MULTIPART_OVERHEAD_BYTES, OPENAPI_PATH};
use crate::error::HttpAppError;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use docsign_core::{AppError, Config};
use docsign_infra::request_id_middleware;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa_rapidoc::RapiDoc;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let request_timeout_secs = config.server.request_timeout_secs.max(1);
    tracing::info!(request_timeout_secs, "Request timeout layer enabled");

    let body_limit = config
        .storage
        .max_upload_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let app = public_routes(state.clone())
        .merge(workflow_routes())
        .merge(RapiDoc::new(OPENAPI_PATH).path(DOCS_PATH))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(axum::middleware::from_fn_with_state(
            Duration::from_secs(request_timeout_secs),
            request_timeout,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

/// Upload, signing, download and the browser forms.
fn workflow_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::forms::upload_form))
        .route("/sign/{id}", get(handlers::forms::sign_form))
        .route("/upload", post(handlers::upload::upload_document))
        .route("/sign", post(handlers::sign::sign_document))
        .route(
            "/submissions/{id}/resend",
            post(handlers::resend::resend_signing_link),
        )
        .route("/uploads/{filename}", get(handlers::files::download_file))
}

/// Health probes and the OpenAPI document.
fn public_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/health",
            get({
                let state = state.clone();
                move || health::health_check(state.clone())
            }),
        )
        .route("/live", get(health::liveness_check))
        .route(
            "/ready",
            get({
                let state = state.clone();
                move || health::readiness_check(state.clone())
            }),
        )
        .route(OPENAPI_PATH, get(openapi_spec))
}

/// Abort handlers that run past `timeout` with a 408 in the usual error body.
async fn request_timeout(State(timeout): State<Duration>, req: Request, next: Next) -> Response {
    match tokio::time::timeout(timeout, next.run(req)).await {
        Ok(response) => response,
        Err(_) => HttpAppError(AppError::RequestTimeout(format!(
            "no response within {}s",
            timeout.as_secs_f64()
        )))
        .into_response(),
    }
}

async fn openapi_spec() -> impl IntoResponse {
    Json(crate::api_doc::get_openapi_spec())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let origins = &config.server.cors_origins;
    let cors = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
