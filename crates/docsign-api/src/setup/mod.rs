//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use docsign_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;
    crate::error::configure_error_details(config.is_production());

    tracing::info!(
        environment = %config.server.environment,
        "Configuration loaded and validated successfully"
    );

    // Storage, metadata repository, stamper and mail sender
    let state = services::initialize_services(&config).await?;

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
