//! Construction of storage, repository, stamper and notifier.

use crate::state::AppState;
use anyhow::{Context, Result};
use docsign_core::Config;
use docsign_db::create_submission_repository;
use docsign_processing::PdfStamper;
use docsign_services::{create_mail_sender, Notifier};
use docsign_storage::create_storage;
use std::sync::Arc;

pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;

    let repository = create_submission_repository(config, storage.clone())
        .await
        .context("Failed to initialize submission repository")?;

    let transformer = Arc::new(PdfStamper::new(config.signing.font_path.clone()));

    let sender = create_mail_sender(&config.mail).context("Failed to initialize mail sender")?;
    let notifier = Notifier::new(sender);

    Ok(Arc::new(AppState::new(
        config.clone(),
        storage,
        repository,
        transformer,
        notifier,
    )))
}
