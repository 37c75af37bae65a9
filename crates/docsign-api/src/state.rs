//! Application state shared by every handler.

use crate::services::{SigningService, SubmissionService};
use docsign_core::Config;
use docsign_db::SubmissionRepository;
use docsign_processing::DocumentTransformer;
use docsign_services::Notifier;
use docsign_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<dyn Storage>,
    pub submissions: SubmissionService,
    pub signing: SigningService,
}

impl AppState {
    /// Wire the services from their collaborators.
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn SubmissionRepository>,
        transformer: Arc<dyn DocumentTransformer>,
        notifier: Notifier,
    ) -> Self {
        let config = Arc::new(config);
        let submissions = SubmissionService::new(
            config.clone(),
            storage.clone(),
            repository.clone(),
            notifier.clone(),
        );
        let signing = SigningService::new(
            config.clone(),
            storage.clone(),
            repository,
            transformer,
            notifier,
        );

        Self {
            config,
            storage,
            submissions,
            signing,
        }
    }
}
