//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p docsign-api`. Every app gets its own temp
//! upload directory and an in-memory mail sender; nothing touches the network or env.

#![allow(dead_code)]

pub mod fixtures;
pub mod pdf;

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use docsign_api::setup::routes;
use docsign_api::state::AppState;
use docsign_core::Config;
use docsign_db::{StorageSubmissionRepository, SubmissionRepository};
use docsign_processing::PdfStamper;
use docsign_services::{MailSender, Notifier, NotifyError, OutgoingMail};
use docsign_storage::{LocalStorage, Storage};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const SERVER_URL: &str = "http://localhost:5000";
pub const CLIENT_URL: &str = "http://localhost:3000";
pub const RECIPIENT: &str = "a@example.com";

/// Mail sender that keeps every message, or fails every send while `failing` is set.
#[derive(Default)]
pub struct RecordingMailSender {
    sent: Mutex<Vec<OutgoingMail>>,
    failing: AtomicBool,
}

impl RecordingMailSender {
    pub fn failing() -> Self {
        let sender = Self::default();
        sender.set_failing(true);
        sender
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for RecordingMailSender {
    async fn send(&self, mail: OutgoingMail) -> Result<(), NotifyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotifyError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Test application: server plus handles on its collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<dyn Storage>,
    pub repository: Arc<dyn SubmissionRepository>,
    pub mail: Arc<RecordingMailSender>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn upload_dir(&self) -> PathBuf {
        self._temp_dir.path().to_path_buf()
    }

    /// Upload `data` as `filename` for [`RECIPIENT`] and return the submission id.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> String {
        let form = MultipartForm::new()
            .add_part(
                "file",
                Part::bytes(data)
                    .file_name(filename)
                    .mime_type("application/pdf"),
            )
            .add_text("email", RECIPIENT);

        let response = self.server.post("/upload").multipart(form).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        body["id"].as_str().expect("upload id").to_string()
    }

    /// Uploaded files in the temp directory, ignoring submission records.
    pub fn stored_blobs(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self._temp_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Path of the font shipped in the repository.
pub fn bundled_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/fonts/DejaVuSans.ttf")
}

pub fn test_config(upload_dir: &std::path::Path, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("ENVIRONMENT", "test"),
        ("CLIENT_URL", CLIENT_URL),
        ("SERVER_URL", SERVER_URL),
        ("CORS_ORIGINS", CLIENT_URL),
        ("MAIL_TRANSPORT", "log"),
        ("MAX_UPLOAD_SIZE_MB", "1"),
        ("SEND_SIGNED_COPY", "true"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    vars.insert(
        "UPLOAD_DIR".to_string(),
        upload_dir.to_string_lossy().into_owned(),
    );
    vars.insert(
        "SIGNATURE_FONT_PATH".to_string(),
        bundled_font().to_string_lossy().into_owned(),
    );
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingMailSender::default(), &[]).await
}

/// Setup test app with a custom mail sender and config overrides.
pub async fn setup_test_app_with(
    sender: RecordingMailSender,
    overrides: &[(&str, &str)],
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(temp_dir.path(), overrides);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path(), format!("{}/uploads", SERVER_URL))
            .await
            .expect("Failed to create local storage"),
    );
    let repository: Arc<dyn SubmissionRepository> =
        Arc::new(StorageSubmissionRepository::new(storage.clone()));
    let mail = Arc::new(sender);
    let notifier = Notifier::new(mail.clone());
    let transformer = Arc::new(PdfStamper::new(config.signing.font_path.clone()));

    let state = Arc::new(AppState::new(
        config.clone(),
        storage.clone(),
        repository.clone(),
        transformer,
        notifier,
    ));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        repository,
        mail,
        _temp_dir: temp_dir,
    }
}
