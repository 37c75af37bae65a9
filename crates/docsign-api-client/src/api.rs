//! Workflow methods for the Docsign API client.

use crate::ApiClient;
use anyhow::{Context, Result};
use docsign_core::models::{ResendResponse, SignRequest, SignResponse, UploadResponse};
use std::path::Path;

impl ApiClient {
    /// Upload a local document and have the signing link emailed to `email`.
    pub async fn upload(&self, file_path: &Path, email: &str) -> Result<UploadResponse> {
        let data = read_document(file_path)?;

        let filename = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename)
            .mime_str("application/pdf")
            .context("Invalid content type")?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("email", email.to_string());

        self.post_multipart("/upload", form).await
    }

    /// Sign the submission `id` as `name`.
    pub async fn sign(&self, id: &str, name: &str) -> Result<SignResponse> {
        let request = SignRequest {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
        };
        self.post_json("/sign", &request).await
    }

    /// Send the signing link for `id` again.
    pub async fn resend(&self, id: &str) -> Result<ResendResponse> {
        self.post_empty(&format!("/submissions/{}/resend", id))
            .await
    }

    /// Fetch a document by its download URL.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        self.get_bytes(url).await
    }
}

fn read_document(path: &Path) -> Result<Vec<u8>> {
    if path
        .components()
        .any(|c| c == std::path::Component::ParentDir)
    {
        return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
    }
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
}
