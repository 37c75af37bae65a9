//! HTTP client for the Docsign API.
//!
//! Generic JSON/multipart helpers plus the workflow methods in [`api`]. The CLI uses this
//! client directly.

pub mod api;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// A non-2xx response, carrying the server's `{message, code}` when present.
#[derive(Debug, thiserror::Error)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub code: Option<String>,
    /// Kept submission id on a failed signing-link email.
    pub id: Option<String>,
    /// Kept signed document on a failed signed-copy email.
    pub download_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: String,
    code: Option<String>,
    id: Option<String>,
    download_url: Option<String>,
}

impl ApiError {
    fn from_body(status: u16, text: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(text) {
            Ok(body) => Self {
                status,
                message: body.message,
                code: body.code,
                id: body.id,
                download_url: body.download_url,
            },
            Err(_) => Self {
                status,
                message: if text.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    text.trim().to_string()
                },
                code: None,
                id: None,
                download_url: None,
            },
        }
    }
}

/// HTTP client for the Docsign API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: DOCSIGN_API_URL (or API_URL), default localhost:5000.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DOCSIGN_API_URL")
            .or_else(|_| std::env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.build_url(path))
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        parse_json(response).await
    }

    /// POST without a body and deserialize response.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .post(self.build_url(path))
            .send()
            .await
            .context("Failed to send request")?;

        parse_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.build_url(path))
            .multipart(form)
            .send()
            .await
            .context("Failed to send request")?;

        parse_json(response).await
    }

    /// GET an absolute URL and return the raw body.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let response = ensure_success(response).await?;
        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        Ok(bytes.to_vec())
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(ApiError::from_body(status.as_u16(), &text).into())
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_success(response).await?;
    response
        .json()
        .await
        .context("Failed to parse response as JSON")
}

// Re-export response types for convenience.
pub use docsign_core::models::{ResendResponse, SignRequest, SignResponse, UploadResponse};
