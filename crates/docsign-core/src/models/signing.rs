use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of `POST /sign`.
///
/// Both fields are optional at the serde level so that a missing field is reported as
/// `INVALID_REQUEST` by the service instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignRequest {
    /// Submission id from the signing link.
    #[serde(default)]
    pub id: Option<String>,
    /// Signer's full name, drawn into the stamp.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignResponse {
    pub message: String,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResendResponse {
    pub message: String,
    pub id: Uuid,
}
