use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use docsign_core::messages;
use docsign_core::models::{SignRequest, SignResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/sign",
    tag = "signing",
    request_body = SignRequest,
    responses(
        (status = 200, description = "Document signed", body = SignResponse),
        (status = 400, description = "Missing id or name", body = ErrorResponse),
        (status = 404, description = "Unknown submission", body = ErrorResponse),
        (status = 500, description = "Signing failed, or the signed copy was not emailed (`downloadUrl` is kept)", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "sign_document"))]
pub async fn sign_document(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SignRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let signed = state
        .signing
        .sign(request.id.as_deref(), request.name.as_deref())
        .await?;

    Ok(Json(SignResponse {
        message: messages::SIGN_SUCCESS.to_string(),
        download_url: signed.download_url,
    }))
}
