use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use docsign_core::messages;
use docsign_core::models::ResendResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/submissions/{id}/resend",
    tag = "submissions",
    params(
        ("id" = String, Path, description = "Submission ID")
    ),
    responses(
        (status = 200, description = "Signing link sent again", body = ResendResponse),
        (status = 404, description = "Unknown submission", body = ErrorResponse),
        (status = 500, description = "Signing link could not be sent", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "resend_signing_link"))]
pub async fn resend_signing_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let receipt = state.submissions.resend_link(&id).await?;

    Ok(Json(ResendResponse {
        message: messages::RESEND_SUCCESS.to_string(),
        id: receipt.id,
    }))
}
