//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use docsign_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docsign API",
        version = "0.1.0",
        description = "Upload a PDF, email a signing link to the recipient, and stamp the recipient's signature on the last page."
    ),
    paths(
        handlers::upload::upload_document,
        handlers::resend::resend_signing_link,
        handlers::sign::sign_document,
        handlers::files::download_file,
    ),
    components(schemas(
        models::UploadResponse,
        models::SignRequest,
        models::SignResponse,
        models::ResendResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "submissions", description = "Document upload and signing links"),
        (name = "signing", description = "Signature application"),
        (name = "files", description = "Stored and signed documents")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
