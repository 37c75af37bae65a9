//! Download, form and health route integration tests.
//!
//! Run with: `cargo test -p docsign-api --test files_test`

mod helpers;

use docsign_storage::keys::signed_key;
use helpers::fixtures::create_test_pdf;
use helpers::{pdf, setup_test_app, setup_test_app_with, RecordingMailSender};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_download_signed_document() {
    let app = setup_test_app().await;
    let id = app.upload("contract.pdf", create_test_pdf(1)).await;

    let response = app
        .client()
        .post("/sign")
        .json(&json!({ "id": id, "name": "Dana Levi" }))
        .await;
    let body: serde_json::Value = response.json();
    let download_url = body["downloadUrl"].as_str().unwrap();
    let path = download_url
        .strip_prefix(helpers::SERVER_URL)
        .expect("download url on this server");

    let response = app.client().get(path).await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/pdf");
    assert!(response
        .header("content-disposition")
        .to_str()
        .unwrap()
        .starts_with("inline"));

    let bytes = response.as_bytes().to_vec();
    let doc = pdf::load(&bytes);
    let last = *pdf::page_ids(&doc).last().unwrap();
    assert_eq!(
        pdf::stamped_text(&doc, last).unwrap().text,
        "חתימה: Dana Levi"
    );
}

#[tokio::test]
async fn test_download_original_upload() {
    let app = setup_test_app().await;
    let original = create_test_pdf(2);
    let id = app.upload("contract.pdf", original.clone()).await;

    let response = app.client().get(&format!("/uploads/{}.pdf", id)).await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().to_vec(), original);
}

#[tokio::test]
async fn test_download_missing_file_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&format!("/uploads/{}", signed_key(Uuid::new_v4())))
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_submission_records_are_not_served() {
    let app = setup_test_app().await;
    let id = app.upload("contract.pdf", create_test_pdf(1)).await;

    let response = app
        .client()
        .get(&format!("/uploads/submissions%2F{}.json", id))
        .await;
    response.assert_status_not_found();

    let response = app.client().get("/uploads/.hidden").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_forms_are_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("/upload"));

    let response = app.client().get(&format!("/sign/{}", Uuid::new_v4())).await;
    response.assert_status_ok();
    assert!(response.text().contains("/sign"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = setup_test_app().await;

    let response = app.client().get("/live").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "alive" }));

    let response = app.client().get("/ready").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");

    let response = app.client().get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "healthy");
    assert_eq!(body["signature_font"], "healthy");
}

#[tokio::test]
async fn test_health_reports_missing_font() {
    let app = setup_test_app_with(
        RecordingMailSender::default(),
        &[("SIGNATURE_FONT_PATH", "/nonexistent/font.ttf")],
    )
    .await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_workflow_routes() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let paths = body["paths"].as_object().unwrap();
    for path in ["/upload", "/sign", "/submissions/{id}/resend", "/uploads/{filename}"] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/live")
        .add_header("x-request-id", "test-request-1")
        .await;

    assert_eq!(response.header("x-request-id"), "test-request-1");
}
