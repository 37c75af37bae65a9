//! Minimal browser forms for the two workflow steps.

use axum::extract::Path;
use axum::response::Html;

const UPLOAD_FORM: &str = include_str!("../../static/upload.html");
const SIGN_FORM: &str = include_str!("../../static/sign.html");

pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_FORM)
}

/// The page reads the id from its own URL, so the path segment is only matched.
pub async fn sign_form(Path(_id): Path<String>) -> Html<&'static str> {
    Html(SIGN_FORM)
}
