//! API constants

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

/// Path of the RapiDoc UI.
pub const DOCS_PATH: &str = "/docs";

/// Multipart framing allowance on top of the configured upload size.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Timeout applied to each dependency probe in the health endpoints.
pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
