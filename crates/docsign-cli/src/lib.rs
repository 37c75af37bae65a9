//! Shared helpers for the `docsign` command-line client.

use std::path::{Path, PathBuf};

/// File name to save a download under when no `--output` is given.
///
/// Uses the last URL path segment, falling back to `signed.pdf`.
pub fn default_output_path(url: &str) -> PathBuf {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let name = without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .filter(|segment| *segment != "." && *segment != "..")
        .unwrap_or("signed.pdf");
    Path::new(name).to_path_buf()
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
