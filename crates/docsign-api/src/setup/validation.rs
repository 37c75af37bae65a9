//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use docsign_core::{Config, MailTransportKind};

/// Validate critical configuration values
///
/// Hard errors come from [`Config::validate`]. A missing signature font is only a warning
/// here: it surfaces per request as `FONT_UNAVAILABLE`.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let font_path = &config.signing.font_path;
    if !font_path.is_file() {
        tracing::warn!(
            font_path = %font_path.display(),
            "Signature font not found - signing requests will fail until it is installed"
        );
    }

    if config.mail.transport == MailTransportKind::Log {
        if config.is_production() {
            tracing::warn!("MAIL_TRANSPORT=log in production - no email will be delivered");
        } else {
            tracing::info!("Using log mail transport - emails are written to the log only");
        }
    }

    Ok(())
}
