//! Email delivery
//!
//! [`MailSender`] is the transport seam: SMTP in production, a logging sender for local
//! development and recording doubles in tests. [`Notifier`] builds the two product emails
//! on top of it.

mod log_sender;
mod notifier;
mod smtp;
pub mod templates;

pub use log_sender::LogMailSender;
pub use notifier::Notifier;
pub use smtp::SmtpMailSender;

use std::sync::Arc;

use async_trait::async_trait;
use docsign_core::{MailConfig, MailTransportKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Sender or recipient is not a valid mailbox.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// The message could not be assembled.
    #[error("Failed to build email: {0}")]
    Message(String),

    /// The transport rejected or failed to deliver the message.
    #[error("Email transport failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A fully rendered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub attachments: Vec<MailAttachment>,
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), NotifyError>;
}

/// Domain part of an address, for logs that must not carry the full recipient.
pub fn recipient_domain(address: &str) -> &str {
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .unwrap_or("unknown")
}

/// Build the sender selected by `MAIL_TRANSPORT`.
pub fn create_mail_sender(config: &MailConfig) -> Result<Arc<dyn MailSender>, NotifyError> {
    match config.transport {
        MailTransportKind::Smtp => Ok(Arc::new(SmtpMailSender::from_config(config)?)),
        MailTransportKind::Log => {
            tracing::warn!("MAIL_TRANSPORT=log: emails are logged, not delivered");
            Ok(Arc::new(LogMailSender))
        }
    }
}
