use async_trait::async_trait;

use super::{recipient_domain, MailSender, NotifyError, OutgoingMail};

/// Logs each message instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, mail: OutgoingMail) -> Result<(), NotifyError> {
        tracing::info!(
            recipient_domain = %recipient_domain(&mail.to),
            subject = %mail.subject,
            attachments = mail.attachments.len(),
            body = %mail.text_body,
            "Email not delivered (log transport)"
        );
        Ok(())
    }
}
