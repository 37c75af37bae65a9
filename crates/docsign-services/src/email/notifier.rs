use std::sync::Arc;

use super::templates;
use super::{recipient_domain, MailAttachment, MailSender, NotifyError, OutgoingMail};

/// Composes and sends the workflow emails.
#[derive(Clone)]
pub struct Notifier {
    sender: Arc<dyn MailSender>,
}

impl Notifier {
    pub fn new(sender: Arc<dyn MailSender>) -> Self {
        Self { sender }
    }

    /// Email the signing link for a freshly uploaded document.
    pub async fn send_signing_link(&self, to: &str, link: &str) -> Result<(), NotifyError> {
        let body = templates::signing_link(link);
        let mail = OutgoingMail {
            to: to.to_string(),
            subject: templates::SIGNING_LINK_SUBJECT.to_string(),
            html_body: body.html,
            text_body: body.text,
            attachments: Vec::new(),
        };

        self.sender.send(mail).await?;
        tracing::debug!(recipient_domain = %recipient_domain(to), "Signing link sent");
        Ok(())
    }

    /// Email the signed document as an attachment, with its download link in the body.
    pub async fn send_signed_copy(
        &self,
        to: &str,
        signer_name: &str,
        download_url: &str,
        file_name: &str,
        pdf: Vec<u8>,
    ) -> Result<(), NotifyError> {
        let body = templates::signed_copy(signer_name, download_url);
        let mail = OutgoingMail {
            to: to.to_string(),
            subject: templates::SIGNED_COPY_SUBJECT.to_string(),
            html_body: body.html,
            text_body: body.text,
            attachments: vec![MailAttachment {
                filename: file_name.to_string(),
                content_type: "application/pdf".to_string(),
                data: pdf,
            }],
        };

        self.sender.send(mail).await?;
        tracing::debug!(recipient_domain = %recipient_domain(to), "Signed copy sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<OutgoingMail>>,
    }

    #[async_trait]
    impl MailSender for RecordingSender {
        async fn send(&self, mail: OutgoingMail) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }

    struct FailingSender;

    #[async_trait]
    impl MailSender for FailingSender {
        async fn send(&self, _mail: OutgoingMail) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_signing_link_email() {
        let sender = Arc::new(RecordingSender::default());
        let notifier = Notifier::new(sender.clone());

        notifier
            .send_signing_link("dana@example.com", "http://localhost:3000/sign/123")
            .await
            .unwrap();

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "dana@example.com");
        assert_eq!(sent[0].subject, "חתום על המסמך שלך");
        assert!(sent[0].html_body.contains("http://localhost:3000/sign/123"));
        assert!(sent[0].attachments.is_empty());
    }

    #[tokio::test]
    async fn test_signed_copy_email_attaches_pdf() {
        let sender = Arc::new(RecordingSender::default());
        let notifier = Notifier::new(sender.clone());

        notifier
            .send_signed_copy(
                "dana@example.com",
                "Dana Levi",
                "http://localhost:5000/uploads/123_signed.pdf",
                "contract_signed.pdf",
                b"%PDF-1.5".to_vec(),
            )
            .await
            .unwrap();

        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent[0].subject, "המסמך החתום שלך");
        assert_eq!(sent[0].attachments.len(), 1);
        assert_eq!(sent[0].attachments[0].filename, "contract_signed.pdf");
        assert_eq!(sent[0].attachments[0].content_type, "application/pdf");
        assert!(sent[0].text_body.contains("Dana Levi"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let notifier = Notifier::new(Arc::new(FailingSender));

        let err = notifier
            .send_signing_link("dana@example.com", "http://localhost:3000/sign/123")
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
