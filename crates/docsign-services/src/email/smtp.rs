//! SMTP delivery via lettre.

use async_trait::async_trait;
use docsign_core::MailConfig;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use super::{recipient_domain, MailSender, NotifyError, OutgoingMail};

#[derive(Clone)]
pub struct SmtpMailSender {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl SmtpMailSender {
    /// Create the SMTP sender. The sender address must be configured.
    pub fn from_config(config: &MailConfig) -> Result<Self, NotifyError> {
        let from = config
            .smtp_from
            .as_deref()
            .ok_or_else(|| NotifyError::InvalidAddress("SMTP_FROM is not configured".to_string()))
            .and_then(parse_mailbox)?;

        let host = config.smtp_host.as_str();
        let port = config.smtp_port;
        let credentials = match (&config.smtp_user, &config.smtp_password) {
            (Some(user), Some(password)) => Some(Credentials::new(user.clone(), password.clone())),
            _ => None,
        };

        let mailer = if config.smtp_tls {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| NotifyError::Transport(e.to_string()))?
                .port(port);
            let b = match credentials {
                Some(c) => b.credentials(c),
                None => b,
            };
            tracing::info!(
                host = %host,
                port = port,
                "Email service initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = match credentials {
                Some(c) => b.credentials(c),
                None => b,
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Ok(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    fn build_message(&self, mail: OutgoingMail) -> Result<Message, NotifyError> {
        let to = parse_mailbox(&mail.to)?;

        let body = MultiPart::alternative_plain_html(mail.text_body, mail.html_body);
        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject);

        let message = if mail.attachments.is_empty() {
            builder.multipart(body)
        } else {
            let mut mixed = MultiPart::mixed().multipart(body);
            for attachment in mail.attachments {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| NotifyError::Message(e.to_string()))?;
                mixed = mixed.singlepart(
                    Attachment::new(attachment.filename).body(attachment.data, content_type),
                );
            }
            builder.multipart(mixed)
        };

        message.map_err(|e| NotifyError::Message(e.to_string()))
    }
}

/// Parse `addr` or `Name <addr>`.
///
/// Display names that lettre's parser rejects (e.g. unquoted non-ASCII) are split off by
/// hand; the address part must still be valid.
fn parse_mailbox(value: &str) -> Result<Mailbox, NotifyError> {
    if let Ok(mailbox) = value.parse::<Mailbox>() {
        return Ok(mailbox);
    }

    let invalid = || NotifyError::InvalidAddress(value.to_string());
    let (name, rest) = value.rsplit_once('<').ok_or_else(invalid)?;
    let address = rest
        .trim_end()
        .strip_suffix('>')
        .ok_or_else(invalid)?
        .trim()
        .parse::<Address>()
        .map_err(|e| NotifyError::InvalidAddress(format!("{}: {}", value, e)))?;

    let name = name.trim().trim_matches('"').trim();
    Ok(Mailbox::new(
        (!name.is_empty()).then(|| name.to_string()),
        address,
    ))
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, mail: OutgoingMail) -> Result<(), NotifyError> {
        let domain = recipient_domain(&mail.to).to_string();
        let subject = mail.subject.clone();
        let message = self.build_message(mail)?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        tracing::info!(recipient_domain = %domain, subject = %subject, "Email sent");
        Ok(())
    }
}
