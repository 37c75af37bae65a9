//! Docsign Services Library
//!
//! Outbound integrations used by the API. Currently only email delivery.

pub mod email;

pub use email::{
    create_mail_sender, LogMailSender, MailAttachment, MailSender, Notifier, NotifyError,
    OutgoingMail, SmtpMailSender,
};
