use std::future::Future;

use folio_models::email_address::{EmailAddress, EmailAddressWithName};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send an email from the configured sender mailbox.
    fn send(&self, email: Email) -> impl Future<Output = Result<(), EmailSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub html: String,
    /// Plain text alternative for clients without HTML support.
    pub text: String,
    pub reply_to: Option<EmailAddress>,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    #[error("The email service is not configured.")]
    NotConfigured,
    #[error("The email provider rejected the email.")]
    Rejected,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), EmailSendError>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
