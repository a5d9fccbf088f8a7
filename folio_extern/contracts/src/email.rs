use std::future::Future;

use folio_models::Sensitive;

/// Client of the transactional email provider.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailApiService: Send + Sync + 'static {
    /// Submit an email for delivery.
    ///
    /// Errors reported by the provider are returned as
    /// [`EmailApiOutcome::Rejected`], transport failures as `Err`.
    fn send_email(
        &self,
        api_key: Sensitive<String>,
        request: EmailApiRequest,
    ) -> impl Future<Output = anyhow::Result<EmailApiOutcome>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailApiRequest {
    /// Sender mailbox, e.g. `Portfolio <no-reply@example.com>`.
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailApiOutcome {
    Sent {
        id: String,
    },
    Rejected {
        status: u16,
        name: String,
        message: String,
    },
}

#[cfg(feature = "mock")]
impl MockEmailApiService {
    pub fn with_send_email(
        mut self,
        api_key: String,
        request: EmailApiRequest,
        result: EmailApiOutcome,
    ) -> Self {
        self.expect_send_email()
            .once()
            .with(
                mockall::predicate::eq(Sensitive(api_key)),
                mockall::predicate::eq(request),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_email_error(mut self, api_key: String, request: EmailApiRequest) -> Self {
        self.expect_send_email()
            .once()
            .with(
                mockall::predicate::eq(Sensitive(api_key)),
                mockall::predicate::eq(request),
            )
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection reset by peer"
                ))))
            });
        self
    }
}
