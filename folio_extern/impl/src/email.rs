use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use folio_di::Build;
use folio_extern_contracts::email::{EmailApiOutcome, EmailApiRequest, EmailApiService};
use folio_models::Sensitive;
use folio_utils::trace_instrument;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone, Build)]
pub struct EmailApiServiceImpl {
    config: EmailApiServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailApiServiceConfig {
    /// Base url of the provider's REST API, e.g. `https://api.resend.com/`.
    pub api_url: Arc<Url>,
    pub request_timeout: Duration,
}

impl EmailApiService for EmailApiServiceImpl {
    #[trace_instrument(skip(self, api_key, request), fields(to = ?request.to))]
    async fn send_email(
        &self,
        api_key: Sensitive<String>,
        request: EmailApiRequest,
    ) -> anyhow::Result<EmailApiOutcome> {
        let url = self
            .config
            .api_url
            .join("emails")
            .context("Failed to build send email URL")?;

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key.into_inner())
            .timeout(self.config.request_timeout)
            .json(&SendEmailRequest::from(request))
            .send()
            .await
            .context("Failed to send email api request")?;

        let status = response.status();
        if status.is_success() {
            let SendEmailResponse { id } = response
                .json()
                .await
                .context("Failed to deserialize email api response")?;
            return Ok(EmailApiOutcome::Sent { id });
        }

        match response.json::<ErrorResponse>().await {
            Ok(ErrorResponse { name, message }) => Ok(EmailApiOutcome::Rejected {
                status: status.as_u16(),
                name,
                message,
            }),
            Err(err) => {
                warn!(%status, %err, "Email api returned an unexpected error response");
                Err(anyhow!("Email api request failed with status {status}"))
            }
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Vec<String>>,
}

impl From<EmailApiRequest> for SendEmailRequest {
    fn from(value: EmailApiRequest) -> Self {
        Self {
            from: value.from,
            to: value.to,
            subject: value.subject,
            html: value.html,
            text: value.text,
            reply_to: value.reply_to.map(|reply_to| vec![reply_to]),
        }
    }
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: String,
    message: String,
}
