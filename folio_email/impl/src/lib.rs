use std::sync::Arc;

use folio_di::Build;
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_extern_contracts::email::{EmailApiOutcome, EmailApiRequest, EmailApiService};
use folio_models::email_address::EmailAddressWithName;
use folio_shared_contracts::secret::SecretStoreService;
use folio_utils::trace_instrument;
use tracing::{error, info};

#[derive(Debug, Clone, Build)]
pub struct EmailServiceImpl<SecretStore, EmailApi> {
    secret_store: SecretStore,
    email_api: EmailApi,
    config: EmailServiceConfig,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub from: Arc<EmailAddressWithName>,
    /// Name of the secret holding the email provider's API key.
    pub api_key_secret: Arc<str>,
}

impl<SecretStore, EmailApi> EmailService for EmailServiceImpl<SecretStore, EmailApi>
where
    SecretStore: SecretStoreService,
    EmailApi: EmailApiService,
{
    #[trace_instrument(skip(self, email), fields(recipient = %email.recipient))]
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let Some(api_key) = self.secret_store.get(self.config.api_key_secret.to_string()) else {
            error!(secret = %self.config.api_key_secret, "Email api key is not configured");
            return Err(EmailSendError::NotConfigured);
        };

        let request = EmailApiRequest {
            from: self.config.from.to_string(),
            to: vec![email.recipient.to_string()],
            subject: email.subject,
            html: email.html,
            text: email.text,
            reply_to: email.reply_to.map(|reply_to| reply_to.to_string()),
        };

        match self.email_api.send_email(api_key, request).await? {
            EmailApiOutcome::Sent { id } => {
                info!(%id, "Email accepted by provider");
                Ok(())
            }
            EmailApiOutcome::Rejected {
                status,
                name,
                message,
            } => {
                error!(status, %name, %message, "Email provider rejected email");
                Err(EmailSendError::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_extern_contracts::email::MockEmailApiService;
    use folio_shared_contracts::secret::MockSecretStoreService;
    use folio_utils::assert_matches;

    use super::*;

    const API_KEY: &str = "re_123456789";

    #[tokio::test]
    async fn ok() {
        // Arrange
        let secret_store =
            MockSecretStoreService::new().with_get("ResendApiKey".into(), Some(API_KEY.into()));
        let email_api = MockEmailApiService::new().with_send_email(
            API_KEY.into(),
            expected_request(),
            EmailApiOutcome::Sent {
                id: "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794".into(),
            },
        );

        let sut = make_sut(secret_store, email_api);

        // Act
        let result = sut.send(email()).await;

        // Assert
        result.unwrap();
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let secret_store = MockSecretStoreService::new().with_get("ResendApiKey".into(), None);
        let email_api = MockEmailApiService::new();

        let sut = make_sut(secret_store, email_api);

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert_matches!(result, Err(EmailSendError::NotConfigured));
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let secret_store =
            MockSecretStoreService::new().with_get("ResendApiKey".into(), Some(API_KEY.into()));
        let email_api = MockEmailApiService::new().with_send_email(
            API_KEY.into(),
            expected_request(),
            EmailApiOutcome::Rejected {
                status: 422,
                name: "validation_error".into(),
                message: "Invalid `to` field.".into(),
            },
        );

        let sut = make_sut(secret_store, email_api);

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert_matches!(result, Err(EmailSendError::Rejected));
    }

    #[tokio::test]
    async fn transport_error() {
        // Arrange
        let secret_store =
            MockSecretStoreService::new().with_get("ResendApiKey".into(), Some(API_KEY.into()));
        let email_api =
            MockEmailApiService::new().with_send_email_error(API_KEY.into(), expected_request());

        let sut = make_sut(secret_store, email_api);

        // Act
        let result = sut.send(email()).await;

        // Assert
        assert_matches!(result, Err(EmailSendError::Other(_)));
    }

    fn make_sut(
        secret_store: MockSecretStoreService,
        email_api: MockEmailApiService,
    ) -> EmailServiceImpl<MockSecretStoreService, MockEmailApiService> {
        EmailServiceImpl {
            secret_store,
            email_api,
            config: EmailServiceConfig {
                from: Arc::new(
                    "Personal Portfolio Update <no-reply@example.com>"
                        .parse()
                        .unwrap(),
                ),
                api_key_secret: "ResendApiKey".into(),
            },
        }
    }

    fn email() -> Email {
        Email {
            recipient: "contact@example.com".parse().unwrap(),
            subject: "New Email from Portfolio!".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
            reply_to: Some("visitor@example.org".parse().unwrap()),
        }
    }

    fn expected_request() -> EmailApiRequest {
        EmailApiRequest {
            from: "Personal Portfolio Update <no-reply@example.com>".into(),
            to: vec!["contact@example.com".into()],
            subject: "New Email from Portfolio!".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
            reply_to: Some("visitor@example.org".into()),
        }
    }
}
