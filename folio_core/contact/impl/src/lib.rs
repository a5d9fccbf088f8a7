use std::sync::Arc;

use folio_core_contact_contracts::{ContactService, ContactSubmitError};
use folio_di::Build;
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use folio_templates_contracts::{
    ContactMessageTemplate, ContactMessageTextTemplate, TemplateService,
};
use folio_utils::trace_instrument;
use tracing::{debug, warn};

#[derive(Debug, Clone, Build)]
pub struct ContactServiceImpl<Email, Template> {
    email: Email,
    template: Template,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Mailbox receiving the contact form notifications.
    pub recipient: Arc<EmailAddressWithName>,
    pub subject: Arc<str>,
}

impl<EmailS, TemplateS> ContactService for ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    #[trace_instrument(skip(self, submission))]
    async fn submit(&self, submission: ContactSubmission) -> Result<(), ContactSubmitError> {
        let message = submission.validate().inspect_err(|err| {
            debug!(fields = ?err.0, "Rejecting invalid contact submission");
        })?;

        let reply_to = message.email.to_email_address();

        let html_template = ContactMessageTemplate {
            name: message.name.into_inner(),
            email: message.email.into_inner(),
            message: message.message.into_inner(),
        };
        let html = self.template.render(&html_template)?;
        let text = self
            .template
            .render(&ContactMessageTextTemplate::from(html_template))?;

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: self.config.subject.to_string(),
            html,
            text,
            reply_to,
        };

        self.email.send(email).await.map_err(|err| match err {
            EmailSendError::NotConfigured => ContactSubmitError::NotConfigured,
            EmailSendError::Rejected => ContactSubmitError::Send,
            EmailSendError::Other(err) => {
                warn!("Failed to reach email provider: {err:#}");
                ContactSubmitError::Send
            }
        })
    }
}
