use anyhow::Context;
use clap::Subcommand;
use folio_config::Config;
use folio_di::Provide;
use folio_email_contracts::{Email, EmailService};
use folio_models::email_address::EmailAddressWithName;

use crate::environment::{types::Email as EmailServiceImpl, ConfigProvider, Provider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider);
    let email_service: EmailServiceImpl = provider.provide();

    email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            html: "<p>Email deliverability seems to be working!</p>".into(),
            text: "Email deliverability seems to be working!".into(),
            reply_to: None,
        })
        .await
        .context("Failed to send email")
}
