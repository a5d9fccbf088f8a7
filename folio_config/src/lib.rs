use std::{collections::HashMap, net::IpAddr, path::Path};

use anyhow::Context;
use config::{Environment, File, FileFormat};
pub use duration::Duration;
use folio_models::email_address::EmailAddressWithName;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

/// Region used when neither the config nor `AWS_REGION` specify one.
pub const DEFAULT_CDN_REGION: &str = "us-east-1";

/// Load the config files listed in `FOLIO_CONFIG` (or the bundled default
/// config) and apply `FOLIO__*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|paths| !paths.is_empty());
    let paths = match &paths {
        Some(paths) => paths.split(':').map(Path::new).collect::<Vec<_>>(),
        None => vec![Path::new(DEFAULT_CONFIG_PATH)],
    };
    load_with_overrides(&paths, &[])
}

/// Like [`load`] with explicit config files, followed by inline TOML
/// snippets which take precedence over everything else.
///
/// `AWS_REGION` and `CLOUDFRONT_DISTRIBUTION_ID` act as defaults for the
/// `cdn` section.
pub fn load_with_overrides(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let region = std::env::var("AWS_REGION")
        .ok()
        .filter(|region| !region.is_empty())
        .unwrap_or_else(|| DEFAULT_CDN_REGION.into());
    let mut builder = config::Config::builder().set_default("cdn.region", region)?;
    if let Some(distribution_id) = std::env::var("CLOUDFRONT_DISTRIBUTION_ID")
        .ok()
        .filter(|id| !id.is_empty())
    {
        builder = builder.set_default("cdn.distribution_id", distribution_id)?;
    }

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let builder = builder.add_source(
        Environment::with_prefix("FOLIO")
            .prefix_separator("__")
            .separator("__"),
    );

    overrides
        .iter()
        .fold(builder, |builder, &snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    #[serde(rename = "extern")]
    pub extern_: ExternConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub cdn: CdnConfig,
    pub content: ContentConfig,
    pub secrets: SecretsConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct ExternConfig {
    /// Timeout of a single request to a third party API.
    pub request_timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub api_url: Url,
    pub from: EmailAddressWithName,
    /// Name of the secret holding the provider's API key.
    pub api_key_secret: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
    pub subject: String,
}

#[derive(Debug, Deserialize)]
pub struct CdnConfig {
    /// Revalidation is disabled while this is unset.
    pub distribution_id: Option<String>,
    pub region: String,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ContentConfig {
    pub url: Url,
    pub token: Option<String>,
    pub render_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SecretsConfig {
    pub linked_resource_prefix: String,
    /// Secret name -> environment variable to fall back to.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Secret name -> value. Meant for local development only.
    #[serde(default)]
    pub values: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}
