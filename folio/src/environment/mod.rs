use anyhow::Context;
use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_blog_impl::BlogFeatureConfig;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_revalidate_impl::RevalidateFeatureConfig;
use folio_di::provider;
use folio_email_impl::EmailServiceConfig;
use folio_extern_impl::{
    cdn::CdnApiServiceConfig, content::ContentApiServiceConfig, email::EmailApiServiceConfig,
};
use folio_models::{cdn::DistributionId, Sensitive};
use folio_shared_impl::secret::SecretStoreServiceConfig;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Extern
            EmailApiServiceConfig,
            CdnApiServiceConfig,
            ContentApiServiceConfig,

            // Shared
            SecretStoreServiceConfig,

            // Email
            EmailServiceConfig,

            // Core
            ContactFeatureConfig,
            RevalidateFeatureConfig,
            BlogFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider) -> Self {
        Self {
            _cache: Default::default(),
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Extern
        email_api_service_config: EmailApiServiceConfig,
        cdn_api_service_config: CdnApiServiceConfig,
        content_api_service_config: ContentApiServiceConfig,

        // Shared
        secret_store_service_config: SecretStoreServiceConfig,

        // Email
        email_service_config: EmailServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
        revalidate_feature_config: RevalidateFeatureConfig,
        blog_feature_config: BlogFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            host: config.http.host,
            port: config.http.port,
        };

        // Extern
        let request_timeout = config.extern_.request_timeout.into();

        let email_api_service_config = EmailApiServiceConfig {
            api_url: config.email.api_url.clone().into(),
            request_timeout,
        };

        let cdn_api_service_config = CdnApiServiceConfig {
            region: config.cdn.region.as_str().into(),
            endpoint_override: config.cdn.endpoint_override.clone().map(Into::into),
            request_timeout,
        };

        let content_api_service_config = ContentApiServiceConfig {
            url: config.content.url.clone().into(),
            token: config
                .content
                .token
                .as_deref()
                .filter(|token| !token.is_empty())
                .map(|token| Sensitive(token.into())),
            request_timeout,
        };

        // Shared
        let secret_store_service_config = SecretStoreServiceConfig::new(
            config.secrets.linked_resource_prefix.as_str(),
            config.secrets.env.clone(),
            config.secrets.values.clone(),
        );

        // Email
        let email_service_config = EmailServiceConfig {
            from: config.email.from.clone().into(),
            api_key_secret: config.email.api_key_secret.as_str().into(),
        };

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().into(),
            subject: config.contact.subject.as_str().into(),
        };

        let revalidate_feature_config = RevalidateFeatureConfig {
            distribution_id: config
                .cdn
                .distribution_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .map(DistributionId::try_new)
                .transpose()
                .context("Invalid CDN distribution id")?,
        };

        let blog_feature_config = BlogFeatureConfig {
            render_ttl: config.content.render_ttl.into(),
        };

        Ok(Self {
            _cache: Default::default(),

            // API
            rest_server_config,

            // Extern
            email_api_service_config,
            cdn_api_service_config,
            content_api_service_config,

            // Shared
            secret_store_service_config,

            // Email
            email_service_config,

            // Core
            contact_feature_config,
            revalidate_feature_config,
            blog_feature_config,
        })
    }

    /// Whether a usable CDN distribution id is configured.
    pub fn revalidation_enabled(&self) -> bool {
        self.revalidate_feature_config.distribution_id.is_some()
    }
}
