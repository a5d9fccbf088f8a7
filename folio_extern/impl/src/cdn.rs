use std::{sync::Arc, time::Duration};

use anyhow::Context;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_cloudfront::{
    config::Region,
    error::DisplayErrorContext,
    types::{InvalidationBatch, Paths},
    Client,
};
use folio_di::Build;
use folio_extern_contracts::cdn::CdnApiService;
use folio_models::cdn::{
    DistributionId, InvalidationId, InvalidationRecord, InvalidationRequest, InvalidationStatus,
};
use folio_utils::trace_instrument;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, Build)]
pub struct CdnApiServiceImpl {
    config: CdnApiServiceConfig,
    #[state]
    client: Arc<OnceCell<Client>>,
}

#[derive(Debug, Clone)]
pub struct CdnApiServiceConfig {
    pub region: Arc<str>,
    /// Send requests here instead of the regional AWS endpoint.
    pub endpoint_override: Option<Arc<Url>>,
    pub request_timeout: Duration,
}

impl CdnApiServiceImpl {
    /// The SDK client, created on first use and shared by all clones of this
    /// service. Credentials come from the default provider chain.
    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                debug!(region = %self.config.region, "Initializing CloudFront client");

                let timeout_config = TimeoutConfig::builder()
                    .operation_timeout(self.config.request_timeout)
                    .build();

                let mut loader = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.config.region.to_string()))
                    .timeout_config(timeout_config);
                if let Some(endpoint) = &self.config.endpoint_override {
                    loader = loader.endpoint_url(endpoint.as_str().trim_end_matches('/'));
                }

                Client::new(&loader.load().await)
            })
            .await
    }
}

impl CdnApiService for CdnApiServiceImpl {
    #[trace_instrument(skip(self))]
    async fn create_invalidation(
        &self,
        distribution_id: DistributionId,
        request: InvalidationRequest,
    ) -> anyhow::Result<InvalidationRecord> {
        let paths = Paths::builder()
            .quantity(request.paths().len().try_into()?)
            .set_items(Some(request.paths().to_vec()))
            .build()
            .context("Failed to build invalidation paths")?;

        let batch = InvalidationBatch::builder()
            .caller_reference(request.caller_reference().as_str())
            .paths(paths)
            .build()
            .context("Failed to build invalidation batch")?;

        let output = self
            .client()
            .await
            .create_invalidation()
            .distribution_id(distribution_id.into_inner())
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{}", DisplayErrorContext(err)))
            .context("Failed to create CloudFront invalidation")?;

        let invalidation = output
            .invalidation()
            .context("CloudFront response did not contain an invalidation")?;

        let id = InvalidationId::try_new(invalidation.id())
            .context("CloudFront returned an empty invalidation id")?;

        let status = invalidation
            .status()
            .parse::<InvalidationStatus>()
            .unwrap_or_else(|err| {
                warn!(%err, "Treating unknown invalidation status as in progress");
                InvalidationStatus::InProgress
            });

        Ok(InvalidationRecord {
            id,
            status,
            paths: request.into_paths(),
        })
    }
}
