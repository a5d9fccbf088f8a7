use std::future::Future;

use folio_models::cdn::{DistributionId, InvalidationRecord, InvalidationRequest};

/// Client of the CDN control plane.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait CdnApiService: Send + Sync + 'static {
    /// Ask the CDN to evict cached objects matching the request's path
    /// patterns from the given distribution.
    fn create_invalidation(
        &self,
        distribution_id: DistributionId,
        request: InvalidationRequest,
    ) -> impl Future<Output = anyhow::Result<InvalidationRecord>> + Send;
}

#[cfg(feature = "mock")]
impl MockCdnApiService {
    pub fn with_create_invalidation(
        mut self,
        distribution_id: DistributionId,
        request: InvalidationRequest,
        result: InvalidationRecord,
    ) -> Self {
        self.expect_create_invalidation()
            .once()
            .with(
                mockall::predicate::eq(distribution_id),
                mockall::predicate::eq(request),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_create_invalidation_error(
        mut self,
        distribution_id: DistributionId,
        request: InvalidationRequest,
    ) -> Self {
        self.expect_create_invalidation()
            .once()
            .with(
                mockall::predicate::eq(distribution_id),
                mockall::predicate::eq(request),
            )
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "AccessDenied: User is not authorized to perform cloudfront:CreateInvalidation"
                ))))
            });
        self
    }
}
