use std::future::Future;

use folio_models::cdn::InvalidationRecord;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RevalidateService: Send + Sync + 'static {
    /// Invalidate every cached blog page, both at the CDN edge and in the
    /// local render cache.
    ///
    /// Callers should treat an invalidation as submitted, not completed.
    fn revalidate(
        &self,
    ) -> impl Future<Output = Result<InvalidationRecord, RevalidateError>> + Send;
}

#[derive(Debug, Error)]
pub enum RevalidateError {
    #[error("No CDN distribution is configured.")]
    NotConfigured,
    #[error("CDN invalidation failed")]
    Cdn(#[source] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockRevalidateService {
    pub fn with_revalidate(mut self, result: Result<InvalidationRecord, RevalidateError>) -> Self {
        self.expect_revalidate()
            .once()
            .with()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }
}
