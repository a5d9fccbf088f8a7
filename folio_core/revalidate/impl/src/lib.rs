use folio_cache_contracts::CacheService;
use folio_core_revalidate_contracts::{RevalidateError, RevalidateService};
use folio_di::Build;
use folio_extern_contracts::cdn::CdnApiService;
use folio_models::{
    cdn::{CallerReference, DistributionId, InvalidationRecord, InvalidationRequest},
    render::RenderPath,
};
use folio_shared_contracts::{id::IdService, time::TimeService};
use folio_utils::trace_instrument;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Build)]
pub struct RevalidateServiceImpl<Time, Id, Cdn, Cache> {
    time: Time,
    id: Id,
    cdn: Cdn,
    cache: Cache,
    config: RevalidateFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct RevalidateFeatureConfig {
    /// Distribution serving the site. Revalidation is refused while unset.
    pub distribution_id: Option<DistributionId>,
}

impl<Time, Id, Cdn, Cache> RevalidateService for RevalidateServiceImpl<Time, Id, Cdn, Cache>
where
    Time: TimeService,
    Id: IdService,
    Cdn: CdnApiService,
    Cache: CacheService,
{
    #[trace_instrument(skip(self))]
    async fn revalidate(&self) -> Result<InvalidationRecord, RevalidateError> {
        let Some(distribution_id) = self.config.distribution_id.clone() else {
            error!("Cannot revalidate: no CDN distribution id configured");
            return Err(RevalidateError::NotConfigured);
        };

        let caller_reference = CallerReference::new(self.time.now(), self.id.generate::<Uuid>());
        let request = InvalidationRequest::blog(caller_reference);

        let record = self
            .cdn
            .create_invalidation(distribution_id, request)
            .await
            .map_err(|err| {
                error!("CDN invalidation failed: {err:#}");
                RevalidateError::Cdn(err)
            })?;

        info!(id = %record.id, status = %record.status, "CDN invalidation submitted");

        // the edge is already invalidated at this point
        // the listing key prefixes every post key as well
        let cache_prefix = RenderPath::blog_listing().cache_key();
        if let Err(err) = self.cache.remove_prefix(&cache_prefix).await {
            warn!(%cache_prefix, "Failed to drop rendered blog pages from cache: {err:#}");
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use folio_cache_contracts::MockCacheService;
    use folio_cache_memory::MemoryCache;
    use folio_extern_contracts::cdn::MockCdnApiService;
    use folio_models::cdn::{InvalidationId, InvalidationStatus};
    use folio_shared_contracts::{id::MockIdService, time::MockTimeService};
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    const NOW_MILLIS: i64 = 1_717_329_600_000;
    const ID: Uuid = Uuid::from_u128(0x5e1e_c7ed_0000_4000_8000_0000_0000_0001);

    #[tokio::test]
    async fn ok() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let id = MockIdService::new().with_generate(ID);
        let cdn = MockCdnApiService::new().with_create_invalidation(
            distribution_id(),
            expected_request(),
            record("INV123", InvalidationStatus::InProgress),
        );
        let cache = MockCacheService::new().with_remove_prefix("render:/blog".into());

        let sut = make_sut(time, id, cdn, cache, Some(distribution_id()));

        // Act
        let result = sut.revalidate().await;

        // Assert
        assert_eq!(
            result.unwrap(),
            record("INV123", InvalidationStatus::InProgress)
        );
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let sut = make_sut(
            MockTimeService::new(),
            MockIdService::new(),
            MockCdnApiService::new(),
            MockCacheService::new(),
            None,
        );

        // Act
        let result = sut.revalidate().await;

        // Assert
        assert_matches!(result, Err(RevalidateError::NotConfigured));
    }

    #[tokio::test]
    async fn cdn_error() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let id = MockIdService::new().with_generate(ID);
        let cdn = MockCdnApiService::new()
            .with_create_invalidation_error(distribution_id(), expected_request());

        let sut = make_sut(time, id, cdn, MockCacheService::new(), Some(distribution_id()));

        // Act
        let result = sut.revalidate().await;

        // Assert
        assert_matches!(result, Err(RevalidateError::Cdn(_)));
    }

    #[tokio::test]
    async fn cache_error_is_ignored() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let id = MockIdService::new().with_generate(ID);
        let cdn = MockCdnApiService::new().with_create_invalidation(
            distribution_id(),
            expected_request(),
            record("INV123", InvalidationStatus::Completed),
        );
        let cache = MockCacheService::new().with_remove_prefix_error("render:/blog".into());

        let sut = make_sut(time, id, cdn, cache, Some(distribution_id()));

        // Act
        let result = sut.revalidate().await;

        // Assert
        assert_eq!(
            result.unwrap(),
            record("INV123", InvalidationStatus::Completed)
        );
    }

    #[tokio::test]
    async fn rendered_posts_are_dropped() {
        // Arrange
        let time = MockTimeService::new().with_now(now());
        let id = MockIdService::new().with_generate(ID);
        let cdn = MockCdnApiService::new().with_create_invalidation(
            distribution_id(),
            expected_request(),
            record("INV123", InvalidationStatus::InProgress),
        );
        let cache = MemoryCache::new();
        cache.set("render:/blog", &"listing", None).await.unwrap();
        cache.set("render:/blog/hello", &"post", None).await.unwrap();

        let sut = RevalidateServiceImpl {
            time,
            id,
            cdn,
            cache: cache.clone(),
            config: RevalidateFeatureConfig {
                distribution_id: Some(distribution_id()),
            },
        };

        // Act
        sut.revalidate().await.unwrap();

        // Assert
        assert_eq!(cache.get::<String>("render:/blog").await.unwrap(), None);
        assert_eq!(cache.get::<String>("render:/blog/hello").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn caller_reference_is_unique_per_call() {
        // Arrange
        let time = MockTimeService::new().with_frozen_now(now(), 2);
        let id = MockIdService::new()
            .with_generate_sequence(vec![Uuid::from_u128(1), Uuid::from_u128(2)]);

        let mut cdn = MockCdnApiService::new();
        let (tx, rx) = std::sync::mpsc::channel();
        cdn.expect_create_invalidation()
            .times(2)
            .returning(move |_, request| {
                tx.send(request.caller_reference().clone()).unwrap();
                Box::pin(std::future::ready(Ok(record(
                    "INV123",
                    InvalidationStatus::InProgress,
                ))))
            });

        let mut cache = MockCacheService::new();
        cache
            .expect_remove_prefix()
            .times(2)
            .returning(|_| Box::pin(std::future::ready(Ok(()))));

        let sut = make_sut(time, id, cdn, cache, Some(distribution_id()));

        // Act
        sut.revalidate().await.unwrap();
        sut.revalidate().await.unwrap();

        // Assert
        let first = rx.recv().unwrap();
        let second = rx.recv().unwrap();
        assert_ne!(first, second);
    }

    fn make_sut(
        time: MockTimeService,
        id: MockIdService,
        cdn: MockCdnApiService,
        cache: MockCacheService,
        distribution_id: Option<DistributionId>,
    ) -> RevalidateServiceImpl<MockTimeService, MockIdService, MockCdnApiService, MockCacheService>
    {
        RevalidateServiceImpl {
            time,
            id,
            cdn,
            cache,
            config: RevalidateFeatureConfig { distribution_id },
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.timestamp_millis_opt(NOW_MILLIS).unwrap()
    }

    fn distribution_id() -> DistributionId {
        DistributionId::try_new("E2QWRUHAPOMQZL").unwrap()
    }

    fn expected_request() -> InvalidationRequest {
        InvalidationRequest::blog(CallerReference::new(now(), ID))
    }

    fn record(id: &str, status: InvalidationStatus) -> InvalidationRecord {
        InvalidationRecord {
            id: InvalidationId::try_new(id).unwrap(),
            status,
            paths: vec!["/blog/*".into()],
        }
    }
}
