use std::time::Duration;

use chrono::Utc;
use folio_di::{provider, Provide};
use folio_extern_contracts::cdn::CdnApiService;
use folio_extern_impl::cdn::{CdnApiServiceConfig, CdnApiServiceImpl};
use folio_models::cdn::{CallerReference, DistributionId, InvalidationRequest, InvalidationStatus};
use folio_testing::cdn::{FakeCdnApi, DISTRIBUTION_ID};
use pretty_assertions::assert_eq;
use uuid::Uuid;

#[tokio::test]
async fn create_invalidation() {
    // Arrange
    let (sut, api) = make_sut().await;
    let request = InvalidationRequest::blog(caller_reference());

    // Act
    let result = sut.create_invalidation(distribution_id(DISTRIBUTION_ID), request.clone()).await;

    // Assert
    let record = result.unwrap();
    assert_eq!(record.status, InvalidationStatus::InProgress);
    assert_eq!(record.paths, ["/blog/*"]);

    let invalidations = api.invalidations().await;
    assert_eq!(invalidations.len(), 1);
    assert_eq!(*record.id, invalidations[0].id);
    assert_eq!(invalidations[0].paths, ["/blog/*"]);
    assert_eq!(
        invalidations[0].caller_reference,
        request.caller_reference().as_str()
    );
}

#[tokio::test]
async fn distinct_caller_references_create_distinct_invalidations() {
    // Arrange
    let (sut, api) = make_sut().await;

    // Act
    let first = sut
        .create_invalidation(
            distribution_id(DISTRIBUTION_ID),
            InvalidationRequest::blog(caller_reference()),
        )
        .await
        .unwrap();
    let second = sut
        .create_invalidation(
            distribution_id(DISTRIBUTION_ID),
            InvalidationRequest::blog(caller_reference()),
        )
        .await
        .unwrap();

    // Assert
    assert_ne!(first.id, second.id);
    assert_eq!(api.invalidations().await.len(), 2);
}

#[tokio::test]
async fn unknown_distribution() {
    // Arrange
    let (sut, api) = make_sut().await;

    // Act
    let result = sut
        .create_invalidation(
            distribution_id("E0000000000000"),
            InvalidationRequest::blog(caller_reference()),
        )
        .await;

    // Assert
    assert!(result.is_err());
    assert!(api.invalidations().await.is_empty());
}

fn distribution_id(id: &str) -> DistributionId {
    DistributionId::try_new(id).unwrap()
}

fn caller_reference() -> CallerReference {
    CallerReference::new(Utc::now(), Uuid::new_v4())
}

async fn make_sut() -> (CdnApiServiceImpl, FakeCdnApi) {
    // the default credential chain picks these up before trying anything else
    std::env::set_var("AWS_ACCESS_KEY_ID", "AKIDFOLIOTESTING");
    std::env::set_var("AWS_SECRET_ACCESS_KEY", "folio-testing-secret");

    let api = FakeCdnApi::new();
    let url = folio_testing::spawn(api.router()).await.unwrap();

    provider! {
        Provider { cdn_api_service_config: CdnApiServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        cdn_api_service_config: CdnApiServiceConfig {
            region: "us-east-1".into(),
            endpoint_override: Some(url.into()),
            request_timeout: Duration::from_secs(10),
        },
    };

    (provider.provide(), api)
}
