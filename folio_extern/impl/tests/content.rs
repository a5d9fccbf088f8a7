use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use folio_di::{provider, Provide};
use folio_extern_contracts::content::ContentApiService;
use folio_extern_impl::content::{ContentApiServiceConfig, ContentApiServiceImpl};
use folio_models::blog::PostSlug;
use folio_testing::content::{FakeContentApi, POST_SLUGS};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn list_posts() {
    // Arrange
    let sut = make_sut(None, None).await;

    // Act
    let result = sut.list_posts().await.unwrap();

    // Assert
    let slugs = result.iter().map(|post| post.slug.as_str()).collect::<Vec<_>>();
    assert_eq!(slugs, POST_SLUGS);
    assert_eq!(
        result[0].cover_image.as_ref().unwrap().url,
        "https://media.example.com/hello-world.png"
    );
    assert_eq!(result[0].cover_image.as_ref().unwrap().width, None);
    assert_eq!(result[0].author.as_ref().unwrap().name, "Peter Kaskonas");
}

#[tokio::test]
async fn get_post() {
    // Arrange
    let sut = make_sut(None, None).await;

    // Act
    let result = sut.get_post(slug(POST_SLUGS[1])).await.unwrap();

    // Assert
    let post = result.unwrap();
    assert_eq!(post.title, "Running a portfolio on serverless infrastructure");
    assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 6, 2));
    assert_eq!(post.cover_image.unwrap().height, Some(630));
    assert!(post.content.unwrap().json["children"].is_array());
}

#[tokio::test]
async fn get_post_not_found() {
    let sut = make_sut(None, None).await;

    let result = sut.get_post(slug("does-not-exist")).await.unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn token() {
    // Arrange
    let sut = make_sut(Some("cms-token"), Some("cms-token")).await;

    // Act
    let result = sut.list_posts().await;

    // Assert
    assert_eq!(result.unwrap().len(), POST_SLUGS.len());
}

#[tokio::test]
async fn missing_token() {
    // Arrange
    let sut = make_sut(Some("cms-token"), None).await;

    // Act
    let result = sut.list_posts().await;

    // Assert
    assert!(result.is_err());
}

fn slug(slug: &str) -> PostSlug {
    PostSlug::try_new(slug).unwrap()
}

async fn make_sut(server_token: Option<&str>, client_token: Option<&str>) -> ContentApiServiceImpl {
    let api = FakeContentApi::new(server_token.map(Into::into));
    let url = folio_testing::spawn(api.router()).await.unwrap();

    provider! {
        Provider { content_api_service_config: ContentApiServiceConfig, }
    }

    let mut provider = Provider {
        _cache: Default::default(),
        content_api_service_config: ContentApiServiceConfig {
            url: url.into(),
            token: client_token.map(|token| Arc::<str>::from(token).into()),
            request_timeout: Duration::from_secs(5),
        },
    };

    provider.provide()
}
