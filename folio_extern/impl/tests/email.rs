use std::{sync::Arc, time::Duration};

use folio_di::{provider, Provide};
use folio_extern_contracts::email::{EmailApiOutcome, EmailApiRequest, EmailApiService};
use folio_extern_impl::email::{EmailApiServiceConfig, EmailApiServiceImpl};
use folio_testing::email::{FakeEmailApi, SentEmail};
use pretty_assertions::assert_eq;

const API_KEY: &str = "re_test_key";

#[tokio::test]
async fn sent() {
    // Arrange
    let (sut, api) = make_sut().await;

    // Act
    let result = sut.send_email(API_KEY.to_owned().into(), request("contact@example.com")).await;

    // Assert
    let EmailApiOutcome::Sent { id } = result.unwrap() else {
        panic!("email was not sent");
    };
    assert_eq!(
        api.sent().await,
        [SentEmail {
            id,
            from: "Portfolio <no-reply@example.com>".into(),
            to: vec!["contact@example.com".into()],
            subject: "New Email from Portfolio!".into(),
            html: Some("<p>Hello</p>".into()),
            text: Some("Hello".into()),
            reply_to: Some(vec!["visitor@example.org".into()]),
        }]
    );
}

#[tokio::test]
async fn rejected_recipient() {
    // Arrange
    let (sut, api) = make_sut().await;

    // Act
    let result = sut.send_email(API_KEY.to_owned().into(), request("reject@example.com")).await;

    // Assert
    assert_eq!(
        result.unwrap(),
        EmailApiOutcome::Rejected {
            status: 422,
            name: "validation_error".into(),
            message: "The recipient address is not allowed".into(),
        }
    );
    assert!(api.sent().await.is_empty());
}

#[tokio::test]
async fn invalid_api_key() {
    // Arrange
    let (sut, _) = make_sut().await;

    // Act
    let result = sut
        .send_email("re_wrong".to_owned().into(), request("contact@example.com"))
        .await;

    // Assert
    assert_eq!(
        result.unwrap(),
        EmailApiOutcome::Rejected {
            status: 403,
            name: "invalid_api_key".into(),
            message: "API key is invalid".into(),
        }
    );
}

#[tokio::test]
async fn unreachable() {
    // Arrange
    let mut provider = Provider {
        _cache: Default::default(),
        email_api_service_config: EmailApiServiceConfig {
            api_url: Arc::new("http://127.0.0.1:1/".parse().unwrap()),
            request_timeout: Duration::from_secs(5),
        },
    };
    let sut: EmailApiServiceImpl = provider.provide();

    // Act
    let result = sut.send_email(API_KEY.to_owned().into(), request("contact@example.com")).await;

    // Assert
    assert!(result.is_err());
}

fn request(to: &str) -> EmailApiRequest {
    EmailApiRequest {
        from: "Portfolio <no-reply@example.com>".into(),
        to: vec![to.into()],
        subject: "New Email from Portfolio!".into(),
        html: "<p>Hello</p>".into(),
        text: "Hello".into(),
        reply_to: Some("visitor@example.org".into()),
    }
}

provider! {
    Provider { email_api_service_config: EmailApiServiceConfig, }
}

async fn make_sut() -> (EmailApiServiceImpl, FakeEmailApi) {
    let api = FakeEmailApi::new(API_KEY);
    let url = folio_testing::spawn(api.router()).await.unwrap();

    let mut provider = Provider {
        _cache: Default::default(),
        email_api_service_config: EmailApiServiceConfig {
            api_url: url.into(),
            request_timeout: Duration::from_secs(5),
        },
    };

    (provider.provide(), api)
}
