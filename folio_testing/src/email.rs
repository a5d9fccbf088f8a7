//! Transactional email API accepting the same requests as the production
//! provider.

use std::{net::IpAddr, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

pub const EMAILS_ROUTE: &str = "/emails";

#[derive(Debug, Clone)]
pub struct FakeEmailApi {
    api_key: Arc<str>,
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: Option<String>,
    pub text: Option<String>,
    pub reply_to: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    reply_to: Option<Vec<String>>,
}

impl FakeEmailApi {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            sent: Default::default(),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(EMAILS_ROUTE, routing::post(send_email))
            .with_state(self.clone())
    }

    /// Emails accepted so far, oldest first.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

pub async fn start_server(host: IpAddr, port: u16, api_key: String) -> anyhow::Result<()> {
    info!("Starting email api testing server on {host}:{port}");
    info!("Email api url: http://{host}:{port}/");
    info!("API key: {api_key:?}");
    info!("Recipients containing \"reject\" are rejected with a validation error");

    let api = FakeEmailApi::new(api_key);
    super::serve(api.router(), host, port).await
}

async fn send_email(
    State(api): State<FakeEmailApi>,
    headers: HeaderMap,
    Json(request): Json<SendEmailRequest>,
) -> Response {
    let Some(authorization) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    else {
        return error(
            StatusCode::UNAUTHORIZED,
            "missing_api_key",
            "Missing API key in the authorization header",
        );
    };

    if authorization.strip_prefix("Bearer ") != Some(&*api.api_key) {
        return error(StatusCode::FORBIDDEN, "invalid_api_key", "API key is invalid");
    }

    if request.to.iter().any(|to| to.contains("reject")) {
        return error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "The recipient address is not allowed",
        );
    }

    let id = Uuid::new_v4().to_string();
    api.sent.write().await.push(SentEmail {
        id: id.clone(),
        from: request.from,
        to: request.to,
        subject: request.subject,
        html: request.html,
        text: request.text,
        reply_to: request.reply_to,
    });

    Json(json!({ "id": id })).into_response()
}

fn error(status: StatusCode, name: &str, message: &str) -> Response {
    (
        status,
        Json(json!({
            "statusCode": status.as_u16(),
            "name": name,
            "message": message,
        })),
    )
        .into_response()
}
