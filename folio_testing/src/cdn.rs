//! CloudFront compatible control plane implementing `CreateInvalidation`.

use std::{collections::HashMap, net::IpAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing, Router,
};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

pub const INVALIDATION_ROUTE: &str = "/2020-05-31/distribution/:distribution_id/invalidation";

/// Distribution ids the fake control plane knows about. Any other id
/// yields a `NoSuchDistribution` error.
pub const DISTRIBUTION_ID: &str = "E2FOLIOTESTING";

const XMLNS: &str = "http://cloudfront.amazonaws.com/doc/2020-05-31/";

#[derive(Debug, Clone, Default)]
pub struct FakeCdnApi {
    invalidations: Arc<RwLock<HashMap<String, Invalidation>>>,
}

/// An invalidation as recorded by the fake, keyed by its caller reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub id: String,
    pub distribution_id: String,
    pub caller_reference: String,
    pub paths: Vec<String>,
}

impl FakeCdnApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(INVALIDATION_ROUTE, routing::post(create_invalidation))
            .with_state(self.clone())
    }

    pub async fn invalidations(&self) -> Vec<Invalidation> {
        self.invalidations.read().await.values().cloned().collect()
    }
}

pub async fn start_server(host: IpAddr, port: u16) -> anyhow::Result<()> {
    info!("Starting cdn api testing server on {host}:{port}");
    info!("Endpoint url: http://{host}:{port}");
    info!("Distribution id: {DISTRIBUTION_ID}");

    super::serve(FakeCdnApi::new().router(), host, port).await
}

async fn create_invalidation(
    State(api): State<FakeCdnApi>,
    Path(distribution_id): Path<String>,
    body: String,
) -> Response {
    if distribution_id != DISTRIBUTION_ID {
        return error(
            StatusCode::NOT_FOUND,
            "NoSuchDistribution",
            "The specified distribution does not exist.",
        );
    }

    let (Some(caller_reference), paths) = (
        tag_values(&body, "CallerReference").into_iter().next(),
        tag_values(&body, "Path"),
    ) else {
        return error(
            StatusCode::BAD_REQUEST,
            "MissingBody",
            "This operation requires a body.",
        );
    };

    // the same caller reference returns the existing invalidation instead of creating a new one
    let mut invalidations = api.invalidations.write().await;
    let (status, invalidation) = match invalidations.get(&caller_reference) {
        Some(existing) => (StatusCode::OK, existing.clone()),
        None => {
            let id = format!("I{}", Uuid::new_v4().simple())
                .to_uppercase()
                .chars()
                .take(14)
                .collect::<String>();
            let invalidation = Invalidation {
                id,
                distribution_id,
                caller_reference: caller_reference.clone(),
                paths,
            };
            invalidations.insert(caller_reference, invalidation.clone());
            (StatusCode::CREATED, invalidation)
        }
    };
    drop(invalidations);

    let items = invalidation
        .paths
        .iter()
        .map(|path| format!("<Path>{path}</Path>"))
        .collect::<String>();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <Invalidation xmlns=\"{XMLNS}\">\
         <Id>{id}</Id>\
         <Status>InProgress</Status>\
         <CreateTime>2024-06-02T12:00:00.000Z</CreateTime>\
         <InvalidationBatch>\
         <Paths><Quantity>{quantity}</Quantity><Items>{items}</Items></Paths>\
         <CallerReference>{caller_reference}</CallerReference>\
         </InvalidationBatch>\
         </Invalidation>",
        id = invalidation.id,
        quantity = invalidation.paths.len(),
        caller_reference = invalidation.caller_reference,
    );

    (
        status,
        [
            (header::CONTENT_TYPE, "text/xml".to_owned()),
            (
                header::LOCATION,
                format!(
                    "/2020-05-31/distribution/{}/invalidation/{}",
                    invalidation.distribution_id, invalidation.id
                ),
            ),
        ],
        xml,
    )
        .into_response()
}

fn error(status: StatusCode, code: &str, message: &str) -> Response {
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ErrorResponse xmlns=\"{XMLNS}\">\
         <Error><Type>Sender</Type><Code>{code}</Code><Message>{message}</Message></Error>\
         <RequestId>{}</RequestId>\
         </ErrorResponse>",
        Uuid::new_v4()
    );
    (status, [(header::CONTENT_TYPE, "text/xml")], xml).into_response()
}

/// Text content of every `<tag>...</tag>` element, in document order.
fn tag_values(xml: &str, tag: &str) -> Vec<String> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    xml.split(&open)
        .skip(1)
        .filter_map(|rest| rest.split_once(&close).map(|(value, _)| value.to_owned()))
        .collect()
}
