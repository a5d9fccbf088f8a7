//! Headless CMS GraphQL endpoint serving a fixed set of blog posts.

use std::{net::IpAddr, sync::Arc};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

pub const GRAPHQL_ROUTE: &str = "/";

/// Slugs of the posts served by [`FakeContentApi`], in listing order.
pub const POST_SLUGS: [&str; 2] = ["hello-world", "serverless-portfolio"];

#[derive(Debug, Clone, Default)]
pub struct FakeContentApi {
    token: Option<Arc<str>>,
}

#[derive(Deserialize)]
struct GraphQlRequest {
    query: String,
    #[serde(default)]
    variables: Option<Value>,
}

impl FakeContentApi {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Into::into),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(GRAPHQL_ROUTE, routing::post(graphql))
            .with_state(self.clone())
    }
}

pub async fn start_server(host: IpAddr, port: u16, token: Option<String>) -> anyhow::Result<()> {
    info!("Starting content api testing server on {host}:{port}");
    info!("GraphQL endpoint: http://{host}:{port}{GRAPHQL_ROUTE}");
    info!("Posts: {POST_SLUGS:?}");

    let api = FakeContentApi::new(token);
    super::serve(api.router(), host, port).await
}

async fn graphql(
    State(api): State<FakeContentApi>,
    headers: HeaderMap,
    Json(request): Json<GraphQlRequest>,
) -> Response {
    if let Some(token) = &api.token {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            == Some(&**token);
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "errors": [{ "message": "Not authorized" }] })),
            )
                .into_response();
        }
    }

    let slug = request
        .variables
        .as_ref()
        .and_then(|variables| variables.get("slug"))
        .and_then(Value::as_str);

    let data = match slug {
        Some(slug) => {
            let post = posts().into_iter().find(|post| post["slug"] == slug);
            json!({ "post": post })
        }
        None if request.query.contains("posts") => {
            let summaries = posts()
                .into_iter()
                .map(|post| {
                    json!({
                        "id": post["id"],
                        "slug": post["slug"],
                        "title": post["title"],
                        "excerpt": post["excerpt"],
                        "coverImage": { "url": post["coverImage"]["url"] },
                        "author": post["author"],
                    })
                })
                .collect::<Vec<_>>();
            json!({ "posts": summaries })
        }
        None => {
            return Json(json!({ "errors": [{ "message": "Unsupported query" }] }))
                .into_response();
        }
    };

    Json(json!({ "data": data })).into_response()
}

fn posts() -> Vec<Value> {
    vec![
        json!({
            "id": "clw0hello0000",
            "slug": POST_SLUGS[0],
            "title": "Hello World",
            "excerpt": "First post on the new site.",
            "date": "2024-03-18",
            "content": {
                "json": {
                    "children": [
                        { "type": "paragraph", "children": [{ "text": "Welcome to my blog!" }] }
                    ]
                }
            },
            "coverImage": {
                "url": "https://media.example.com/hello-world.png",
                "width": 1600,
                "height": 900
            },
            "author": { "name": "Peter Kaskonas" }
        }),
        json!({
            "id": "clw0serverless",
            "slug": POST_SLUGS[1],
            "title": "Running a portfolio on serverless infrastructure",
            "excerpt": "CDN invalidations, lambdas and a headless CMS.",
            "date": "2024-06-02",
            "content": {
                "json": {
                    "children": [
                        { "type": "heading-two", "children": [{ "text": "Why serverless?" }] },
                        { "type": "paragraph", "children": [{ "text": "It scales to zero." }] }
                    ]
                }
            },
            "coverImage": {
                "url": "https://media.example.com/serverless.png",
                "width": 1200,
                "height": 630
            },
            "author": { "name": "Peter Kaskonas" }
        }),
    ]
}
