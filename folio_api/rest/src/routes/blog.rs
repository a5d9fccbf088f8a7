use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_blog_contracts::{BlogGetPostError, BlogService};

use super::{error, internal_server_error};
use crate::models::blog::{ApiPost, ApiPostSummary};

pub fn router(service: Arc<impl BlogService>) -> Router<()> {
    Router::new()
        .route("/api/posts", routing::get(list_posts))
        .route("/api/posts/:slug", routing::get(get_post))
        .with_state(service)
}

async fn list_posts(service: State<Arc<impl BlogService>>) -> Response {
    match service.list_posts().await {
        Ok(posts) => Json(
            posts
                .into_iter()
                .map(Into::into)
                .collect::<Vec<ApiPostSummary>>(),
        )
        .into_response(),
        Err(err) => internal_server_error(err),
    }
}

async fn get_post(service: State<Arc<impl BlogService>>, Path(slug): Path<String>) -> Response {
    match service.get_post(slug).await {
        Ok(post) => Json(ApiPost::from(post)).into_response(),
        Err(BlogGetPostError::NotFound) => error(StatusCode::NOT_FOUND, "Post not found"),
        Err(BlogGetPostError::Other(err)) => internal_server_error(err),
    }
}
