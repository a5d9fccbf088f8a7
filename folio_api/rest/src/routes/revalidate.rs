use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_revalidate_contracts::{RevalidateError, RevalidateService};

use crate::models::revalidate::{ApiInvalidation, ApiRevalidateError};

pub fn router(service: Arc<impl RevalidateService>) -> Router<()> {
    Router::new()
        .route(
            "/api/revalidate",
            routing::post(revalidate).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn revalidate(service: State<Arc<impl RevalidateService>>) -> Response {
    match service.revalidate().await {
        Ok(record) => Json(ApiInvalidation::from(record)).into_response(),
        Err(RevalidateError::NotConfigured) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server misconfigured: CDN distribution id is not set",
        ),
        Err(RevalidateError::Cdn(_)) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "CDN invalidation failed")
        }
    }
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

fn error(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ApiRevalidateError::new(error))).into_response()
}
