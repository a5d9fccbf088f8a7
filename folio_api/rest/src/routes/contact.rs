use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactService, ContactSubmitError};
use tracing::{debug, error};

use crate::models::contact::{ApiContactResponse, ApiContactSubmission};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/send-email", routing::post(send_email))
        .with_state(service)
}

async fn send_email(
    service: State<Arc<impl ContactService>>,
    body: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match body {
        Ok(Json(submission)) => submission,
        Err(err) => {
            debug!(%err, "Rejecting malformed contact request");
            return response(
                StatusCode::BAD_REQUEST,
                ApiContactResponse::error("Invalid request body"),
            );
        }
    };

    match service.submit(submission.into()).await {
        Ok(()) => Json(ApiContactResponse::success()).into_response(),
        Err(ContactSubmitError::Validation(err)) => response(StatusCode::BAD_REQUEST, err.into()),
        Err(ContactSubmitError::NotConfigured) => response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiContactResponse::error("Email service not configured"),
        ),
        Err(ContactSubmitError::Send) => response(
            StatusCode::BAD_GATEWAY,
            ApiContactResponse::error("Failed to send email"),
        ),
        Err(ContactSubmitError::Other(err)) => {
            error!("Failed to process contact request: {err:#}");
            response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiContactResponse::error("Internal server error"),
            )
        }
    }
}

fn response(status: StatusCode, body: ApiContactResponse) -> Response {
    (status, Json(body)).into_response()
}
