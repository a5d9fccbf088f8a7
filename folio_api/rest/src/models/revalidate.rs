use folio_models::cdn::{InvalidationId, InvalidationRecord, InvalidationStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInvalidation {
    pub ok: bool,
    pub invalidation_id: InvalidationId,
    pub status: InvalidationStatus,
    pub paths: Vec<String>,
}

impl From<InvalidationRecord> for ApiInvalidation {
    fn from(value: InvalidationRecord) -> Self {
        Self {
            ok: true,
            invalidation_id: value.id,
            status: value.status,
            paths: value.paths,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiRevalidateError {
    pub ok: bool,
    pub error: &'static str,
}

impl ApiRevalidateError {
    pub fn new(error: &'static str) -> Self {
        Self { ok: false, error }
    }
}
