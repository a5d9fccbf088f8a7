use serde::Serialize;

pub mod blog;
pub mod contact;
pub mod revalidate;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}
