use folio_models::contact::{ContactField, ContactSubmission, ContactValidationError};
use serde::{Deserialize, Serialize};

/// Contact form as posted by the site. Missing fields count as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ApiContactFieldError>,
}

#[derive(Debug, Serialize)]
pub struct ApiContactFieldError {
    pub field: ContactField,
    pub message: &'static str,
}

impl ApiContactResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
            fields: Vec::new(),
        }
    }

    pub fn error(error: &'static str) -> Self {
        Self {
            success: false,
            error: Some(error),
            fields: Vec::new(),
        }
    }
}

impl From<ContactValidationError> for ApiContactResponse {
    fn from(value: ContactValidationError) -> Self {
        Self {
            fields: value
                .0
                .into_iter()
                .map(|err| ApiContactFieldError {
                    field: err.field,
                    message: err.message,
                })
                .collect(),
            ..Self::error("Invalid input")
        }
    }
}
