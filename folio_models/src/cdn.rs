use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::macros::nutype_string;

/// Path patterns invalidated whenever blog content changes.
pub const BLOG_PATH_PATTERNS: &[&str] = &["/blog/*"];

nutype_string!(
    /// Identifier of a CDN distribution.
    DistributionId(sanitize(trim), validate(not_empty))
);

nutype_string!(InvalidationId(validate(not_empty)));

/// Client supplied token which prevents the CDN from deduplicating otherwise
/// identical invalidation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerReference(String);

impl CallerReference {
    pub fn new(now: DateTime<Utc>, id: Uuid) -> Self {
        Self(format!("{}-{}", now.timestamp_millis(), id.simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CallerReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A batch of path patterns to invalidate. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    caller_reference: CallerReference,
    paths: Vec<String>,
}

impl InvalidationRequest {
    /// Invalidate the whole blog section.
    pub fn blog(caller_reference: CallerReference) -> Self {
        Self {
            caller_reference,
            paths: BLOG_PATH_PATTERNS.iter().map(|&p| p.into()).collect(),
        }
    }

    pub fn caller_reference(&self) -> &CallerReference {
        &self.caller_reference
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }
}

/// Invalidation as reported by the CDN right after it has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationRecord {
    pub id: InvalidationId,
    pub status: InvalidationStatus,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationStatus {
    InProgress,
    Completed,
}

impl InvalidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for InvalidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown invalidation status: {0:?}")]
pub struct UnknownInvalidationStatus(pub String);

impl FromStr for InvalidationStatus {
    type Err = UnknownInvalidationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InProgress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            _ => Err(UnknownInvalidationStatus(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn blog_request_targets_blog_section() {
        let reference = CallerReference::new(Utc::now(), Uuid::nil());

        let request = InvalidationRequest::blog(reference);

        assert_eq!(request.paths(), ["/blog/*"]);
    }

    #[test]
    fn caller_reference_format() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);

        let reference = CallerReference::new(now, id);

        assert_eq!(
            reference.as_str(),
            "1700000000123-0123456789abcdef0123456789abcdef"
        );
    }

    #[test]
    fn caller_references_differ_within_same_millisecond() {
        let now = Utc::now();

        let a = CallerReference::new(now, Uuid::from_u128(1));
        let b = CallerReference::new(now, Uuid::from_u128(2));

        assert_ne!(a, b);
    }

    #[test]
    fn parse_status() {
        assert_eq!("InProgress".parse::<InvalidationStatus>(), Ok(InvalidationStatus::InProgress));
        assert_eq!("Completed".parse::<InvalidationStatus>(), Ok(InvalidationStatus::Completed));
        assert!("Pending".parse::<InvalidationStatus>().is_err());
    }

    #[test]
    fn distribution_id_is_trimmed() {
        let id = DistributionId::try_new(" E2QWRUHAPOMQZL ").unwrap();
        assert_eq!(&**id, "E2QWRUHAPOMQZL");
        assert!(DistributionId::try_new("   ").is_err());
    }
}
