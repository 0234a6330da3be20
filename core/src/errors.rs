use thiserror::Error;
use chrono::{DateTime, Utc};

/// Stable error codes attached to store failures before they reach the UI
/// layer. The UI displays these verbatim; they must never change meaning.
pub mod codes {
    pub const CREATE_BOOKMARK_FAILED: &str = "CREATE_BOOKMARK_FAILED";
    pub const GET_BOOKMARK_FAILED: &str = "GET_BOOKMARK_FAILED";
    pub const LIST_BOOKMARKS_FAILED: &str = "LIST_BOOKMARKS_FAILED";
    pub const DELETE_BOOKMARK_FAILED: &str = "DELETE_BOOKMARK_FAILED";
    pub const UPDATE_TAGS_FAILED: &str = "UPDATE_TAGS_FAILED";
    pub const REORDER_BOOKMARKS_FAILED: &str = "REORDER_BOOKMARKS_FAILED";
    pub const SEARCH_BOOKMARKS_FAILED: &str = "SEARCH_BOOKMARKS_FAILED";
    pub const ANALYTICS_FAILED: &str = "ANALYTICS_FAILED";
}

/// Input validation errors — raised before any network or store call
#[derive(Debug, Clone, Error)]
pub enum InputError {
    #[error("invalid URL: {details}")]
    InvalidUrl { details: String },

    #[error("unsupported URL scheme: {scheme}")]
    UnsupportedScheme { scheme: String },
}

/// A single enrichment strategy failure. Caught inside the extractor
/// loops and never surfaced past the enrichment boundary.
#[derive(Debug, Clone, Error)]
pub enum StrategyError {
    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("connection failed: {details}")]
    Connection { details: String },

    #[error("HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("unusable payload: {details}")]
    UnusablePayload { details: String },

    #[error("strategy produced no acceptable result")]
    Rejected,
}

/// Classification of a store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The underlying database call failed
    Backend,
    /// The owner-scoped predicate matched zero rows. Covers both missing
    /// ids and rows belonging to another owner; the store never reveals
    /// which.
    NotFound,
}

/// Persistence failure, wrapped with a stable code and an occurrence
/// timestamp before it reaches the UI layer
#[derive(Debug, Clone, Error)]
#[error("[{code}] {details}")]
pub struct StoreError {
    pub code: &'static str,
    pub kind: StoreErrorKind,
    pub details: String,
    pub occurred_at: DateTime<Utc>,
}

impl StoreError {
    pub fn backend(code: &'static str, details: impl std::fmt::Display) -> Self {
        Self {
            code,
            kind: StoreErrorKind::Backend,
            details: details.to_string(),
            occurred_at: Utc::now(),
        }
    }

    pub fn not_found(code: &'static str) -> Self {
        Self {
            code,
            kind: StoreErrorKind::NotFound,
            details: "no matching bookmark for this owner".to_string(),
            occurred_at: Utc::now(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }
}

/// Main error type for the linkmark workspace
#[derive(Debug, Error)]
pub enum LinkmarkError {
    #[error("input error: {source}")]
    Input {
        #[from]
        source: InputError,
    },

    #[error("store error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },

    #[error("configuration error: {details}")]
    Configuration { details: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LinkmarkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_message_carries_code() {
        let err = StoreError::backend(codes::CREATE_BOOKMARK_FAILED, "disk full");
        let msg = err.to_string();
        assert!(msg.starts_with("[CREATE_BOOKMARK_FAILED]"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn test_not_found_classification() {
        let err = StoreError::not_found(codes::DELETE_BOOKMARK_FAILED);
        assert!(err.is_not_found());
        assert_eq!(err.code, codes::DELETE_BOOKMARK_FAILED);
    }

    #[test]
    fn test_input_error_converts_to_linkmark_error() {
        let err: LinkmarkError = InputError::InvalidUrl {
            details: "no host".to_string(),
        }
        .into();
        assert!(matches!(err, LinkmarkError::Input { .. }));
    }
}
