/// Unified error handler for centralized error management
///
/// Classifies failures, keeps a bounded recent-error buffer, and formats
/// store errors for direct display by the UI layer.

use linkmark_core::LinkmarkError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, warn};

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that affects functionality
    Error,
    /// Warning about a degraded but recoverable condition
    Warning,
}

/// Error entry for tracking
#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub message: String,
    pub severity: ErrorSeverity,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub context: String,
}

/// Unified error handler
pub struct UnifiedErrorHandler {
    /// Recent errors for reporting
    recent_errors: Arc<RwLock<Vec<ErrorEntry>>>,
    /// Maximum number of errors to keep
    max_errors: usize,
}

impl UnifiedErrorHandler {
    pub fn new() -> Self {
        Self {
            recent_errors: Arc::new(RwLock::new(Vec::new())),
            max_errors: 100,
        }
    }

    /// Handle an error with automatic logging
    pub async fn handle_error(&self, err: &LinkmarkError, context: &str) {
        let severity = Self::classify(err);
        let message = Self::display_message(err);

        match severity {
            ErrorSeverity::Error => error!("error in {}: {}", context, message),
            ErrorSeverity::Warning => warn!("warning in {}: {}", context, message),
        }

        let entry = ErrorEntry {
            message,
            severity,
            timestamp: chrono::Utc::now(),
            context: context.to_string(),
        };
        self.add_error_entry(entry).await;
    }

    /// Classify error severity
    fn classify(err: &LinkmarkError) -> ErrorSeverity {
        match err {
            // Bad input is the user's to fix, not an operational fault
            LinkmarkError::Input { .. } => ErrorSeverity::Warning,
            LinkmarkError::Store { .. } => ErrorSeverity::Error,
            LinkmarkError::Configuration { .. } => ErrorSeverity::Error,
        }
    }

    /// The message shown to the user. Store errors carry their stable
    /// code and timestamp; everything else displays as-is.
    fn display_message(err: &LinkmarkError) -> String {
        match err {
            LinkmarkError::Store { source } => {
                format!("{} (at {})", source, source.occurred_at.to_rfc3339())
            }
            other => other.to_string(),
        }
    }

    /// Add an error entry to the history
    async fn add_error_entry(&self, entry: ErrorEntry) {
        let mut errors = self.recent_errors.write().await;
        errors.push(entry);

        if errors.len() > self.max_errors {
            let excess = errors.len() - self.max_errors;
            errors.drain(0..excess);
        }
    }

    /// Get recent errors
    pub async fn get_recent_errors(&self) -> Vec<ErrorEntry> {
        self.recent_errors.read().await.clone()
    }

    /// Get error statistics
    pub async fn get_error_stats(&self) -> ErrorStatistics {
        let errors = self.recent_errors.read().await;

        let mut stats = ErrorStatistics {
            total: errors.len(),
            errors: 0,
            warnings: 0,
        };
        for entry in errors.iter() {
            match entry.severity {
                ErrorSeverity::Error => stats.errors += 1,
                ErrorSeverity::Warning => stats.warnings += 1,
            }
        }

        stats
    }

    /// Clear error history
    pub async fn clear_errors(&self) {
        self.recent_errors.write().await.clear();
    }
}

impl Default for UnifiedErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorStatistics {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkmark_core::{codes, StoreError};

    #[tokio::test]
    async fn test_error_handler_creation() {
        let handler = UnifiedErrorHandler::new();
        let stats = handler.get_error_stats().await;
        assert_eq!(stats.total, 0);
    }

    #[tokio::test]
    async fn test_store_error_message_carries_code_and_timestamp() {
        let handler = UnifiedErrorHandler::new();
        let err: LinkmarkError =
            StoreError::backend(codes::CREATE_BOOKMARK_FAILED, "disk full").into();

        handler.handle_error(&err, "add_bookmark").await;

        let errors = handler.get_recent_errors().await;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].context, "add_bookmark");
        assert!(errors[0].message.contains("CREATE_BOOKMARK_FAILED"));
        assert!(errors[0].message.contains("(at "));
        assert_eq!(errors[0].severity, ErrorSeverity::Error);
    }

    #[tokio::test]
    async fn test_input_errors_classified_as_warnings() {
        let handler = UnifiedErrorHandler::new();
        let err: LinkmarkError = linkmark_core::InputError::InvalidUrl {
            details: "no host".to_string(),
        }
        .into();

        handler.handle_error(&err, "add_bookmark").await;

        let stats = handler.get_error_stats().await;
        assert_eq!(stats.warnings, 1);
        assert_eq!(stats.errors, 0);
    }
}
