/// Integration module for linkmark
///
/// Wires the database, repository, enrichment pipeline, and bookmark
/// service into one application context.

use linkmark_core::Result;
use bookmark_manager::BookmarkService;
use data_access::DatabaseManager;
use enrichment::{EnrichmentConfig, EnrichmentPipeline};
use std::sync::Arc;
use tracing::info;

pub mod application;
pub mod error_handler;
pub mod logger;

pub use application::Application;
pub use error_handler::{ErrorSeverity, ErrorStatistics, UnifiedErrorHandler};
pub use logger::{LoggerConfig, UnifiedLogger};

/// Application configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
    /// Database path; in-memory when unset
    pub database_path: Option<std::path::PathBuf>,

    /// Link-preview service endpoint for metadata extraction
    pub preview_endpoint: Option<String>,

    /// Summarizer service endpoint
    pub summarizer_endpoint: Option<String>,

    /// Enrichment cache time-to-live in seconds
    pub cache_ttl_secs: u64,

    /// Per-request timeout for extraction fetches in seconds
    pub fetch_timeout_secs: u64,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            preview_endpoint: None,
            summarizer_endpoint: None,
            cache_ttl_secs: 300,
            fetch_timeout_secs: 8,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    fn enrichment_config(&self) -> EnrichmentConfig {
        let mut config = EnrichmentConfig {
            preview_endpoint: self.preview_endpoint.clone(),
            summarizer_endpoint: self.summarizer_endpoint.clone(),
            cache_ttl: std::time::Duration::from_secs(self.cache_ttl_secs),
            ..Default::default()
        };
        config.fetch.request_timeout = std::time::Duration::from_secs(self.fetch_timeout_secs);
        config
    }
}

/// Application context that holds all initialized components
pub struct AppContext {
    /// Database manager for data persistence
    pub database: Arc<DatabaseManager>,

    /// Bookmark service for owner-scoped operations
    pub service: Arc<BookmarkService>,

    /// Enrichment pipeline (shared with the service)
    pub pipeline: Arc<EnrichmentPipeline>,

    /// Unified error handler
    pub error_handler: Arc<UnifiedErrorHandler>,

    /// Application configuration
    pub config: AppConfig,
}

impl AppContext {
    /// Create a new application context with all components initialized
    pub async fn new(config: AppConfig) -> Result<Self> {
        let pipeline = Arc::new(EnrichmentPipeline::new(config.enrichment_config()));
        Self::with_pipeline(config, pipeline).await
    }

    /// Create a context around a caller-supplied pipeline. Embedding
    /// hosts and tests use this to control the strategy stack.
    pub async fn with_pipeline(
        config: AppConfig,
        pipeline: Arc<EnrichmentPipeline>,
    ) -> Result<Self> {
        info!("initializing application context");

        let database = if let Some(path) = &config.database_path {
            Arc::new(DatabaseManager::new(path).await?)
        } else {
            Arc::new(DatabaseManager::in_memory().await?)
        };
        info!("database initialized");

        let repository = Arc::new(database.bookmark_repository());
        let service = Arc::new(BookmarkService::new(repository, Arc::clone(&pipeline)));
        info!("bookmark service initialized");

        let error_handler = Arc::new(UnifiedErrorHandler::new());

        info!("application context initialized successfully");

        Ok(Self {
            database,
            service,
            pipeline,
            error_handler,
            config,
        })
    }

    /// Shutdown all components gracefully
    pub async fn shutdown(&self) -> Result<()> {
        info!("shutting down application context");

        self.pipeline.cache().clear().await;
        info!("enrichment cache cleared");

        info!("application context shutdown complete");
        Ok(())
    }
}

/// Application statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AppStatistics {
    pub total_bookmarks: usize,
    pub cached_enrichments: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_context_creation() {
        let config = AppConfig::default();
        let context = AppContext::new(config).await;
        assert!(context.is_ok());
    }

    #[tokio::test]
    async fn test_app_context_shutdown() {
        let config = AppConfig::default();
        let context = AppContext::new(config).await.unwrap();
        let result = context.shutdown().await;
        assert!(result.is_ok());
    }
}
