/// Main application module
///
/// Provides the high-level Application API consumed by the UI layer.

use crate::{AppConfig, AppContext, AppStatistics, UnifiedLogger};
use bookmark_manager::{AnalyticsReport, SearchQuery, SearchResult};
use linkmark_core::{Bookmark, BookmarkPage, ListOptions, LinkmarkError, OwnerId, Result, Uuid};
use std::sync::Arc;
use tracing::info;

/// Main application
pub struct Application {
    context: Arc<AppContext>,
}

impl Application {
    /// Create and initialize a new application
    pub async fn new(config: AppConfig) -> Result<Self> {
        UnifiedLogger::init_default().map_err(|e| LinkmarkError::Configuration {
            details: e.to_string(),
        })?;

        info!("starting linkmark application");

        let context = Arc::new(AppContext::new(config).await?);

        info!("application initialized successfully");

        Ok(Self { context })
    }

    /// Create without touching the global logger (embedding hosts and
    /// tests install their own subscriber).
    pub async fn with_context(config: AppConfig) -> Result<Self> {
        let context = Arc::new(AppContext::new(config).await?);
        Ok(Self { context })
    }

    /// Shutdown the application
    pub async fn shutdown(&self) -> Result<()> {
        info!("shutting down application");
        self.context.shutdown().await?;
        info!("application shutdown complete");
        Ok(())
    }

    /// Get application context
    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    // High-level API methods

    /// Submit a URL with tags; returns the stored, enriched bookmark.
    pub async fn add_bookmark(
        &self,
        owner: &OwnerId,
        url: &str,
        tags: &[String],
    ) -> Result<Bookmark> {
        let result = self.context.service.create(owner, url, tags).await;
        if let Err(e) = &result {
            self.context
                .error_handler
                .handle_error(e, "add_bookmark")
                .await;
        }
        result
    }

    /// One page of the owner's bookmarks in manual order.
    pub async fn bookmarks(&self, owner: &OwnerId, options: &ListOptions) -> Result<BookmarkPage> {
        self.context.service.list(owner, options).await
    }

    pub async fn remove_bookmark(&self, owner: &OwnerId, id: &Uuid) -> Result<()> {
        let result = self.context.service.delete(owner, id).await;
        if let Err(e) = &result {
            self.context
                .error_handler
                .handle_error(e, "remove_bookmark")
                .await;
        }
        result
    }

    /// Replace a bookmark's tags (normalized on the way in).
    pub async fn retag(&self, owner: &OwnerId, id: &Uuid, tags: &[String]) -> Result<Vec<String>> {
        self.context.service.update_tags(owner, id, tags).await
    }

    /// Persist a caller-computed display order.
    pub async fn reorder(&self, owner: &OwnerId, ordered_ids: &[Uuid]) -> Result<()> {
        self.context.service.reorder(owner, ordered_ids).await
    }

    /// Search the owner's collection.
    pub async fn search(&self, owner: &OwnerId, query: &SearchQuery) -> Result<Vec<SearchResult>> {
        self.context.service.search(owner, query).await
    }

    /// Aggregate analytics for the owner's collection.
    pub async fn analytics(&self, owner: &OwnerId) -> Result<AnalyticsReport> {
        self.context.service.analytics(owner).await
    }

    /// Get application statistics
    pub async fn stats(&self, owner: &OwnerId) -> Result<AppStatistics> {
        Ok(AppStatistics {
            total_bookmarks: self.context.service.count(owner).await?,
            cached_enrichments: self.context.pipeline.cache().len().await,
        })
    }
}
