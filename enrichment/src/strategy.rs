//! Strategy traits for the extraction pipelines
//!
//! Each strategy is one concrete way of obtaining metadata or a summary —
//! a direct page fetch, a third-party service, and so on. The extractors
//! iterate an ordered list and stop at the first acceptable result; any
//! strategy failure is caught there and never surfaces further.

use async_trait::async_trait;
use linkmark_core::StrategyError;

/// Raw metadata parts as returned by a single strategy, before the
/// extractor applies acceptance rules and favicon fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMetadata {
    pub title: String,
    pub favicon: Option<String>,
}

/// One method of obtaining page metadata
#[async_trait]
pub trait MetadataStrategy: Send + Sync {
    /// Strategy name, recorded as the `method` on accepted results
    fn name(&self) -> &'static str;

    async fn attempt(&self, url: &str) -> Result<ExtractedMetadata, StrategyError>;
}

/// One method of obtaining a page summary
#[async_trait]
pub trait SummaryStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self, url: &str) -> Result<String, StrategyError>;
}
