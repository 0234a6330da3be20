//! Bookmark Enrichment Pipeline
//!
//! Given a URL, produces a display-ready title, favicon URL, and textual
//! summary via ordered lists of best-effort extraction strategies with
//! retry, a short-lived result cache, and a deterministic offline fallback.
//! Enrichment never fails: when every network strategy is exhausted the
//! fallback synthesizer supplies the result.

pub mod cache;
pub mod fallback;
pub mod fetch;
pub mod html;
pub mod metadata;
pub mod pipeline;
pub mod retry;
pub mod strategy;
pub mod summary;

pub use cache::ResultCache;
pub use fallback::{fallback_summary, fallback_title, favicon_url_for};
pub use fetch::{FetchConfig, PageFetcher};
pub use metadata::{MetadataExtractor, PageMetaStrategy, PreviewServiceStrategy};
pub use pipeline::{EnrichmentConfig, EnrichmentPipeline};
pub use retry::{with_retry, RetryPolicy};
pub use strategy::{ExtractedMetadata, MetadataStrategy, SummaryStrategy};
pub use summary::{
    MetaDescriptionStrategy, ReadableTextStrategy, SummaryGenerator, SummaryServiceStrategy,
};
