//! Enrichment pipeline composition
//!
//! Wires the metadata extractor and summary generator behind the result
//! cache and runs both sides of one enrichment concurrently. The two
//! sides settle independently: a failure (and fallback) on one never
//! cancels or degrades the other.

use linkmark_core::EnrichedContent;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::cache::{ResultCache, DEFAULT_TTL};
use crate::fetch::{FetchConfig, PageFetcher};
use crate::metadata::{MetadataExtractor, PageMetaStrategy, PreviewServiceStrategy};
use crate::retry::RetryPolicy;
use crate::strategy::{MetadataStrategy, SummaryStrategy};
use crate::summary::{
    MetaDescriptionStrategy, ReadableTextStrategy, SummaryGenerator, SummaryServiceStrategy,
};

/// Configuration for the enrichment pipeline
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    pub fetch: FetchConfig,
    pub retry: RetryPolicy,
    /// Time-to-live for cached enrichment results
    pub cache_ttl: Duration,
    /// JSON link-preview service endpoint, when one is configured
    pub preview_endpoint: Option<String>,
    /// JSON summarizer service endpoint, when one is configured
    pub summarizer_endpoint: Option<String>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            retry: RetryPolicy::default(),
            cache_ttl: DEFAULT_TTL,
            preview_endpoint: None,
            summarizer_endpoint: None,
        }
    }
}

pub struct EnrichmentPipeline {
    metadata: MetadataExtractor,
    summary: SummaryGenerator,
    cache: ResultCache,
}

impl EnrichmentPipeline {
    /// Build the default strategy stack: direct page scraping first, then
    /// the configured third-party services.
    pub fn new(config: EnrichmentConfig) -> Self {
        let fetcher = Arc::new(PageFetcher::new(config.fetch.clone()));

        let mut metadata_strategies: Vec<Box<dyn MetadataStrategy>> =
            vec![Box::new(PageMetaStrategy::new(Arc::clone(&fetcher)))];
        if let Some(endpoint) = &config.preview_endpoint {
            metadata_strategies.push(Box::new(PreviewServiceStrategy::new(
                Arc::clone(&fetcher),
                endpoint.clone(),
            )));
        }

        let mut summary_strategies: Vec<Box<dyn SummaryStrategy>> =
            vec![Box::new(MetaDescriptionStrategy::new(Arc::clone(&fetcher)))];
        if let Some(endpoint) = &config.summarizer_endpoint {
            summary_strategies.push(Box::new(SummaryServiceStrategy::new(
                Arc::clone(&fetcher),
                endpoint.clone(),
            )));
        }
        summary_strategies.push(Box::new(ReadableTextStrategy::new(Arc::clone(&fetcher))));

        Self::with_strategies(metadata_strategies, summary_strategies, config)
    }

    /// Build from explicit strategy lists. Used by tests and by callers
    /// that need a custom stack; an empty list goes straight to the
    /// offline fallback.
    pub fn with_strategies(
        metadata_strategies: Vec<Box<dyn MetadataStrategy>>,
        summary_strategies: Vec<Box<dyn SummaryStrategy>>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            metadata: MetadataExtractor::new(metadata_strategies, config.retry),
            summary: SummaryGenerator::new(summary_strategies, config.retry),
            cache: ResultCache::new(config.cache_ttl),
        }
    }

    /// Enrich one URL: title, favicon, and summary, cache-first, with
    /// metadata and summary resolved concurrently. Infallible — both
    /// sides terminate in the offline fallback.
    pub async fn enrich(&self, url: &str) -> EnrichedContent {
        let cached_metadata = self.cache.get_metadata(url).await;
        let cached_summary = self.cache.get_summary(url).await;

        if let (Some(metadata), Some(summary)) = (&cached_metadata, &cached_summary) {
            debug!(url, "enrichment served from cache");
            return EnrichedContent {
                metadata: metadata.clone(),
                summary: summary.clone(),
            };
        }

        let metadata_side = async {
            match cached_metadata {
                Some(metadata) => metadata,
                None => self.metadata.extract(url).await,
            }
        };
        let summary_side = async {
            match cached_summary {
                Some(summary) => summary,
                None => self.summary.summarize(url).await,
            }
        };

        let (metadata, summary) = tokio::join!(metadata_side, summary_side);

        self.cache.put_metadata(url, metadata.clone()).await;
        self.cache.put_summary(url, summary.clone()).await;

        EnrichedContent { metadata, summary }
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use linkmark_core::StrategyError;
    use crate::strategy::ExtractedMetadata;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingStrategy {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl MetadataStrategy for CountingStrategy {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn attempt(&self, _url: &str) -> Result<ExtractedMetadata, StrategyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExtractedMetadata {
                title: "Counted Title".to_string(),
                favicon: None,
            })
        }
    }

    fn offline_config() -> EnrichmentConfig {
        EnrichmentConfig {
            retry: RetryPolicy {
                max_attempts: 1,
                initial_delay: Duration::from_millis(1),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_strategy_lists_fall_back_offline() {
        let pipeline = EnrichmentPipeline::with_strategies(vec![], vec![], offline_config());

        let enriched = pipeline.enrich("https://unknownsite.example/page1").await;
        assert!(enriched.metadata.title.starts_with("Unknownsite"));
        assert_eq!(enriched.metadata.method, "fallback");
        assert!(enriched.summary.contains("unknownsite.example"));
    }

    #[tokio::test]
    async fn test_second_enrich_is_served_from_cache() {
        let calls = Arc::new(AtomicU32::new(0));
        let pipeline = EnrichmentPipeline::with_strategies(
            vec![Box::new(CountingStrategy {
                calls: Arc::clone(&calls),
            })],
            vec![],
            offline_config(),
        );

        let first = pipeline.enrich("https://example.com/").await;
        let second = pipeline.enrich("https://example.com/").await;

        assert_eq!(first.metadata.title, second.metadata.title);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
