//! Metadata extraction over an ordered strategy list
//!
//! Each strategy is attempted with bounded retries; the first result with
//! a usable title wins. Exhaustion falls through to the offline fallback
//! synthesizer, so extraction never blocks bookmark creation.

use async_trait::async_trait;
use linkmark_core::{PageMetadata, StrategyError};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::fallback::{fallback_title, favicon_url_for};
use crate::fetch::PageFetcher;
use crate::html;
use crate::retry::{with_retry, RetryPolicy};
use crate::strategy::{ExtractedMetadata, MetadataStrategy};

/// Method name recorded when every network strategy was exhausted
pub const FALLBACK_METHOD: &str = "fallback";

/// Minimum title length for a strategy result to be accepted
const MIN_TITLE_LEN: usize = 4;

/// Maximum stored title length
const MAX_TITLE_LEN: usize = 200;

pub struct MetadataExtractor {
    strategies: Vec<Box<dyn MetadataStrategy>>,
    retry: RetryPolicy,
}

impl MetadataExtractor {
    pub fn new(strategies: Vec<Box<dyn MetadataStrategy>>, retry: RetryPolicy) -> Self {
        Self { strategies, retry }
    }

    /// Extract title and favicon for an already-validated absolute URL.
    ///
    /// Never fails: the fallback synthesizer is the terminal case.
    pub async fn extract(&self, url: &str) -> PageMetadata {
        for strategy in &self.strategies {
            let outcome = with_retry(
                || strategy.attempt(url),
                self.retry.max_attempts,
                self.retry.initial_delay,
            )
            .await;

            match outcome {
                Ok(parts) => {
                    let title = clean_title(&parts.title);
                    if title.len() >= MIN_TITLE_LEN {
                        debug!(url, method = strategy.name(), "metadata extracted");
                        return PageMetadata {
                            title,
                            favicon: parts
                                .favicon
                                .unwrap_or_else(|| favicon_url_for(url)),
                            method: strategy.name().to_string(),
                        };
                    }
                    debug!(url, method = strategy.name(), "title too short, trying next strategy");
                }
                Err(e) => {
                    debug!(url, method = strategy.name(), error = %e, "strategy failed, trying next");
                }
            }
        }

        debug!(url, "all metadata strategies exhausted, synthesizing fallback");
        PageMetadata {
            title: fallback_title(url),
            favicon: favicon_url_for(url),
            method: FALLBACK_METHOD.to_string(),
        }
    }
}

/// Entity-decode, strip residual tags, collapse whitespace, cap length.
fn clean_title(raw: &str) -> String {
    let text = html::extract_text_content(raw);
    if text.len() <= MAX_TITLE_LEN {
        return text;
    }
    let mut cut = MAX_TITLE_LEN;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].trim_end().to_string()
}

/// Direct fetch-and-parse of the page itself
pub struct PageMetaStrategy {
    fetcher: Arc<PageFetcher>,
}

impl PageMetaStrategy {
    pub fn new(fetcher: Arc<PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl MetadataStrategy for PageMetaStrategy {
    fn name(&self) -> &'static str {
        "page-meta"
    }

    async fn attempt(&self, url: &str) -> Result<ExtractedMetadata, StrategyError> {
        let body = self.fetcher.fetch_html(url).await?;

        let title = html::extract_title(&body).ok_or(StrategyError::Rejected)?;
        let favicon = html::extract_link_icon(&body)
            .and_then(|href| resolve_relative(url, &href));

        Ok(ExtractedMetadata { title, favicon })
    }
}

/// Third-party link-preview service returning JSON
pub struct PreviewServiceStrategy {
    fetcher: Arc<PageFetcher>,
    endpoint: String,
}

impl PreviewServiceStrategy {
    pub fn new(fetcher: Arc<PageFetcher>, endpoint: String) -> Self {
        Self { fetcher, endpoint }
    }
}

#[async_trait]
impl MetadataStrategy for PreviewServiceStrategy {
    fn name(&self) -> &'static str {
        "preview-service"
    }

    async fn attempt(&self, url: &str) -> Result<ExtractedMetadata, StrategyError> {
        let request_url = format!("{}?url={}", self.endpoint, urlencoding::encode(url));
        let payload = self.fetcher.fetch_json(&request_url).await?;

        // Services nest the interesting fields under "data" or return
        // them at the top level; accept either shape.
        let data = payload.get("data").unwrap_or(&payload);

        let title = data
            .get("title")
            .and_then(|v| v.as_str())
            .filter(|t| !t.trim().is_empty())
            .ok_or(StrategyError::Rejected)?
            .trim()
            .to_string();

        let favicon = ["logo", "icon", "image"]
            .iter()
            .find_map(|key| {
                let node = data.get(*key)?;
                node.as_str()
                    .map(|s| s.to_string())
                    .or_else(|| node.get("url")?.as_str().map(|s| s.to_string()))
            })
            .filter(|s| !s.is_empty());

        Ok(ExtractedMetadata { title, favicon })
    }
}

/// Resolve a possibly-relative href against the page URL.
fn resolve_relative(base: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}
