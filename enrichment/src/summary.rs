//! Summary generation over an ordered strategy list
//!
//! Same iterate-and-accept-first pattern as metadata extraction, with a
//! post-processing pass that normalizes whitespace, strips boilerplate,
//! and truncates to display length. Exhaustion falls through to the
//! offline fallback summary.

use async_trait::async_trait;
use linkmark_core::StrategyError;
use std::sync::Arc;
use tracing::debug;

use crate::fallback::fallback_summary;
use crate::fetch::PageFetcher;
use crate::html;
use crate::retry::{with_retry, RetryPolicy};
use crate::strategy::SummaryStrategy;

/// Minimum extracted length for a strategy result to be accepted
const MIN_SUMMARY_LEN: usize = 50;

/// Maximum stored summary length
const MAX_SUMMARY_LEN: usize = 400;

/// Raw text taken from page body scraping before post-processing
const RAW_TEXT_BUDGET: usize = 600;

/// Lead-in phrases stripped from the front of an accepted summary
const LEADIN_PHRASES: &[&str] = &[
    "this is ",
    "this page is ",
    "this website is ",
    "this site is ",
    "welcome to ",
    "the official website of ",
    "the official site of ",
    "the home of ",
];

/// Filler phrases removed wherever they appear
const FILLER_PHRASES: &[&str] = &[
    "click here",
    "read more",
    "learn more",
    "sign up now",
    "subscribe now",
];

pub struct SummaryGenerator {
    strategies: Vec<Box<dyn SummaryStrategy>>,
    retry: RetryPolicy,
}

impl SummaryGenerator {
    pub fn new(strategies: Vec<Box<dyn SummaryStrategy>>, retry: RetryPolicy) -> Self {
        Self { strategies, retry }
    }

    /// Produce a display summary for an already-validated absolute URL.
    ///
    /// Never fails: the fallback synthesizer is the terminal case.
    pub async fn summarize(&self, url: &str) -> String {
        for strategy in &self.strategies {
            let outcome = with_retry(
                || strategy.attempt(url),
                self.retry.max_attempts,
                self.retry.initial_delay,
            )
            .await;

            match outcome {
                Ok(text) if text.trim().len() > MIN_SUMMARY_LEN => {
                    debug!(url, method = strategy.name(), "summary extracted");
                    return postprocess(&text);
                }
                Ok(_) => {
                    debug!(url, method = strategy.name(), "summary too short, trying next strategy");
                }
                Err(e) => {
                    debug!(url, method = strategy.name(), error = %e, "strategy failed, trying next");
                }
            }
        }

        debug!(url, "all summary strategies exhausted, synthesizing fallback");
        fallback_summary(url)
    }
}

/// Post-process an accepted summary: collapse whitespace, strip lead-in
/// boilerplate and filler phrases, truncate with a trailing ellipsis when
/// cut at a non-sentence boundary.
pub fn postprocess(raw: &str) -> String {
    let mut text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    for phrase in LEADIN_PHRASES {
        let prefix_len = phrase.len();
        if text.len() > prefix_len
            && text.as_bytes()[..prefix_len].eq_ignore_ascii_case(phrase.as_bytes())
        {
            // The matched prefix is pure ASCII, so the byte cut is safe
            text = text[prefix_len..].to_string();
            if let Some(first) = text.chars().next() {
                let upper: String = first.to_uppercase().collect();
                text = upper + &text[first.len_utf8()..];
            }
            break;
        }
    }

    for phrase in FILLER_PHRASES {
        let mut cleaned = String::with_capacity(text.len());
        let mut cursor = 0;
        while let Some(at) = find_ascii_ci(&text, phrase, cursor) {
            cleaned.push_str(&text[cursor..at]);
            cursor = at + phrase.len();
        }
        if cursor == 0 {
            continue;
        }
        cleaned.push_str(&text[cursor..]);
        text = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    truncate_summary(&text)
}

/// Case-insensitive byte search for an ASCII needle. Matches are pure
/// ASCII, so the returned offset is always a char boundary.
fn find_ascii_ci(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < start + needle.len() {
        return None;
    }
    (start..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

fn truncate_summary(text: &str) -> String {
    if text.len() <= MAX_SUMMARY_LEN {
        return text.to_string();
    }

    let mut cut = MAX_SUMMARY_LEN;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let truncated = text[..cut].trim_end();

    if truncated.ends_with(['.', '!', '?']) {
        truncated.to_string()
    } else {
        format!("{}\u{2026}", truncated)
    }
}

/// Meta description / og:description of the page itself
pub struct MetaDescriptionStrategy {
    fetcher: Arc<PageFetcher>,
}

impl MetaDescriptionStrategy {
    pub fn new(fetcher: Arc<PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SummaryStrategy for MetaDescriptionStrategy {
    fn name(&self) -> &'static str {
        "meta-description"
    }

    async fn attempt(&self, url: &str) -> Result<String, StrategyError> {
        let body = self.fetcher.fetch_html(url).await?;
        html::extract_meta_content(&body, "description")
            .or_else(|| html::extract_og_content(&body, "description"))
            .ok_or(StrategyError::Rejected)
    }
}

/// Third-party summarizer service returning JSON
pub struct SummaryServiceStrategy {
    fetcher: Arc<PageFetcher>,
    endpoint: String,
}

impl SummaryServiceStrategy {
    pub fn new(fetcher: Arc<PageFetcher>, endpoint: String) -> Self {
        Self { fetcher, endpoint }
    }
}

#[async_trait]
impl SummaryStrategy for SummaryServiceStrategy {
    fn name(&self) -> &'static str {
        "summary-service"
    }

    async fn attempt(&self, url: &str) -> Result<String, StrategyError> {
        let request_url = format!("{}?url={}", self.endpoint, urlencoding::encode(url));
        let payload = self.fetcher.fetch_json(&request_url).await?;

        let data = payload.get("data").unwrap_or(&payload);
        ["summary", "description", "excerpt"]
            .iter()
            .find_map(|key| data.get(*key)?.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(StrategyError::Rejected)
    }
}

/// Raw text-node scraping of the page body
pub struct ReadableTextStrategy {
    fetcher: Arc<PageFetcher>,
}

impl ReadableTextStrategy {
    pub fn new(fetcher: Arc<PageFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SummaryStrategy for ReadableTextStrategy {
    fn name(&self) -> &'static str {
        "readable-text"
    }

    async fn attempt(&self, url: &str) -> Result<String, StrategyError> {
        let body = self.fetcher.fetch_html(url).await?;
        let text = html::extract_text_content(&body);
        if text.is_empty() {
            return Err(StrategyError::Rejected);
        }

        let mut cut = text.len().min(RAW_TEXT_BUDGET);
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        Ok(text[..cut].to_string())
    }
}
