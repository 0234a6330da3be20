//! HTTP fetching for extraction strategies
//!
//! One shared `reqwest` client with explicit timeout, redirect, and body
//! size limits. Every strategy attempt goes through this module so no
//! third-party service can stall bookmark creation past the configured
//! timeout.

use linkmark_core::StrategyError;
use std::time::Duration;
use tracing::debug;

/// Configuration for outbound page and service fetches
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Timeout applied to each request
    pub request_timeout: Duration,
    /// Maximum body size kept in memory
    pub max_content_size: usize,
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Whether to follow redirects
    pub follow_redirects: bool,
    /// Maximum number of redirects to follow
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(8),
            max_content_size: 2 * 1024 * 1024, // 2MB
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            follow_redirects: true,
            max_redirects: 5,
        }
    }
}

/// Shared HTTP fetcher used by all extraction strategies
pub struct PageFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl PageFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            })
            .user_agent(&config.user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch a page body as text, truncated to the configured size limit.
    pub async fn fetch_html(&self, url: &str) -> Result<String, StrategyError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html")
            .send()
            .await
            .map_err(|e| Self::request_error(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(length) = response.content_length() {
            if length > self.config.max_content_size as u64 {
                debug!(url, length, "response body over size limit, truncating");
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| StrategyError::UnusablePayload {
                details: e.to_string(),
            })?;

        if body.len() > self.config.max_content_size {
            let mut cut = self.config.max_content_size;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            Ok(body[..cut].to_string())
        } else {
            Ok(body)
        }
    }

    /// Fetch a JSON document from a service endpoint.
    pub async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, StrategyError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Self::request_error(&e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StrategyError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| StrategyError::UnusablePayload {
                details: e.to_string(),
            })
    }

    fn request_error(e: &reqwest::Error, url: &str) -> StrategyError {
        if e.is_timeout() {
            StrategyError::Timeout {
                url: url.to_string(),
            }
        } else if e.is_connect() {
            StrategyError::Connection {
                details: e.to_string(),
            }
        } else {
            StrategyError::Connection {
                details: format!("request error: {}", e),
            }
        }
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}
