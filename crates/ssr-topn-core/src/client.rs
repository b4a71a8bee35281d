//! HTTP client with retry logic for the SpeedSkatingResults API
//!
//! One call fetches one (season, distance) Top-N page. Failed attempts
//! are retried with linearly increasing backoff.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Result, TopnError};
use crate::parser::{ResultsDocument, parse_results_document};
use crate::url::{API_BASE, TopnParams, build_topn_url};

/// Identifying User-Agent sent with every request
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ssr-topn/0.1; +https://speedskatingresults.com)";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Top-N endpoint (default: [`API_BASE`])
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Per-attempt request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Total attempts per request, including the first (default: 3)
    pub max_attempts: u32,
    /// Backoff base in milliseconds; attempt `n` waits `base * n` (default: 1000)
    pub backoff_base_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_secs: 30,
            max_attempts: 3,
            backoff_base_ms: 1000,
        }
    }
}

/// Linear backoff retry schedule
///
/// Attempts are numbered from 1. After a failed attempt `n`,
/// [`RetryPolicy::delay_after`] yields the wait before attempt `n + 1`, or
/// `None` once all attempts are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the next attempt, `None` when `attempt` was the last one
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            None
        } else {
            Some(self.base * attempt)
        }
    }
}

impl From<&ClientConfig> for RetryPolicy {
    fn from(config: &ClientConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.backoff_base_ms),
        )
    }
}

/// HTTP client wrapper for the Top-N endpoint
///
/// Handles request construction, the identifying User-Agent, per-attempt
/// timeouts and retries. Responses are parsed before being returned, so a
/// malformed body counts as a failed attempt.
pub struct SsrClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl SsrClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(TopnError::HttpError)?;

        Ok(Self {
            client,
            retry: RetryPolicy::from(&config),
            base_url: config.base_url,
        })
    }

    /// Full request URL for a parameter set
    pub fn url_for(&self, params: &TopnParams) -> String {
        build_topn_url(&self.base_url, params)
    }

    /// Fetch and parse one Top-N page
    ///
    /// # Errors
    /// `FetchFailed` once every attempt failed, wrapping the last error
    /// (`HttpError`, `StatusError` or `XmlError`).
    pub async fn fetch_topn(&self, params: &TopnParams) -> Result<ResultsDocument> {
        let url = self.url_for(params);
        let mut attempt = 1;

        loop {
            debug!(season = params.season, distance = params.distance, attempt, %url, "fetching top-n page");

            match self.fetch_once(&url).await {
                Ok(document) => return Ok(document),
                Err(e) => match self.retry.delay_after(attempt) {
                    Some(delay) => {
                        warn!(
                            season = params.season,
                            distance = params.distance,
                            attempt,
                            error = %e,
                            "top-n request failed, retrying in {:?}",
                            delay
                        );
                        sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        return Err(TopnError::FetchFailed {
                            season: params.season,
                            distance: params.distance,
                            url,
                            attempts: attempt,
                            source: Box::new(e),
                        });
                    }
                },
            }
        }
    }

    /// Perform a single attempt: GET, status check, XML parse
    async fn fetch_once(&self, url: &str) -> Result<ResultsDocument> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TopnError::HttpError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TopnError::StatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(TopnError::HttpError)?;
        parse_results_document(&body)
    }

    /// Get the retry schedule (for testing)
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }
}
