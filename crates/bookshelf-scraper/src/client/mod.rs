//! HTTP client for server-rendered product listing pages.

mod listing;
mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::politeness::OriginGate;
use crate::rate_limit::retry_delay;

pub use listing::{SourceReport, SourceScrape};
pub use origin::extract_origin;
#[cfg(test)]
use origin::extract_domain;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// HTTP client for listing pages.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Every error carries the URL that was requested.
///
/// Transient errors (429, 5xx, timeouts, network failures) are automatically
/// retried with exponential backoff up to `max_retries` additional attempts.
/// Every attempt, retries included, passes through the caller's
/// [`OriginGate`].
pub struct HtmlClient {
    client: Client,
    accept_language: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff: `backoff_base_ms * 2^attempt`.
    backoff_base_ms: u64,
}

impl HtmlClient {
    /// Creates an `HtmlClient` with configured timeout, headers, and retry policy.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidConfig`] if `timeout_ms` is zero.
    /// - [`ScraperError::ClientBuild`] if the underlying `reqwest::Client`
    ///   cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_ms: u64,
        user_agent: &str,
        accept_language: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        if timeout_ms == 0 {
            return Err(ScraperError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        let timeout = Duration::from_millis(timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        Ok(Self {
            client,
            accept_language: accept_language.to_owned(),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches one listing page and returns its body as text, with automatic
    /// retry on transient errors.
    ///
    /// `gate` must belong to the URL's origin. It is awaited before the first
    /// attempt and before every retry, so retries keep the same spacing as
    /// ordinary page requests. A 429 is retried no sooner than its
    /// `Retry-After`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: `url` is not an absolute `http(s)` URL (not retried).
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Timeout`]: request timed out after all retries exhausted.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    pub async fn fetch_html(&self, url: &str, gate: &mut OriginGate) -> Result<String, ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        let referer = extract_origin(url);
        let mut attempt = 0u32;

        loop {
            gate.wait_turn().await;
            let err = match self.fetch_once(url, &referer).await {
                Ok(body) => return Ok(body),
                Err(err) => err,
            };
            let Some(delay) = retry_delay(&err, attempt, self.max_retries, self.backoff_base_ms)
            else {
                return Err(err);
            };
            tracing::warn!(
                url,
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "transient fetch error, retrying after backoff"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn fetch_once(&self, url: &str, referer: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .header(reqwest::header::REFERER, referer)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            return Err(ScraperError::RateLimited {
                url: url.to_owned(),
                domain: origin::extract_domain(url),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response.text().await.map_err(|e| transport_error(url, e))
    }
}

fn transport_error(url: &str, source: reqwest::Error) -> ScraperError {
    if source.is_timeout() {
        ScraperError::Timeout {
            url: url.to_owned(),
        }
    } else {
        ScraperError::Http {
            url: url.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
