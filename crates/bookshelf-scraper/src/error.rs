use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("rate limited by {domain} fetching {url} (retry after {retry_after_secs}s)")]
    RateLimited {
        url: String,
        domain: String,
        retry_after_secs: u64,
    },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid {field} selector \"{selector}\": {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("invalid scraper configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ScraperError {
    /// The URL the failure is about, when there is one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            ScraperError::Http { url, .. }
            | ScraperError::Timeout { url }
            | ScraperError::RateLimited { url, .. }
            | ScraperError::NotFound { url }
            | ScraperError::UnexpectedStatus { url, .. }
            | ScraperError::InvalidUrl { url, .. } => Some(url),
            _ => None,
        }
    }
}
