//! Retry utilities for listing-page fetches.
//!
//! Exponential backoff for transient HTTP errors such as 429 responses, 5xx
//! statuses, and timeouts. Non-retriable errors (404, other 4xx, invalid
//! URLs) are propagated immediately.

use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`ScraperError::RateLimited`]: HTTP 429.
/// - [`ScraperError::Http`]: connection reset, DNS failure, TLS error.
/// - [`ScraperError::Timeout`]: the request exceeded the client timeout.
/// - [`ScraperError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else (404, 403, malformed URLs, bad selectors) would fail the
/// same way on the next attempt.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http { .. } | ScraperError::Timeout { .. } => {
            true
        }
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// How long to wait before retrying after `err`, or `None` when the error
/// is final.
///
/// The backoff is `backoff_base_ms * 2^attempt` milliseconds. A 429 waits at
/// least as long as its `Retry-After`. `attempt` counts retries already made,
/// so at most `max_retries` retries follow the first try.
///
/// # Backoff schedule (example with `backoff_base_ms = 500`)
///
/// | Attempt | Sleep before next attempt |
/// |---------|--------------------------|
/// | 0 (initial) | 500 ms |
/// | 1 (first retry) | 1000 ms |
/// | 2 (second retry) | 2000 ms |
///
/// The caller still awaits the origin's politeness gate before each attempt,
/// so the real gap is never shorter than the configured inter-request delay.
pub(crate) fn retry_delay(
    err: &ScraperError,
    attempt: u32,
    max_retries: u32,
    backoff_base_ms: u64,
) -> Option<Duration> {
    if !is_retriable(err) || attempt >= max_retries {
        return None;
    }
    let backoff = Duration::from_millis(backoff_base_ms.saturating_mul(1u64 << attempt.min(62)));
    match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => Some(backoff.max(Duration::from_secs(*retry_after_secs))),
        _ => Some(backoff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limited(retry_after_secs: u64) -> ScraperError {
        ScraperError::RateLimited {
            url: "https://readstation.vn/sach-tieng-viet".to_owned(),
            domain: "readstation.vn".to_owned(),
            retry_after_secs,
        }
    }

    fn status(status: u16) -> ScraperError {
        ScraperError::UnexpectedStatus {
            status,
            url: "https://readstation.vn/sach-tieng-viet".to_owned(),
        }
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let err = status(503);
        assert_eq!(retry_delay(&err, 0, 3, 500), Some(Duration::from_millis(500)));
        assert_eq!(retry_delay(&err, 1, 3, 500), Some(Duration::from_millis(1000)));
        assert_eq!(retry_delay(&err, 2, 3, 500), Some(Duration::from_millis(2000)));
    }

    #[test]
    fn stops_after_max_retries() {
        assert_eq!(retry_delay(&status(503), 2, 2, 500), None);
        assert_eq!(retry_delay(&rate_limited(0), 0, 0, 500), None);
    }

    #[test]
    fn rate_limit_waits_for_retry_after() {
        assert_eq!(
            retry_delay(&rate_limited(30), 0, 2, 500),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            retry_delay(&rate_limited(0), 1, 2, 500),
            Some(Duration::from_millis(1000))
        );
    }

    #[test]
    fn retries_server_errors_but_not_client_errors() {
        assert!(is_retriable(&status(503)));
        assert!(!is_retriable(&status(403)));
        assert_eq!(retry_delay(&status(403), 0, 3, 0), None);
    }

    #[test]
    fn does_not_retry_not_found() {
        let err = ScraperError::NotFound {
            url: "https://readstation.vn/sach-tieng-viet?page=9".to_owned(),
        };
        assert_eq!(retry_delay(&err, 0, 3, 0), None);
    }

    #[test]
    fn large_attempt_saturates_instead_of_overflowing() {
        assert!(retry_delay(&status(500), 100, u32::MAX, u64::MAX).is_some());
    }
}
