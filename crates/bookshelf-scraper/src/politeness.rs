//! Per-origin request spacing.
//!
//! One gate is owned by the task that scrapes every source of a single
//! origin, so it never needs locking: the task awaits [`OriginGate::wait_turn`]
//! before each request and the gate sleeps off whatever is left of the
//! configured delay since the previous request.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct OriginGate {
    origin: String,
    min_delay: Duration,
    last_request: Option<Instant>,
    request_count: u64,
}

impl OriginGate {
    #[must_use]
    pub fn new(origin: &str, min_delay: Duration) -> Self {
        Self {
            origin: origin.to_owned(),
            min_delay,
            last_request: None,
            request_count: 0,
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of requests this gate has let through.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.request_count
    }

    /// How long the next request must still wait. Zero for the first request.
    #[must_use]
    pub fn remaining_delay(&self) -> Duration {
        match self.last_request {
            Some(last) => self.min_delay.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleeps until the origin may be hit again, then records the request.
    pub async fn wait_turn(&mut self) {
        let wait = self.remaining_delay();
        if !wait.is_zero() {
            tracing::debug!(
                origin = %self.origin,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "waiting for politeness delay"
            );
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
        self.request_count += 1;
    }
}
