//! Backing off when GitHub reports an exhausted rate limit.
//!
//! GitHub answers with `403 Forbidden` and `X-RateLimit-Remaining: 0` once the quota is
//! used up. `X-RateLimit-Reset` then holds the UTC epoch second at which the window
//! resets. A 403 without those headers is a real permission failure and is left alone.

use std::time::Duration;

use chrono::{DateTime, Utc};
use http::{HeaderMap, StatusCode};
use tracing::warn;

#[cfg(test)]
#[path = "rate_limit_tests.rs"]
mod rate_limit_tests;

pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Returns how long to wait before the request may be sent again, or `None` when the
/// response is not a rate-limit rejection.
pub fn backoff_for(
    status: StatusCode,
    headers: &HeaderMap,
    now: DateTime<Utc>,
    margin: Duration,
) -> Option<Duration> {
    if status != StatusCode::FORBIDDEN {
        return None;
    }

    let remaining: u64 = header_value(headers, RATE_LIMIT_REMAINING_HEADER)?;
    if remaining != 0 {
        return None;
    }

    // Without a usable reset time the window is assumed to reset now.
    let reset: i64 =
        header_value(headers, RATE_LIMIT_RESET_HEADER).unwrap_or_else(|| now.timestamp());
    let until_reset = reset.saturating_sub(now.timestamp()).max(0) as u64;

    Some(Duration::from_secs(until_reset) + margin)
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

pub struct RateLimitGuard {
    margin: Duration,
}

impl RateLimitGuard {
    pub fn new(margin: Duration) -> Self {
        Self { margin }
    }

    /// Sleeps until the rate-limit window resets if the response says the quota is
    /// exhausted. Returns `true` when it slept, in which case the request should be
    /// sent again.
    pub async fn pause_if_exhausted(
        &self,
        status: StatusCode,
        headers: &HeaderMap,
        now: DateTime<Utc>,
    ) -> bool {
        match backoff_for(status, headers, now, self.margin) {
            Some(wait) => {
                warn!(
                    wait_seconds = wait.as_secs(),
                    "Rate limit exceeded. Sleeping for {} seconds.",
                    wait.as_secs()
                );
                tokio::time::sleep(wait).await;
                true
            }
            None => false,
        }
    }
}
