//! Retrying request sender shared by the Spotify and metadata clients.
//!
//! `502 Bad Gateway` is retried after a fixed pause. On `429 Too Many
//! Requests` the `Retry-After` header is honoured unless it asks for a pause
//! longer than the policy allows, in which case the 429 is returned as an
//! error right away.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use tokio::time::sleep;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, the first request included.
    pub max_attempts: u32,
    /// Pause before retrying a 502.
    pub bad_gateway_backoff: Duration,
    /// Longest `Retry-After` that is waited out.
    pub max_retry_after: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, bad_gateway_backoff: Duration, max_retry_after: Duration) -> Self {
        Self {
            max_attempts,
            bad_gateway_backoff,
            max_retry_after,
        }
    }
}

/// Sends the request built by `build`, retrying on 502 and 429 as `policy`
/// allows. Any other status is passed through `error_for_status`.
pub async fn send_with_retry<F>(policy: &RetryPolicy, build: F) -> Result<Response, reqwest::Error>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;

    loop {
        attempt += 1;
        let response = build().send().await?;

        match response.status() {
            StatusCode::BAD_GATEWAY if attempt < policy.max_attempts => {
                debug!(attempt, "bad gateway, retrying");
                sleep(policy.bad_gateway_backoff).await;
                continue; // retry
            }
            StatusCode::TOO_MANY_REQUESTS if attempt < policy.max_attempts => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(Duration::from_secs(1));
                if retry_after > policy.max_retry_after {
                    warn!(
                        retry_after = retry_after.as_secs(),
                        "rate limit pause is abnormally long, giving up"
                    );
                    return response.error_for_status();
                }
                debug!(attempt, retry_after = retry_after.as_secs(), "rate limited, retrying");
                sleep(retry_after).await;
                continue; // retry
            }
            _ => return response.error_for_status(),
        }
    }
}
