//! Client-side request throttling
//!
//! Each service host gets its own token bucket: the core API, the trunking
//! host and the rest are throttled independently, and a verbatim next-page
//! locator is charged to whichever host it points at. Throttling only
//! delays dispatch; it never retries or drops a request.

use governor::{DefaultKeyedRateLimiter, Quota};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use url::Url;

/// Per-host request budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Requests per second allowed to each host
    pub requests_per_second: u32,
    /// Requests a host may receive back to back before throttling starts
    pub burst_size: u32,
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Zero values are raised to one
    fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second).allow_burst(burst)
    }
}

/// Token buckets keyed by `host:port`
#[derive(Clone)]
pub struct HostRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
}

impl HostRateLimiter {
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(DefaultKeyedRateLimiter::keyed(config.quota())),
        }
    }

    /// Wait until `url`'s host has budget for one more request
    pub async fn wait_for(&self, url: &Url) {
        self.limiter.until_key_ready(&host_key(url)).await;
    }
}

impl std::fmt::Debug for HostRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRateLimiter")
            .field("hosts", &self.limiter.len())
            .finish()
    }
}

fn host_key(url: &Url) -> String {
    format!(
        "{}:{}",
        url.host_str().unwrap_or_default(),
        url.port_or_known_default().unwrap_or_default()
    )
}
