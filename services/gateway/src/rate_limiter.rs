//! Rate limiting using governor's token buckets
//!
//! Each client address gets its own bucket. A larger process-wide bucket sits
//! behind them and only spends a token once the client's own check passed, so
//! one busy client cannot starve the rest.

use governor::{DefaultDirectRateLimiter, DefaultKeyedRateLimiter, Quota};
use std::num::NonZeroU32;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

// Fallbacks for zero values in configuration
const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(60).unwrap();
const DEFAULT_BURST_SIZE: NonZeroU32 = NonZeroU32::new(10).unwrap();
const DEFAULT_GLOBAL_REQUESTS_PER_MINUTE: NonZeroU32 = NonZeroU32::new(600).unwrap();
const DEFAULT_GLOBAL_BURST_SIZE: NonZeroU32 = NonZeroU32::new(100).unwrap();

/// Rate limiter for the gateway
pub struct RateLimiter {
    /// Process-wide bucket
    global_limiter: DefaultDirectRateLimiter,
    /// Buckets keyed by client address
    client_limiters: DefaultKeyedRateLimiter<String>,
    config: RateLimitConfig,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .field("tracked_clients", &self.client_limiters.len())
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        let client_quota = quota(
            config.requests_per_minute,
            config.burst_size,
            DEFAULT_REQUESTS_PER_MINUTE,
            DEFAULT_BURST_SIZE,
        );
        let global_quota = quota(
            config.global_requests_per_minute,
            config.global_burst_size,
            DEFAULT_GLOBAL_REQUESTS_PER_MINUTE,
            DEFAULT_GLOBAL_BURST_SIZE,
        );
        Self {
            global_limiter: governor::RateLimiter::direct(global_quota),
            client_limiters: governor::RateLimiter::keyed(client_quota),
            config,
        }
    }

    /// `true` when the request may proceed
    pub fn check_rate_limit(&self, client: &str) -> bool {
        if !self.config.enabled {
            return true;
        }

        if let Err(not_until) = self.client_limiters.check_key(&client.to_string()) {
            warn!(client, ?not_until, "Client rate limit exceeded");
            return false;
        }

        if self.global_limiter.check().is_err() {
            warn!(client, "Global rate limit exceeded");
            return false;
        }

        debug!(client, "Rate limit check passed");
        true
    }

    /// Drop buckets that have refilled completely
    pub fn retain_recent(&self) {
        self.client_limiters.retain_recent();
        self.client_limiters.shrink_to_fit();
    }

    /// Current rate limiting statistics
    #[must_use]
    pub fn stats(&self) -> RateLimitStats {
        RateLimitStats {
            tracked_clients: self.client_limiters.len(),
            requests_per_minute: self.config.requests_per_minute,
            burst_size: self.config.burst_size,
            global_requests_per_minute: self.config.global_requests_per_minute,
        }
    }
}

fn quota(
    requests_per_minute: u32,
    burst_size: u32,
    default_rate: NonZeroU32,
    default_burst: NonZeroU32,
) -> Quota {
    Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(default_rate))
        .allow_burst(NonZeroU32::new(burst_size).unwrap_or(default_burst))
}

/// Rate limiting statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RateLimitStats {
    pub tracked_clients: usize,
    pub requests_per_minute: u32,
    pub burst_size: u32,
    pub global_requests_per_minute: u32,
}
