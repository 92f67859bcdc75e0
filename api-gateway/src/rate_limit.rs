//! Per-client token bucket rate limiting
//!
//! Each client IP owns a bucket of `burst` tokens refilled at
//! `requests_per_second`. A request spends one token or is rejected with
//! 429. Requests without a known peer address share a single bucket.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::RateLimitSettings;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

/// Client table shared by all connections
#[derive(Debug)]
pub struct RateLimiter {
    settings: RateLimitSettings,
    clients: DashMap<Option<IpAddr>, Bucket>,
}

impl RateLimiter {
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            settings,
            clients: DashMap::new(),
        }
    }

    /// Spend one token for `client`, returning whether the request may proceed
    pub fn check(&self, client: Option<IpAddr>) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: Option<IpAddr>, now: Instant) -> bool {
        let capacity = f64::from(self.settings.burst);
        let mut bucket = self.clients.entry(client).or_insert(Bucket {
            tokens: capacity,
            last_refill: now,
            last_seen: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_refill);
        bucket.tokens =
            (bucket.tokens + elapsed.as_secs_f64() * self.settings.requests_per_second).min(capacity);
        bucket.last_refill = now;
        bucket.last_seen = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Forget clients idle longer than the configured TTL
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    fn sweep_at(&self, now: Instant) -> usize {
        let ttl = self.settings.idle_ttl();
        let before = self.clients.len();
        self.clients
            .retain(|_, bucket| now.saturating_duration_since(bucket.last_seen) <= ttl);
        before.saturating_sub(self.clients.len())
    }

    /// Number of tracked clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Periodically sweep idle clients until the task is aborted
    pub fn spawn_sweeper(self: Arc<Self>) -> JoinHandle<()> {
        let period = self.settings.sweep_interval();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let evicted = self.sweep();
                if evicted > 0 {
                    debug!(evicted, remaining = self.len(), "swept idle rate-limit clients");
                }
            }
        })
    }
}

/// Middleware rejecting requests whose client bucket is empty
pub async fn enforce(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if !limiter.check(client) {
        warn!(client = ?client, "rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(request).await
}
