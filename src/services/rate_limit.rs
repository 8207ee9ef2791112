/// Sliding-window posting rate limiter backed by Redis
///
/// Weighted two-window counters: each author has one counter per window
/// index; the effective count blends the previous window by the fraction
/// of it still inside the sliding interval. The increment happens before
/// the quota check, so a rejected call still counts.
///
/// The limiter fails closed: Redis errors or timeouts deny the action
/// rather than admitting unlimited posting while the counter store is down.
use crate::config::RateLimitConfig;
use crate::models::RateLimitDecision;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::timeout;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Atomically count this call against the author's window and report
    /// whether it was within quota.
    async fn check_and_consume(&self, author_id: &str) -> RateLimitDecision;
}

/// Counter-store operations the limiter needs. Kept as a seam so the
/// deny-on-failure paths are drivable without a live Redis.
#[async_trait]
trait WindowCounterStore: Send + Sync {
    /// Increment the current-window counter, setting its TTL on first use,
    /// and return the post-increment count.
    async fn incr_current(&self, key: &str, ttl_secs: i64) -> Result<u64, String>;

    /// Read the previous-window counter (0 when absent or expired).
    async fn get_previous(&self, key: &str) -> Result<u64, String>;
}

struct RedisWindowCounters {
    redis: ConnectionManager,
}

#[async_trait]
impl WindowCounterStore for RedisWindowCounters {
    async fn incr_current(&self, key: &str, ttl_secs: i64) -> Result<u64, String> {
        // ConnectionManager clones share the underlying multiplexed connection
        let mut conn = self.redis.clone();

        let count: u64 = conn
            .incr(key, 1)
            .await
            .map_err(|e| format!("redis incr failed: {}", e))?;

        if count == 1 {
            let _: () = conn
                .expire(key, ttl_secs)
                .await
                .map_err(|e| format!("redis expire failed: {}", e))?;
        }

        Ok(count)
    }

    async fn get_previous(&self, key: &str) -> Result<u64, String> {
        let mut conn = self.redis.clone();

        let previous: Option<u64> = conn
            .get(key)
            .await
            .map_err(|e| format!("redis get failed: {}", e))?;

        Ok(previous.unwrap_or(0))
    }
}

pub struct RedisRateLimiter {
    counters: Arc<dyn WindowCounterStore>,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    pub fn new(redis: ConnectionManager, config: RateLimitConfig) -> Self {
        Self {
            counters: Arc::new(RedisWindowCounters { redis }),
            config,
        }
    }

    #[cfg(test)]
    fn with_counters(counters: Arc<dyn WindowCounterStore>, config: RateLimitConfig) -> Self {
        Self { counters, config }
    }

    async fn consume(&self, author_id: &str, now_secs: u64) -> Result<RateLimitDecision, String> {
        let window = self.config.window_seconds;
        let window_index = now_secs / window;
        let elapsed_in_window = now_secs % window;

        let current_key = format!("rate_limit:post:{}:{}", author_id, window_index);
        let previous_key = format!(
            "rate_limit:post:{}:{}",
            author_id,
            window_index.saturating_sub(1)
        );

        // Key must outlive the sliding interval it participates in
        let current = self
            .counters
            .incr_current(&current_key, (window * 2) as i64)
            .await?;

        let previous = self.counters.get_previous(&previous_key).await?;

        let effective = sliding_window_count(previous, current, elapsed_in_window, window);

        if effective <= self.config.max_requests as f64 {
            Ok(RateLimitDecision::allow())
        } else {
            Ok(RateLimitDecision::deny())
        }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check_and_consume(&self, author_id: &str) -> RateLimitDecision {
        let now_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let result = timeout(
            Duration::from_millis(self.config.redis_timeout_ms),
            self.consume(author_id, now_secs),
        )
        .await;

        match result {
            Ok(Ok(decision)) => decision,
            Ok(Err(e)) => {
                tracing::warn!(author_id, "rate limit check failed (denying): {}", e);
                RateLimitDecision::deny()
            }
            Err(_) => {
                tracing::warn!(
                    author_id,
                    timeout_ms = self.config.redis_timeout_ms,
                    "rate limit check timed out (denying)"
                );
                RateLimitDecision::deny()
            }
        }
    }
}

/// Effective request count over the sliding interval ending now.
///
/// The previous window contributes proportionally to how much of it the
/// sliding interval still covers.
fn sliding_window_count(previous: u64, current: u64, elapsed_in_window: u64, window: u64) -> f64 {
    let remaining_fraction = (window - elapsed_in_window) as f64 / window as f64;
    previous as f64 * remaining_fraction + current as f64
}
