use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

/// Source of "now" in milliseconds, injectable so tests can step across windows.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

#[derive(Debug, Clone, Copy)]
struct RateBucket {
    tokens: u32,
    last_refill_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub remaining: u32,
}

/// Per-route budget. Keys are `"<tag>:<client>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteLimit {
    pub tag: &'static str,
    pub limit: u32,
    pub window: Duration,
}

impl RouteLimit {
    pub const AI_GENERATE: Self = Self::per_minute("ai-gen", 10);
    pub const AI_FORM_TIPS: Self = Self::per_minute("ai-tips", 10);
    pub const EXERCISES: Self = Self::per_minute("exercises", 60);
    pub const NUTRITION_SEARCH: Self = Self::per_minute("nutri-search", 30);
    pub const NUTRITION_PARSE: Self = Self::per_minute("nutri-parse", 20);

    const fn per_minute(tag: &'static str, limit: u32) -> Self {
        Self {
            tag,
            limit,
            window: Duration::from_secs(60),
        }
    }

    pub fn key_for(&self, client_key: &str) -> String {
        format!("{}:{}", self.tag, client_key)
    }
}

/// Fixed-window refill limiter.
///
/// A bucket starts full. Every call adds `limit` tokens for each whole window
/// elapsed since the previous call (capped at `limit`) and then moves the
/// refill mark to now, so time left over from a partial window is dropped.
/// Buckets are never evicted.
#[derive(Clone)]
pub struct RateLimiter {
    buckets: Arc<DashMap<String, RateBucket>>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            clock,
        }
    }

    pub fn check_and_consume(&self, key: &str, limit: u32, window: Duration) -> RateDecision {
        let now = self.clock.now_ms();
        let window_ms = (window.as_millis() as u64).max(1);

        let mut bucket = self.buckets.entry(key.to_string()).or_insert(RateBucket {
            tokens: limit,
            last_refill_at: now,
        });

        let elapsed = now.saturating_sub(bucket.last_refill_at);
        let whole_windows = elapsed / window_ms;
        let refill = whole_windows.saturating_mul(u64::from(limit));
        bucket.tokens = (u64::from(bucket.tokens) + refill).min(u64::from(limit)) as u32;
        bucket.last_refill_at = now;

        if bucket.tokens == 0 {
            tracing::debug!(key, limit, "rate limit denied");
            return RateDecision {
                allowed: false,
                remaining: 0,
            };
        }

        bucket.tokens -= 1;
        RateDecision {
            allowed: true,
            remaining: bucket.tokens,
        }
    }

    pub fn check_route(&self, route: RouteLimit, client_key: &str) -> RateDecision {
        self.check_and_consume(&route.key_for(client_key), route.limit, route.window)
    }

    #[cfg(test)]
    fn tracked_keys(&self) -> usize {
        self.buckets.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock that only moves when told to.
    #[derive(Debug, Default)]
    struct ManualClock {
        now: AtomicU64,
    }

    impl ManualClock {
        fn new(start_ms: u64) -> Self {
            Self {
                now: AtomicU64::new(start_ms),
            }
        }

        fn set(&self, ms: u64) {
            self.now.store(ms, Ordering::SeqCst);
        }

        fn advance(&self, by: Duration) {
            self.now.fetch_add(by.as_millis() as u64, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.now.load(Ordering::SeqCst)
        }
    }

    fn limiter_at(start_ms: u64) -> (RateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start_ms));
        (RateLimiter::with_clock(clock.clone()), clock)
    }

    const SECOND: Duration = Duration::from_millis(1000);

    #[test]
    fn test_two_per_second_scenario() {
        let (limiter, clock) = limiter_at(0);

        assert_eq!(
            limiter.check_and_consume("ip", 2, SECOND),
            RateDecision { allowed: true, remaining: 1 }
        );
        assert_eq!(
            limiter.check_and_consume("ip", 2, SECOND),
            RateDecision { allowed: true, remaining: 0 }
        );
        assert_eq!(
            limiter.check_and_consume("ip", 2, SECOND),
            RateDecision { allowed: false, remaining: 0 }
        );

        clock.set(1001);
        assert_eq!(
            limiter.check_and_consume("ip", 2, SECOND),
            RateDecision { allowed: true, remaining: 1 }
        );
    }

    #[test]
    fn test_first_limit_calls_pass_then_deny() {
        for limit in [1u32, 3, 10, 60] {
            let (limiter, _clock) = limiter_at(5_000);
            for _ in 0..limit {
                assert!(limiter.check_and_consume("k", limit, SECOND).allowed);
            }
            assert!(!limiter.check_and_consume("k", limit, SECOND).allowed);
        }
    }

    #[test]
    fn test_long_idle_refill_is_capped() {
        let (limiter, clock) = limiter_at(0);
        limiter.check_and_consume("k", 3, SECOND);

        clock.advance(Duration::from_secs(3600));
        let decision = limiter.check_and_consume("k", 3, SECOND);
        assert_eq!(decision, RateDecision { allowed: true, remaining: 2 });

        let passed = (0..10)
            .filter(|_| limiter.check_and_consume("k", 3, SECOND).allowed)
            .count();
        assert_eq!(passed, 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let (limiter, _clock) = limiter_at(0);
        assert!(limiter.check_and_consume("a", 1, SECOND).allowed);
        assert!(!limiter.check_and_consume("a", 1, SECOND).allowed);
        assert!(limiter.check_and_consume("b", 1, SECOND).allowed);
        assert_eq!(limiter.tracked_keys(), 2);
    }

    #[test]
    fn test_partial_window_progress_is_discarded() {
        let (limiter, clock) = limiter_at(0);
        assert!(limiter.check_and_consume("k", 1, SECOND).allowed);

        clock.advance(Duration::from_millis(600));
        assert!(!limiter.check_and_consume("k", 1, SECOND).allowed);

        // 1200ms since the first call, but only 600ms since the last one.
        clock.advance(Duration::from_millis(600));
        assert!(!limiter.check_and_consume("k", 1, SECOND).allowed);

        clock.advance(SECOND);
        assert!(limiter.check_and_consume("k", 1, SECOND).allowed);
    }

    #[test]
    fn test_zero_limit_always_denies() {
        let (limiter, _clock) = limiter_at(0);
        assert_eq!(
            limiter.check_and_consume("k", 0, SECOND),
            RateDecision { allowed: false, remaining: 0 }
        );
    }

    #[test]
    fn test_route_keys_are_prefixed_by_tag() {
        let (limiter, _clock) = limiter_at(0);
        assert_eq!(RouteLimit::AI_GENERATE.key_for("10.0.0.1"), "ai-gen:10.0.0.1");

        for _ in 0..RouteLimit::AI_GENERATE.limit {
            assert!(limiter.check_route(RouteLimit::AI_GENERATE, "10.0.0.1").allowed);
        }
        assert!(!limiter.check_route(RouteLimit::AI_GENERATE, "10.0.0.1").allowed);
        assert!(limiter.check_route(RouteLimit::AI_FORM_TIPS, "10.0.0.1").allowed);
    }
}
