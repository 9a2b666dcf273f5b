//! Per-source token-bucket rate limiting for the contact endpoint.
//!
//! The form is public and unauthenticated, so a small per-IP budget keeps a
//! stuck or hostile client from turning the relay into a spam cannon.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Burst allowance: a source can send this many back-to-back before the
/// refill rate takes over.
const BURST: f64 = 3.0;

struct Bucket {
    tokens: f64,
    last_update: Instant,
}

pub struct RateLimiter {
    per_minute: f64,
    buckets: RwLock<HashMap<String, Bucket>>,
}

impl RateLimiter {
    pub fn new(per_minute: f64) -> Self {
        Self {
            per_minute: per_minute.max(0.0),
            buckets: RwLock::new(HashMap::new()),
        }
    }

    pub fn check(&self, source: &str) -> bool {
        self.check_at(source, Instant::now())
    }

    /// Take one token for `source` if available. Time is injected so tests
    /// do not have to sleep.
    pub fn check_at(&self, source: &str, now: Instant) -> bool {
        if self.per_minute <= 0.0 {
            return false;
        }
        let refill_per_sec = self.per_minute / 60.0;

        let mut buckets = self.buckets.write();
        let bucket = buckets.entry(source.to_string()).or_insert(Bucket {
            tokens: BURST,
            last_update: now,
        });

        let elapsed = now.saturating_duration_since(bucket.last_update);
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * refill_per_sec).min(BURST);
        bucket.last_update = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drop buckets that have fully refilled; called opportunistically so
    /// the map does not grow with every visitor ever seen.
    pub fn prune(&self, now: Instant) {
        let refill_per_sec = self.per_minute / 60.0;
        let full_after = if refill_per_sec > 0.0 {
            Duration::from_secs_f64(BURST / refill_per_sec)
        } else {
            return;
        };

        self.buckets
            .write()
            .retain(|_, b| now.saturating_duration_since(b.last_update) < full_after);
    }
}

#[cfg(test)]
mod tests {
    use super::{BURST, RateLimiter};
    use std::time::{Duration, Instant};

    #[test]
    fn burst_then_reject() {
        let limiter = RateLimiter::new(60.0);
        let now = Instant::now();
        for _ in 0..BURST as usize {
            assert!(limiter.check_at("1.2.3.4", now));
        }
        assert!(!limiter.check_at("1.2.3.4", now));
    }

    #[test]
    fn tokens_refill_over_time() {
        let limiter = RateLimiter::new(60.0); // one per second
        let t0 = Instant::now();
        for _ in 0..BURST as usize {
            assert!(limiter.check_at("a", t0));
        }
        assert!(!limiter.check_at("a", t0));
        assert!(limiter.check_at("a", t0 + Duration::from_secs(1)));
    }

    #[test]
    fn sources_are_independent() {
        let limiter = RateLimiter::new(60.0);
        let now = Instant::now();
        for _ in 0..BURST as usize {
            assert!(limiter.check_at("a", now));
        }
        assert!(!limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
    }

    #[test]
    fn zero_rate_rejects_everything() {
        let limiter = RateLimiter::new(0.0);
        assert!(!limiter.check_at("a", Instant::now()));
    }

    #[test]
    fn prune_removes_idle_buckets() {
        let limiter = RateLimiter::new(60.0);
        let t0 = Instant::now();
        assert!(limiter.check_at("a", t0));
        limiter.prune(t0 + Duration::from_secs(60));
        assert!(limiter.buckets.read().is_empty());
    }
}
