//! Fixed-window request limiter keyed by caller identity.

use chrono::{DateTime, Duration, Utc};
use learnflow_config::RateLimitConfig;
use log::debug;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Request admitted; the counter was incremented.
    Allowed,
    /// Budget exhausted for the current window.
    Limited { reset_at: DateTime<Utc> },
}

#[derive(Debug)]
struct Bucket {
    count: u32,
    window_started_at: DateTime<Utc>,
}

/// Per-identity fixed-window counter. The bucket map is bounded: once it
/// grows past the sweep threshold, expired buckets are evicted before a new
/// identity is inserted.
pub struct RateLimiter {
    buckets: Mutex<HashMap<String, Bucket>>,
    window: Duration,
    max_requests: u32,
    sweep_threshold: usize,
}

impl RateLimiter {
    /// Create a limiter from config.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            window: Duration::seconds(config.window_secs as i64),
            max_requests: config.max_requests,
            sweep_threshold: config.sweep_threshold,
        }
    }

    /// Check and count one request for the identity.
    pub fn check(&self, identity: &str) -> Decision {
        self.check_at(identity, Utc::now())
    }

    fn check_at(&self, identity: &str, now: DateTime<Utc>) -> Decision {
        let mut buckets = self.buckets.lock();

        if !buckets.contains_key(identity) && buckets.len() >= self.sweep_threshold {
            let window = self.window;
            buckets.retain(|_, bucket| now - bucket.window_started_at < window);
            debug!(
                "swept expired rate limit buckets (remaining={})",
                buckets.len()
            );
        }

        let bucket = buckets.entry(identity.to_string()).or_insert(Bucket {
            count: 0,
            window_started_at: now,
        });

        if now - bucket.window_started_at >= self.window {
            bucket.count = 0;
            bucket.window_started_at = now;
        }

        if bucket.count >= self.max_requests {
            return Decision::Limited {
                reset_at: bucket.window_started_at + self.window,
            };
        }

        bucket.count += 1;
        Decision::Allowed
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.buckets.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnflow_config::RateLimitConfig;
    use pretty_assertions::assert_eq;

    fn limiter(max_requests: u32, sweep_threshold: usize) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            window_secs: 60,
            max_requests,
            sweep_threshold,
        })
    }

    #[test]
    fn admits_up_to_budget_then_limits() {
        let limiter = limiter(10, 1024);
        let now = Utc::now();
        for _ in 0..10 {
            assert_eq!(limiter.check_at("alice", now), Decision::Allowed);
        }
        let Decision::Limited { reset_at } = limiter.check_at("alice", now) else {
            panic!("expected limited");
        };
        assert_eq!(reset_at, now + Duration::seconds(60));
    }

    #[test]
    fn identities_are_counted_independently() {
        let limiter = limiter(1, 1024);
        let now = Utc::now();
        assert_eq!(limiter.check_at("alice", now), Decision::Allowed);
        assert_eq!(limiter.check_at("bob", now), Decision::Allowed);
        assert!(matches!(
            limiter.check_at("alice", now),
            Decision::Limited { .. }
        ));
    }

    #[test]
    fn window_elapse_resets_the_counter() {
        let limiter = limiter(1, 1024);
        let now = Utc::now();
        assert_eq!(limiter.check_at("alice", now), Decision::Allowed);
        assert!(matches!(
            limiter.check_at("alice", now),
            Decision::Limited { .. }
        ));
        let later = now + Duration::seconds(61);
        assert_eq!(limiter.check_at("alice", later), Decision::Allowed);
        assert!(matches!(
            limiter.check_at("alice", later),
            Decision::Limited { .. }
        ));
    }

    #[test]
    fn sweep_evicts_expired_buckets_past_threshold() {
        let limiter = limiter(10, 2);
        let start = Utc::now();
        assert_eq!(limiter.check_at("alice", start), Decision::Allowed);
        assert_eq!(limiter.check_at("bob", start), Decision::Allowed);
        assert_eq!(limiter.tracked_identities(), 2);

        // Both buckets are expired by the time a third identity arrives.
        let later = start + Duration::seconds(120);
        assert_eq!(limiter.check_at("carol", later), Decision::Allowed);
        assert_eq!(limiter.tracked_identities(), 1);
    }

    #[test]
    fn sweep_keeps_live_buckets() {
        let limiter = limiter(10, 2);
        let start = Utc::now();
        assert_eq!(limiter.check_at("alice", start), Decision::Allowed);
        assert_eq!(limiter.check_at("bob", start), Decision::Allowed);

        let shortly_after = start + Duration::seconds(10);
        assert_eq!(limiter.check_at("carol", shortly_after), Decision::Allowed);
        assert_eq!(limiter.tracked_identities(), 3);
    }
}
