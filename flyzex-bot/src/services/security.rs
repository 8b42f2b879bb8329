//! Sliding-window rate limiter for DM submissions.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Allows at most `burst` events per user inside `interval`.
pub struct RateLimitGuard {
    interval: Duration,
    burst: usize,
    events: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl RateLimitGuard {
    pub fn new(interval_secs: f64, burst: usize) -> Self {
        Self {
            interval: Duration::from_secs_f64(interval_secs.max(0.0)),
            burst: burst.max(1),
            events: Mutex::new(HashMap::new()),
        }
    }

    /// Records an attempt and reports whether it is allowed.
    pub async fn is_allowed(&self, user_id: &str) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        let now = Instant::now();
        let mut events = self.events.lock().await;
        let window = events.entry(user_id.to_string()).or_default();
        while let Some(front) = window.front() {
            if now.duration_since(*front) >= self.interval {
                window.pop_front();
            } else {
                break;
            }
        }
        if window.len() >= self.burst {
            return false;
        }
        window.push_back(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn allows_up_to_burst_then_blocks() {
        let guard = RateLimitGuard::new(60.0, 3);
        assert!(guard.is_allowed("u1").await);
        assert!(guard.is_allowed("u1").await);
        assert!(guard.is_allowed("u1").await);
        assert!(!guard.is_allowed("u1").await);
        // A different user has an independent window.
        assert!(guard.is_allowed("u2").await);
    }

    #[tokio::test]
    async fn zero_interval_disables_limiting() {
        let guard = RateLimitGuard::new(0.0, 1);
        for _ in 0..10 {
            assert!(guard.is_allowed("u1").await);
        }
    }
}
