//! Remote analysis request budget
//!
//! A sliding-window limiter: request timestamps are kept in arrival order
//! and pruned to the trailing window on every check. The clock is injected
//! so tests can move time deterministically.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default requests allowed per window
pub const DEFAULT_MAX_REQUESTS: usize = 100;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced time
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        *self.current.lock() += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.current.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

/// Thread-safe reference to a clock
pub type SharedClock = Arc<dyn Clock>;

/// Sliding-window request limiter
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    clock: SharedClock,
    requests: Mutex<VecDeque<DateTime<Utc>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clock: Arc::new(SystemClock),
            requests: Mutex::new(VecDeque::new()),
        }
    }

    /// `max_requests` per trailing hour
    pub fn hourly(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::hours(1))
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn prune(requests: &mut VecDeque<DateTime<Utc>>, cutoff: DateTime<Utc>) {
        while requests.front().is_some_and(|&t| t <= cutoff) {
            requests.pop_front();
        }
    }

    /// Record a request if the window has room; false when the budget is spent
    pub fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let mut requests = self.requests.lock();
        Self::prune(&mut requests, now - self.window);

        if requests.len() >= self.max_requests {
            return false;
        }

        requests.push_back(now);
        true
    }

    /// Requests still available in the current window
    pub fn remaining(&self) -> usize {
        let now = self.clock.now();
        let mut requests = self.requests.lock();
        Self::prune(&mut requests, now - self.window);
        self.max_requests.saturating_sub(requests.len())
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::hourly(DEFAULT_MAX_REQUESTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter_at(start: DateTime<Utc>) -> (Arc<ManualClock>, RateLimiter) {
        let clock = Arc::new(ManualClock::new(start));
        let limiter = RateLimiter::default().with_clock(clock.clone());
        (clock, limiter)
    }

    #[test]
    fn test_budget_exhausts_at_limit() {
        let (clock, limiter) = limiter_at(Utc::now());

        for i in 0..100 {
            assert!(limiter.try_acquire(), "request {} refused", i + 1);
            clock.advance(Duration::seconds(1));
        }

        assert!(!limiter.try_acquire());
        assert_eq!(limiter.remaining(), 0);
    }

    #[test]
    fn test_capacity_restored_after_window() {
        let start = Utc::now();
        let (clock, limiter) = limiter_at(start);

        for _ in 0..100 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());

        clock.set(start + Duration::hours(1) + Duration::milliseconds(1));
        assert_eq!(limiter.remaining(), 100);
        assert!(limiter.try_acquire());
    }

    #[test]
    fn test_window_slides() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let limiter = RateLimiter::new(2, Duration::minutes(10)).with_clock(clock.clone());

        assert!(limiter.try_acquire());
        clock.advance(Duration::minutes(6));
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());

        // first request leaves the window, second is still inside
        clock.advance(Duration::minutes(5));
        assert_eq!(limiter.remaining(), 1);
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_refused_requests_are_not_recorded() {
        let start = Utc::now();
        let clock = Arc::new(ManualClock::new(start));
        let limiter = RateLimiter::new(1, Duration::minutes(1)).with_clock(clock.clone());

        assert!(limiter.try_acquire());
        for _ in 0..10 {
            assert!(!limiter.try_acquire());
        }

        clock.advance(Duration::minutes(1));
        assert!(limiter.try_acquire());
    }
}
