use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Process-wide gate spacing outbound calls at least `min_interval` apart.
///
/// All callers share one timeline. Waiters are released in arrival order
/// because the tokio mutex is fair and the delay is taken while holding it.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// Suspends until a dispatch is permitted, then records it.
    pub async fn acquire(&self) {
        let mut last = self.last_dispatch.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "rate limiter delaying dispatch");
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }

    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub async fn last_dispatch(&self) -> Option<Instant> {
        *self.last_dispatch.lock().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();

        limiter.acquire().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.last_dispatch().await, Some(start));
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_acquires_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(1200));
        let mut released = Vec::new();

        for _ in 0..4 {
            limiter.acquire().await;
            released.push(Instant::now());
        }

        for pair in released.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(1200));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn idle_gap_longer_than_interval_needs_no_wait() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        limiter.acquire().await;
        tokio::time::advance(Duration::from_secs(3)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_share_one_timeline() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(1)));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    Instant::now()
                })
            })
            .collect();

        let mut released = Vec::new();
        for handle in handles {
            released.push(handle.await.expect("task should not panic"));
        }
        released.sort();

        assert_eq!(released[0] - start, Duration::ZERO);
        assert!(released[1] - released[0] >= Duration::from_secs(1));
        assert!(released[2] - released[1] >= Duration::from_secs(1));
    }
}
