//! Fixed-delay pacing between page runs.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

/// Waits a fixed delay, plus optional uniform jitter, after every page
/// run. The delay applies even when a page produced zero records so
/// the request cadence against upstream stays flat.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
    jitter_ms: u64,
}

impl Pacer {
    pub fn new(delay_ms: u64, jitter_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            jitter_ms,
        }
    }

    /// Sleeps for the configured delay plus a random jitter share.
    pub async fn pause(&self) {
        let jitter_ms = if self.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=self.jitter_ms)
        };

        let wait = self.delay + Duration::from_millis(jitter_ms);
        if wait.is_zero() {
            return;
        }

        debug!(wait_ms = wait.as_millis() as u64, "pacing before next run");
        tokio::time::sleep(wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn pause_waits_the_configured_delay() {
        let pacer = Pacer::new(1_000, 0);

        let started = tokio::time::Instant::now();
        pacer.pause().await;

        assert_eq!(started.elapsed(), Duration::from_millis(1_000));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_returns_immediately() {
        let pacer = Pacer::new(0, 0);

        let started = tokio::time::Instant::now();
        pacer.pause().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn jitter_stays_within_its_bound() {
        let pacer = Pacer::new(100, 250);

        let started = tokio::time::Instant::now();
        pacer.pause().await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed <= Duration::from_millis(350));
    }
}
