//! Minimum-interval spacing for upstream call initiation.
//!
//! The upstream search API tolerates roughly one call per second on the
//! free tier, so the gateway spaces call *initiations* at least
//! [`DEFAULT_MIN_INTERVAL`] apart, process-wide. Requests that hit the
//! response cache never touch the throttle.
//!
//! The last-call instant lives behind a `tokio::sync::Mutex` and the lock
//! is held across the wait, making the check-and-update atomic: two
//! requests that miss the cache concurrently cannot both observe a stale
//! instant and fire closer together than the interval. Only initiation
//! spacing is serialized — in-flight calls may still overlap.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::telemetry;

/// Default spacing between upstream call initiations.
///
/// 1.1 s leaves headroom over the upstream's one-call-per-second limit.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1100);

/// Process-wide spacing of upstream call initiations.
pub struct Throttle {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until at least `min_interval` has passed since the previous
    /// acquisition, then record the current instant.
    ///
    /// The first acquisition returns immediately. Suspends only the calling
    /// task; the wait is recorded in
    /// [`THROTTLE_WAIT_SECONDS`](crate::telemetry::THROTTLE_WAIT_SECONDS).
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                metrics::histogram!(telemetry::THROTTLE_WAIT_SECONDS)
                    .record(wait.as_secs_f64());
                tracing::debug!(wait_ms = wait.as_millis() as u64, "throttling upstream call");
                tokio::time::sleep(wait).await;
            }
        }
        *last_call = Some(Instant::now());
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
