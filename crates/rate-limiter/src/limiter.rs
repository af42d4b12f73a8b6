//! Sliding-window request log keyed by user id.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Per-user request limiter.
///
/// Each user owns an ordered log of the instants at which requests were
/// allowed. A request is allowed while fewer than `max_requests` entries
/// fall inside the trailing `window`. Rejected requests are not recorded.
///
/// Cloning is cheap and shares the underlying map.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<i64, VecDeque<Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        info!(
            "Rate limiter initialized (max_requests={}, window={:?})",
            max_requests, window
        );

        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Check and record a request made now.
    pub async fn allow(&self, user_id: i64) -> bool {
        self.allow_at(user_id, Instant::now()).await
    }

    /// Check and record a request made at `now`.
    #[instrument(skip(self, now))]
    pub async fn allow_at(&self, user_id: i64, now: Instant) -> bool {
        let mut windows = self.windows.lock().await;
        let log = windows.entry(user_id).or_default();

        self.evict(log, now);

        if log.len() >= self.max_requests {
            debug!("Rejected request for user {} ({} in window)", user_id, log.len());
            return false;
        }

        log.push_back(now);
        debug!("Allowed request for user {} ({} in window)", user_id, log.len());
        true
    }

    /// Requests the user may still make at `now`.
    pub async fn remaining_at(&self, user_id: i64, now: Instant) -> usize {
        let windows = self.windows.lock().await;
        let used = windows
            .get(&user_id)
            .map(|log| log.iter().filter(|t| self.in_window(**t, now)).count())
            .unwrap_or(0);
        self.max_requests.saturating_sub(used)
    }

    /// Time until the user's next request would be allowed, if currently limited.
    pub async fn retry_after(&self, user_id: i64, now: Instant) -> Option<Duration> {
        let windows = self.windows.lock().await;
        let log = windows.get(&user_id)?;

        let live: Vec<Instant> = log
            .iter()
            .copied()
            .filter(|t| self.in_window(*t, now))
            .collect();
        if self.max_requests == 0 || live.len() < self.max_requests {
            return None;
        }

        // The slot frees once the oldest counted entry leaves the window.
        let oldest = live[live.len() - self.max_requests];
        Some((oldest + self.window).saturating_duration_since(now))
    }

    /// Number of users with a request log.
    pub async fn tracked_users(&self) -> usize {
        self.windows.lock().await.len()
    }

    /// Drop logs whose entries have all left the window.
    pub async fn prune(&self, now: Instant) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();

        windows.retain(|_, log| {
            self.evict(log, now);
            !log.is_empty()
        });

        before - windows.len()
    }

    /// Spawn a background task that periodically prunes idle users.
    pub fn spawn_cleanup(&self, interval: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let removed = limiter.prune(Instant::now()).await;
                if removed > 0 {
                    debug!(
                        "Pruned {} idle rate limit windows, {} users still tracked",
                        removed,
                        limiter.tracked_users().await
                    );
                }
            }
        })
    }

    fn evict(&self, log: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = log.front() {
            if self.in_window(oldest, now) {
                break;
            }
            log.pop_front();
        }
    }

    fn in_window(&self, at: Instant, now: Instant) -> bool {
        match now.checked_sub(self.window) {
            Some(window_start) => at >= window_start,
            None => true,
        }
    }
}
