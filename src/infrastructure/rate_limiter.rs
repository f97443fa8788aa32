//! Per-client request rate limiting
//!
//! Sliding (non-grid-aligned) windows: each client's window starts at
//! its first request and is replaced, not re-aligned, once its age
//! exceeds the window length. A burst spanning a window boundary can
//! therefore admit up to twice the ceiling across the boundary; this is
//! documented accepted behavior, not a bug.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::RwLock;
use tracing::debug;

use crate::config::RateLimitConfig;

/// One rate-limit bucket: requests counted since `window_start`.
#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    /// Unix timestamp (seconds) of the first request in this window.
    window_start: u64,
    count: u32,
}

/// In-memory request limiter keyed by client address.
///
/// Owned by the orchestrator's construction scope and injected, so tests
/// can supply their own instance and configuration. Same-key updates are
/// serialized under the write lock; distinct keys cannot corrupt each
/// other's counters.
pub struct RequestWindowLimiter {
    windows: RwLock<HashMap<String, ClientWindow>>,
    config: RateLimitConfig,
    /// Denied-request counter, exposed for logging.
    denied: AtomicU64,
}

impl RequestWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            config,
            denied: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Record one request for `client_key` and report whether it is
    /// admitted. A denied request still counts toward the window.
    pub async fn check_and_record(&self, client_key: &str) -> bool {
        if !self.config.enabled {
            return true;
        }
        let allowed = self.record_at(client_key, current_time_secs()).await;
        if !allowed {
            self.denied.fetch_add(1, Ordering::Relaxed);
        }
        allowed
    }

    /// Total requests denied since construction.
    pub fn denied_total(&self) -> u64 {
        self.denied.load(Ordering::Relaxed)
    }

    /// Drop windows old enough that they no longer constrain anything.
    ///
    /// Without this the table grows one entry per distinct client for
    /// the life of the process; a background worker calls it on an
    /// interval.
    pub async fn sweep(&self) {
        let now = current_time_secs();
        let window = self.config.window_seconds;
        let mut windows = self.windows.write().await;
        let before = windows.len();
        windows.retain(|_, w| now.saturating_sub(w.window_start) <= window);
        let evicted = before - windows.len();
        if evicted > 0 {
            debug!(evicted, remaining = windows.len(), "swept stale client windows");
        }
    }

    async fn record_at(&self, client_key: &str, now: u64) -> bool {
        let mut windows = self.windows.write().await;
        let entry = windows.entry(client_key.to_string());

        let window = entry
            .and_modify(|w| {
                if now.saturating_sub(w.window_start) > self.config.window_seconds {
                    // Expired: replace, don't increment.
                    w.window_start = now;
                    w.count = 1;
                } else {
                    w.count += 1;
                }
            })
            .or_insert(ClientWindow {
                window_start: now,
                count: 1,
            });

        window.count <= self.config.max_requests
    }
}

pub(crate) fn current_time_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
