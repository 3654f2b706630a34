//! Backend health monitor
//!
//! Answers "is the backend up?" without a round trip per caller. The first
//! probe result is memoized until `invalidate()` is called, or until the
//! optional TTL expires.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::backend::Backend;

/// Memoized probe result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthStatus {
    pub available: bool,
    pub checked_at: Instant,
}

impl HealthStatus {
    fn is_fresh(&self, ttl: Option<Duration>) -> bool {
        match ttl {
            Some(ttl) => self.checked_at.elapsed() < ttl,
            None => true,
        }
    }
}

/// Cached liveness view of one backend
pub struct HealthMonitor {
    backend: Arc<dyn Backend>,
    ttl: Option<Duration>,
    // Held across the probe so concurrent callers share one request
    cached: Mutex<Option<HealthStatus>>,
}

impl HealthMonitor {
    /// Monitor that keeps its first answer for the process lifetime
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_ttl(backend, None)
    }

    /// Monitor whose answer expires after `ttl`
    pub fn with_ttl(backend: Arc<dyn Backend>, ttl: Option<Duration>) -> Self {
        Self {
            backend,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Whether the backend answered its health probe
    pub async fn is_available(&self) -> bool {
        self.status().await.available
    }

    /// Cached status, probing first if there is none or it has expired
    pub async fn status(&self) -> HealthStatus {
        let mut cached = self.cached.lock().await;

        if let Some(status) = *cached {
            if status.is_fresh(self.ttl) {
                return status;
            }
            debug!("health status expired");
        }

        let available = self.backend.health().await;
        info!(backend = self.backend.location(), available, "backend health probed");

        let status = HealthStatus {
            available,
            checked_at: Instant::now(),
        };
        *cached = Some(status);
        status
    }

    /// Last known status without probing
    pub async fn peek(&self) -> Option<HealthStatus> {
        *self.cached.lock().await
    }

    /// Forget the cached status so the next call probes again
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
        debug!("health status invalidated");
    }

    /// Backend location, for messages
    pub fn location(&self) -> &str {
        self.backend.location()
    }
}
