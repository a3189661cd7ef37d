use crate::loader::DataSource;
use crate::models::Alert;
use std::sync::{Arc, Mutex};

/// Loads active alerts once, severity-sorts them, and keeps them for the
/// rest of the session. The dataset is small enough that the only cache
/// policy needed is an explicit invalidation entry point.
pub struct AlertService {
    source: Arc<dyn DataSource>,
    cache: Mutex<Option<Vec<Alert>>>,
}

impl AlertService {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
        }
    }

    /// Active alerts, critical first. Cached after the first load; a failed
    /// load degrades to an empty list and is not cached, so a later call
    /// can retry.
    pub async fn active(&self) -> Vec<Alert> {
        if let Some(cached) = self.cache_lock().clone() {
            return cached;
        }

        let Some(mut alerts) = self.source.alerts().await else {
            return Vec::new();
        };
        alerts.sort_by_key(|a| a.severity.rank());
        *self.cache_lock() = Some(alerts.clone());
        alerts
    }

    /// Drop the cached alerts so the next `active` call re-fetches.
    pub fn invalidate(&self) {
        *self.cache_lock() = None;
    }

    fn cache_lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<Alert>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
