// ==========================================
// Obra Schedule - Baseline List Cache
// ==========================================
// Per-project, time-expiring cache of baseline lists. Every write path
// invalidates synchronously before returning, so a later read in the
// same or a different session never observes a stale version list.
// ==========================================

use crate::domain::BaselineVersion;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::warn;

/// Default time-to-live: one hour.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

// ==========================================
// BaselineListCache
// ==========================================
pub struct BaselineListCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, CacheSlot>>,
}

struct CacheSlot {
    stored_at: Instant,
    versions: Vec<BaselineVersion>,
}

impl Default for BaselineListCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl BaselineListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Cached list for a project, None on miss or expiry.
    pub fn get(&self, project: &str) -> Option<Vec<BaselineVersion>> {
        let mut slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(e) => {
                warn!(error = %e, "baseline cache lock poisoned, treating as miss");
                return None;
            }
        };
        match slots.get(project) {
            Some(slot) if slot.stored_at.elapsed() < self.ttl => Some(slot.versions.clone()),
            Some(_) => {
                slots.remove(project);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, project: &str, versions: Vec<BaselineVersion>) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(
                project.to_string(),
                CacheSlot {
                    stored_at: Instant::now(),
                    versions,
                },
            );
        }
    }

    /// Drop a project's cached list. Must run before any write returns.
    pub fn invalidate(&self, project: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.remove(project);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.clear();
        }
    }
}
