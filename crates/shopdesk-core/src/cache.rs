//! TTL Cache
//!
//! One shared slot holding the latest payload and when it was stored.
//! Reads inside the TTL hand back the same `Arc` without fetching; anything
//! older is a miss. Writes replace the slot wholesale.
//!
//! Concurrent misses are not de-duplicated: two callers racing past an
//! expired entry each run their fetch, and the later write wins.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::clock::{Clock, Millis, SystemClock};

/// Dashboard metrics stay fresh for five minutes
pub const DASHBOARD_TTL_MS: Millis = 300_000;

#[derive(Debug)]
struct Entry<T> {
    data: Arc<T>,
    stored_at: Millis,
}

#[derive(Debug)]
pub struct TtlCache<T, C = SystemClock> {
    ttl_ms: Millis,
    clock: C,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T> TtlCache<T, SystemClock> {
    pub fn new(ttl_ms: Millis) -> Self {
        Self::with_clock(ttl_ms, SystemClock)
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    pub fn with_clock(ttl_ms: Millis, clock: C) -> Self {
        Self {
            ttl_ms,
            clock,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl_ms(&self) -> Millis {
        self.ttl_ms
    }

    fn lock(&self) -> MutexGuard<'_, Option<Entry<T>>> {
        // Nothing panics while holding the lock; recover the slot either way.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached payload if it is still fresh.
    pub fn get(&self) -> Option<Arc<T>> {
        let now = self.clock.now_ms();
        let slot = self.lock();
        match slot.as_ref() {
            Some(entry) if now.saturating_sub(entry.stored_at) < self.ttl_ms => {
                tracing::trace!(age_ms = now - entry.stored_at, "cache hit");
                Some(Arc::clone(&entry.data))
            }
            Some(_) => {
                tracing::debug!("cache entry expired");
                None
            }
            None => None,
        }
    }

    /// Store `data` stamped with the current time, replacing any prior entry.
    pub fn set(&self, data: T) -> Arc<T> {
        let data = Arc::new(data);
        *self.lock() = Some(Entry {
            data: Arc::clone(&data),
            stored_at: self.clock.now_ms(),
        });
        data
    }

    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    /// Age of the stored entry, fresh or not.
    pub fn age_ms(&self) -> Option<Millis> {
        let now = self.clock.now_ms();
        self.lock()
            .as_ref()
            .map(|entry| now.saturating_sub(entry.stored_at))
    }

    /// Fresh cached payload, or run `fetch` and store its result.
    /// A failed fetch leaves the slot untouched.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get() {
            return Ok(hit);
        }
        let fresh = fetch().await?;
        Ok(self.set(fresh))
    }

    /// Fetch unconditionally and overwrite the slot.
    pub async fn refresh<F, Fut, E>(&self, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let fresh = fetch().await?;
        Ok(self.set(fresh))
    }
}
