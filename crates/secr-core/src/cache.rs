//! Bounded, TTL-limited result cache.
//!
//! Maps a request URL to the outcome of resolving it (an image reference or a
//! definitive absence). The cache is shared by every concurrent request and is
//! bounded both in size and in entry lifetime:
//!
//! - expiry is checked lazily on read; an expired entry reads as a miss but
//!   stays in memory until it is overwritten, evicted or purged;
//! - when full, inserting a new key evicts the earliest-inserted entry (FIFO,
//!   not LRU: reads do not refresh an entry's position).

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default maximum number of entries.
pub const DEFAULT_CAPACITY: usize = 500;
/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Option<String>,
    inserted_at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    /// Keys in insertion order; always the same key set as `entries`.
    order: VecDeque<String>,
}

/// Process-wide result cache. Share it behind an `Arc`.
#[derive(Debug)]
pub struct ResultCache {
    inner: Mutex<Inner>,
    capacity: usize,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl ResultCache {
    /// Create a cache holding at most `capacity` entries (minimum 1), each valid for `ttl`.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: capacity.max(1),
            ttl,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Look up `key`. Outer `None` is a miss (absent or expired); `Some(None)`
    /// is a cached absence.
    pub fn get(&self, key: &str) -> Option<Option<String>> {
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        if entry.inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store `value` under `key`, evicting the earliest-inserted entry if the
    /// cache is full and `key` is new. Overwriting keeps the key's position.
    pub fn set(&self, key: &str, value: Option<String>) {
        let mut inner = self.lock();
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if let Some(existing) = inner.entries.get_mut(key) {
            *existing = entry;
            return;
        }

        if inner.entries.len() >= self.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                tracing::trace!(evicted = %oldest, "cache full, evicted oldest entry");
            }
        }
        inner.order.push_back(key.to_string());
        inner.entries.insert(key.to_string(), entry);
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();
        let ttl = self.ttl;
        let before = inner.entries.len();
        inner
            .entries
            .retain(|_, e| e.inserted_at.elapsed() <= ttl);
        let Inner { entries, order } = &mut *inner;
        order.retain(|k| entries.contains_key(k));
        before - entries.len()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}
