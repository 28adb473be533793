//! In-memory cache for contact summaries and hashtags, keyed by
//! name + phone number.
//!
//! Process-wide resource: call `init()` once at startup; every accessor also
//! initializes lazily, so init order cannot break callers. The graph engine
//! never touches this module directly; it only sees contacts that a
//! `CachedSource` has already enriched.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::{Duration, SystemTime};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CachedEntry {
    pub summary: Option<String>,
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: CachedEntry,
    created_at: SystemTime,
    updated_at: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub total: usize,
    pub with_summary: usize,
    pub with_hashtags: usize,
}

#[derive(Debug, Default)]
pub struct ContactCache {
    slots: HashMap<(String, String), Slot>,
}

impl ContactCache {
    pub fn get(&self, name: &str, phone: &str) -> Option<&CachedEntry> {
        self.slots
            .get(&(name.to_string(), phone.to_string()))
            .map(|slot| &slot.entry)
    }

    /// Insert or update. Updates keep the original `created_at` and bump
    /// `updated_at`, matching upsert semantics.
    pub fn set(&mut self, name: &str, phone: &str, entry: CachedEntry) {
        let now = SystemTime::now();
        let key = (name.to_string(), phone.to_string());
        match self.slots.get_mut(&key) {
            Some(slot) => {
                slot.entry = entry;
                slot.updated_at = now;
            }
            None => {
                self.slots.insert(
                    key,
                    Slot {
                        entry,
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        tracing::debug!(name, phone, "cached contact data");
    }

    pub fn contains(&self, name: &str, phone: &str) -> bool {
        self.slots.contains_key(&(name.to_string(), phone.to_string()))
    }

    pub fn remove(&mut self, name: &str, phone: &str) -> bool {
        self.slots
            .remove(&(name.to_string(), phone.to_string()))
            .is_some()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total: self.slots.len(),
            with_summary: self
                .slots
                .values()
                .filter(|slot| slot.entry.summary.is_some())
                .count(),
            with_hashtags: self
                .slots
                .values()
                .filter(|slot| !slot.entry.hashtags.is_empty())
                .count(),
        }
    }

    /// (created_at, updated_at) for an entry, if present.
    pub fn timestamps(&self, name: &str, phone: &str) -> Option<(SystemTime, SystemTime)> {
        self.slots
            .get(&(name.to_string(), phone.to_string()))
            .map(|slot| (slot.created_at, slot.updated_at))
    }

    /// Drop entries not updated within `max_age`. Returns how many were
    /// removed.
    pub fn prune_older_than(&mut self, max_age: Duration) -> usize {
        let now = SystemTime::now();
        let before = self.slots.len();
        self.slots.retain(|_, slot| {
            now.duration_since(slot.updated_at)
                .map(|age| age <= max_age)
                .unwrap_or(true)
        });
        let removed = before - self.slots.len();
        if removed > 0 {
            tracing::info!(removed, "pruned stale cache entries");
        }
        removed
    }
}

static CACHE: OnceLock<Mutex<ContactCache>> = OnceLock::new();

fn cell() -> &'static Mutex<ContactCache> {
    CACHE.get_or_init(|| Mutex::new(ContactCache::default()))
}

/// Idempotent; safe to call from every binary entry point.
pub fn init() {
    let _ = cell();
}

pub fn handle() -> MutexGuard<'static, ContactCache> {
    cell().lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
