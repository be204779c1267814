//! Key/value persistence with explicit expiry.
//!
//! The browser build plugs `localStorage` in behind [`StorageBackend`]; the
//! server and the tests use [`MemoryStorage`].

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }
    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlPolicy {
    Never,
    After(u64),
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    value: T,
    stored_at_ms: u64,
    expires_at_ms: Option<u64>,
}

/// A typed value stored under one key.
pub struct TtlCache<T, S> {
    storage: S,
    key: &'static str,
    policy: TtlPolicy,
    _value: PhantomData<fn() -> T>,
}

impl<T, S> TtlCache<T, S>
where
    T: Serialize + DeserializeOwned,
    S: StorageBackend,
{
    pub fn new(storage: S, key: &'static str, policy: TtlPolicy) -> Self {
        Self { storage, key, policy, _value: PhantomData }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Read the value. Expired or undecodable entries are removed and read as `None`.
    pub fn load(&self, now_ms: u64) -> Option<T> {
        let raw = self.storage.get(self.key)?;
        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(entry) if entry.expires_at_ms.is_none_or(|at| now_ms < at) => Some(entry.value),
            _ => {
                self.storage.remove(self.key);
                None
            }
        }
    }

    pub fn store(&self, value: &T, now_ms: u64) -> Result<(), serde_json::Error> {
        let expires_at_ms = match self.policy {
            TtlPolicy::Never => None,
            TtlPolicy::After(ttl) => Some(now_ms.saturating_add(ttl)),
        };
        let raw = serde_json::to_string(&Envelope { value, stored_at_ms: now_ms, expires_at_ms })?;
        self.storage.set(self.key, &raw);
        Ok(())
    }

    pub fn clear(&self) {
        self.storage.remove(self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::SessionInfo;
    use crate::store_const::{SESSION_STORAGE_KEY, SESSION_TTL_MS};

    #[test]
    fn entries_expire_after_their_ttl() {
        let storage = MemoryStorage::new();
        let cache: TtlCache<SessionInfo, _> = TtlCache::new(&storage, SESSION_STORAGE_KEY, TtlPolicy::After(SESSION_TTL_MS));
        let session = SessionInfo { uid: 2, username: "a".to_string(), expires_at_ms: SESSION_TTL_MS };

        cache.store(&session, 0).unwrap();
        assert_eq!(cache.load(SESSION_TTL_MS - 1), Some(session));
        assert_eq!(cache.load(SESSION_TTL_MS), None);
        assert_eq!(storage.get(SESSION_STORAGE_KEY), None);
    }

    #[test]
    fn never_policy_keeps_values() {
        let cache: TtlCache<Vec<u32>, _> = TtlCache::new(MemoryStorage::new(), "k", TtlPolicy::Never);
        cache.store(&vec![1, 2], 5).unwrap();
        assert_eq!(cache.load(u64::MAX), Some(vec![1, 2]));
        cache.clear();
        assert_eq!(cache.load(0), None);
    }

    #[test]
    fn corrupt_entries_are_dropped() {
        let storage = MemoryStorage::new();
        storage.set("k", "{not json");
        let cache: TtlCache<u32, _> = TtlCache::new(&storage, "k", TtlPolicy::Never);
        assert_eq!(cache.load(0), None);
        assert_eq!(storage.get("k"), None);
    }
}
