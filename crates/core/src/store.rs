//! Browser storage abstraction.
//!
//! [`SessionStore`] models the two key-value scopes a browser offers. The
//! policy only ever talks to this trait, so tests and tools can plug in
//! [`MemoryStore`] instead of a real browser.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::session::Scope;

/// Key-value storage split into a persistent and an ephemeral scope.
///
/// All operations are infallible: a missing key reads as `None` and removing
/// a missing key does nothing.
pub trait SessionStore: Send + Sync {
    /// Read a value.
    fn get(&self, scope: Scope, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, scope: Scope, key: &str, value: &str);

    /// Delete a value.
    fn remove(&self, scope: Scope, key: &str);

    /// Read and delete a value as one step.
    ///
    /// Two concurrent callers never both observe the same value.
    fn take(&self, scope: Scope, key: &str) -> Option<String>;
}

/// Serializable copy of both scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Persistent scope contents.
    #[serde(default)]
    pub persistent: BTreeMap<String, String>,
    /// Ephemeral scope contents.
    #[serde(default)]
    pub ephemeral: BTreeMap<String, String>,
}

impl StoreSnapshot {
    fn scope(&self, scope: Scope) -> &BTreeMap<String, String> {
        match scope {
            Scope::Persistent => &self.persistent,
            Scope::Ephemeral => &self.ephemeral,
        }
    }

    fn scope_mut(&mut self, scope: Scope) -> &mut BTreeMap<String, String> {
        match scope {
            Scope::Persistent => &mut self.persistent,
            Scope::Ephemeral => &mut self.ephemeral,
        }
    }
}

/// In-memory [`SessionStore`] guarded by a single mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreSnapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled from a snapshot.
    #[must_use]
    pub const fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Mutex::new(snapshot),
        }
    }

    /// Copy out the current contents of both scopes.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        self.lock().clone()
    }

    /// Drop every key in one scope.
    ///
    /// Clearing [`Scope::Ephemeral`] is what happens when the browser closes.
    pub fn clear_scope(&self, scope: Scope) {
        self.lock().scope_mut(scope).clear();
    }

    // A panic while holding the lock cannot leave a map half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, StoreSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.lock().scope(scope).get(key).cloned()
    }

    fn set(&self, scope: Scope, key: &str, value: &str) {
        self.lock()
            .scope_mut(scope)
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, scope: Scope, key: &str) {
        self.lock().scope_mut(scope).remove(key);
    }

    fn take(&self, scope: Scope, key: &str) -> Option<String> {
        self.lock().scope_mut(scope).remove(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_are_independent() {
        let store = MemoryStore::new();
        store.set(Scope::Persistent, "k", "p");
        store.set(Scope::Ephemeral, "k", "e");

        assert_eq!(store.get(Scope::Persistent, "k").as_deref(), Some("p"));
        assert_eq!(store.get(Scope::Ephemeral, "k").as_deref(), Some("e"));

        store.remove(Scope::Persistent, "k");
        assert_eq!(store.get(Scope::Persistent, "k"), None);
        assert_eq!(store.get(Scope::Ephemeral, "k").as_deref(), Some("e"));
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set(Scope::Ephemeral, "k", "one");
        store.set(Scope::Ephemeral, "k", "two");
        assert_eq!(store.get(Scope::Ephemeral, "k").as_deref(), Some("two"));
    }

    #[test]
    fn test_take_clears() {
        let store = MemoryStore::new();
        store.set(Scope::Ephemeral, "k", "v");
        assert_eq!(store.take(Scope::Ephemeral, "k").as_deref(), Some("v"));
        assert_eq!(store.take(Scope::Ephemeral, "k"), None);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store = MemoryStore::new();
        store.remove(Scope::Persistent, "missing");
        assert_eq!(store.snapshot(), StoreSnapshot::default());
    }

    #[test]
    fn test_clear_scope_keeps_other_scope() {
        let store = MemoryStore::new();
        store.set(Scope::Persistent, "a", "1");
        store.set(Scope::Ephemeral, "b", "2");
        store.clear_scope(Scope::Ephemeral);

        let snapshot = store.snapshot();
        assert_eq!(snapshot.persistent.len(), 1);
        assert!(snapshot.ephemeral.is_empty());
    }

    #[test]
    fn test_snapshot_restores() {
        let store = MemoryStore::new();
        store.set(Scope::Persistent, "a", "1");

        let json = serde_json::to_string(&store.snapshot()).unwrap();
        let restored = MemoryStore::from_snapshot(serde_json::from_str(&json).unwrap());
        assert_eq!(restored.get(Scope::Persistent, "a").as_deref(), Some("1"));
    }

    #[test]
    fn test_snapshot_missing_scopes_default_to_empty() {
        let snapshot: StoreSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, StoreSnapshot::default());
    }
}
