//! Key/value preference storage contracts and adapters.
//!
//! Values are JSON text stored per key, which is how the desktop runtime persists its window
//! layout document.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`PrefsStore`] async methods.
pub type PrefsStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for small JSON documents keyed by string.
pub trait PrefsStore {
    /// Loads the raw JSON text stored under `key`.
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>>;

    /// Replaces the raw JSON text stored under `key`.
    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>>;

    /// Removes `key`.
    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that remembers nothing; used on targets without durable storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref<'a>(
        &'a self,
        _key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_pref<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_pref<'a>(&'a self, _key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same backing map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: bool,
}

impl MemoryPrefsStore {
    /// Creates a store whose saves always fail, mimicking an exhausted storage quota.
    pub fn rejecting_writes() -> Self {
        Self {
            inner: Rc::default(),
            reject_writes: true,
        }
    }

    /// Seeds a raw value directly, bypassing [`PrefsStore::save_pref`].
    pub fn insert_raw(&self, key: impl Into<String>, raw_json: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), raw_json.into());
    }

    /// Returns the raw value stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.raw(key)) })
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if self.reject_writes {
                return Err(format!("quota exceeded while writing `{key}`"));
            }
            self.insert_raw(key, raw_json);
            Ok(())
        })
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_store_clones_share_backing_map() {
        let store = MemoryPrefsStore::default();
        let alias = store.clone();
        let store_obj: &dyn PrefsStore = &store;

        block_on(store_obj.save_pref("layout", "{\"k\":1}")).expect("save");
        assert_eq!(alias.raw("layout").as_deref(), Some("{\"k\":1}"));

        block_on(store_obj.delete_pref("layout")).expect("delete");
        assert_eq!(block_on(alias.load_pref("layout")).expect("load"), None);
    }

    #[test]
    fn rejecting_store_fails_saves_but_still_loads() {
        let store = MemoryPrefsStore::rejecting_writes();
        store.insert_raw("layout", "{}");

        let err = block_on(store.save_pref("layout", "[]")).expect_err("save should fail");
        assert!(err.contains("quota"));
        assert_eq!(store.raw("layout").as_deref(), Some("{}"));
    }

    #[test]
    fn noop_store_never_returns_values() {
        let store = NoopPrefsStore;
        block_on(store.save_pref("layout", "{}")).expect("save");
        assert_eq!(block_on(store.load_pref("layout")).expect("load"), None);
    }
}
