use platform_host::{MemoryPrefsStore, PrefsStore, PrefsStoreFuture};

use crate::storage::local_prefs::WebPrefsStore;

/// Storage strategy chosen for the current compile target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// `window.localStorage` in a browser tab.
    Browser,
    /// Session-scoped in-memory storage for native builds and tests.
    Memory,
}

/// Returns the storage strategy for the current compile target.
pub const fn selected_host_strategy() -> HostStrategy {
    if cfg!(target_arch = "wasm32") {
        HostStrategy::Browser
    } else {
        HostStrategy::Memory
    }
}

/// Returns a stable name for the selected storage strategy.
pub const fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser-local-storage",
        HostStrategy::Memory => "memory",
    }
}

/// Adapter enum that erases the concrete preferences backend behind [`PrefsStore`].
#[derive(Debug, Clone)]
pub enum PrefsStoreAdapter {
    /// Browser-backed storage.
    Browser(WebPrefsStore),
    /// In-memory storage that lives as long as the adapter and its clones.
    Memory(MemoryPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref<'a>(
        &'a self,
        key: &'a str,
    ) -> PrefsStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Memory(store) => store.load_pref(key),
        }
    }

    fn save_pref<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw_json),
            Self::Memory(store) => store.save_pref(key, raw_json),
        }
    }

    fn delete_pref<'a>(&'a self, key: &'a str) -> PrefsStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Memory(store) => store.delete_pref(key),
        }
    }
}

/// Builds the preferences adapter for the compile-time selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Memory => PrefsStoreAdapter::Memory(MemoryPrefsStore::default()),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn native_builds_select_memory_storage() {
        assert_eq!(selected_host_strategy(), HostStrategy::Memory);
        assert_eq!(host_strategy_name(), "memory");
    }

    #[test]
    fn memory_adapter_keeps_values_across_clones() {
        let store = prefs_store();
        let alias = store.clone();
        block_on(store.save_pref("layout", "{}")).expect("save");
        assert_eq!(
            block_on(alias.load_pref("layout")).expect("load"),
            Some("{}".to_string())
        );
    }
}
