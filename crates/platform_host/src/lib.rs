//! Typed host-domain storage contracts shared by the desktop runtime and browser adapters.
//!
//! Concrete browser adapters live in `platform_host_web`; this crate keeps the object-safe
//! service traits and in-memory adapters used by tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::prefs::{MemoryPrefsStore, NoopPrefsStore, PrefsStore, PrefsStoreFuture};
