//! Durable key-value storage behind a capability-scoped trait.
//!
//! DESIGN
//! ======
//! Callers never branch on whether storage exists. The host picks one
//! implementation at startup: `FileStore` for sessions that survive restarts,
//! `MemoryStore` for ephemeral ones and `NoopStore` where nothing may be
//! written. Every operation is synchronous and infallible; I/O failures are
//! logged and degrade to empty reads or dropped writes.

mod file;
mod memory;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

pub use file::FileStore;
pub use memory::{MemoryStore, NoopStore};

/// Bearer token for the signed-in user.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// JSON-serialized record of the signed-in user.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Origin confirmed by the last successful reachability probe.
pub const DETECTED_API_URL_KEY: &str = "detectedApiUrl";

/// String-keyed, string-valued storage that never fails.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);
    /// Whether writes are actually retained.
    fn is_available(&self) -> bool;
}

/// Which storage implementation the host provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    File(PathBuf),
    Memory,
    Disabled,
}

/// Open the store selected by `backend`.
#[must_use]
pub fn open(backend: &StorageBackend) -> Arc<dyn KeyValueStore> {
    match backend {
        StorageBackend::File(path) => Arc::new(FileStore::open(path.clone())),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Disabled => Arc::new(NoopStore),
    }
}
