use super::*;

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);

    store.set(AUTH_TOKEN_KEY, "tok");
    assert_eq!(store.get(AUTH_TOKEN_KEY).as_deref(), Some("tok"));

    store.remove(AUTH_TOKEN_KEY);
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);
}

#[test]
fn memory_store_clear_drops_everything() {
    let store = MemoryStore::new();
    store.set("a", "1");
    store.set("b", "2");
    store.clear();
    assert_eq!(store.get("a"), None);
    assert_eq!(store.get("b"), None);
    assert!(store.is_available());
}

// =============================================================================
// NoopStore
// =============================================================================

#[test]
fn noop_store_ignores_writes() {
    let store = NoopStore;
    store.set(AUTH_TOKEN_KEY, "tok");
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    store.remove(AUTH_TOKEN_KEY);
    store.clear();
    assert!(!store.is_available());
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let store = FileStore::open(&path);
    store.set(DETECTED_API_URL_KEY, "http://localhost:5239");
    store.set(AUTH_TOKEN_KEY, "tok");
    store.remove(AUTH_TOKEN_KEY);
    drop(store);

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get(DETECTED_API_URL_KEY).as_deref(), Some("http://localhost:5239"));
    assert_eq!(reopened.get(AUTH_TOKEN_KEY), None);
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_store_corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, b"not json").unwrap();

    let store = FileStore::open(&path);
    assert_eq!(store.get(AUTH_TOKEN_KEY), None);

    store.set(AUTH_TOKEN_KEY, "fresh");
    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get(AUTH_TOKEN_KEY).as_deref(), Some("fresh"));
}

#[test]
fn file_store_clear_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = FileStore::open(&path);
    store.set("a", "1");
    store.clear();

    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get("a"), None);
}

// =============================================================================
// open
// =============================================================================

#[test]
fn open_selects_backend() {
    assert!(open(&StorageBackend::Memory).is_available());
    assert!(!open(&StorageBackend::Disabled).is_available());

    let dir = tempfile::tempdir().unwrap();
    let store = open(&StorageBackend::File(dir.path().join("s.json")));
    store.set("k", "v");
    assert_eq!(store.get("k").as_deref(), Some("v"));
}
