use std::cell::RefCell;
use std::collections::HashMap;

use tracing::warn;

/// Storage key holding the opaque auth token written by the login flow.
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// Storage key holding the username shown in the navigation bar.
pub const USERNAME_KEY: &str = "username";

const FALLBACK_NAME: &str = "User";

/// String key-value capability backing the client-side session markers.
///
/// The widget never touches storage directly; it goes through this trait so
/// tests can substitute [`MemorySession`] for the browser facility.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// [`SessionStore`] over the browser's `localStorage`.
pub struct BrowserSession {
    storage: web_sys::Storage,
}

impl BrowserSession {
    /// Returns `None` when the storage facility is unavailable.
    pub fn new() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn!("failed to store {key}: {e:?}");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove_item(key) {
            warn!("failed to remove {key}: {e:?}");
        }
    }
}

/// In-memory [`SessionStore`] for tests and headless use.
#[derive(Default)]
pub struct MemorySession {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// The name shown in the navigation bar: the stored username when present
/// and non-empty, otherwise a fixed placeholder.
pub fn display_name(store: &impl SessionStore) -> String {
    match store.get(USERNAME_KEY) {
        Some(name) if !name.is_empty() => name,
        _ => FALLBACK_NAME.to_string(),
    }
}

/// Removes both session markers. Leaves every other key alone.
pub fn clear_session(store: &impl SessionStore) {
    store.remove(AUTH_TOKEN_KEY);
    store.remove(USERNAME_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_uses_stored_username() {
        let store = MemorySession::new();
        store.set(USERNAME_KEY, "alice");
        assert_eq!(display_name(&store), "alice");
    }

    #[test]
    fn display_name_falls_back_when_absent() {
        let store = MemorySession::new();
        assert_eq!(display_name(&store), "User");
    }

    #[test]
    fn display_name_falls_back_when_empty() {
        let store = MemorySession::new();
        store.set(USERNAME_KEY, "");
        assert_eq!(display_name(&store), "User");
    }

    #[test]
    fn clear_session_removes_both_markers() {
        let store = MemorySession::new();
        store.set(AUTH_TOKEN_KEY, "token-123");
        store.set(USERNAME_KEY, "alice");

        clear_session(&store);

        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
        assert_eq!(store.get(USERNAME_KEY), None);
    }

    #[test]
    fn clear_session_leaves_unrelated_keys() {
        let store = MemorySession::new();
        store.set(USERNAME_KEY, "alice");
        store.set("theme", "dark");

        clear_session(&store);

        assert_eq!(store.get("theme"), Some("dark".to_string()));
    }

    #[test]
    fn clear_session_is_idempotent() {
        let store = MemorySession::new();
        clear_session(&store);
        clear_session(&store);
        assert_eq!(store.get(AUTH_TOKEN_KEY), None);
    }
}
