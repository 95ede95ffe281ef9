use contracts::domain::User;
use web_sys::window;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user";

/// Minimal key/value persistence the session is mirrored into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Every call is a no-op when storage is unavailable
/// (private mode, non-browser target).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Save access token
pub fn save_token(store: &impl KeyValueStore, token: &str) {
    store.set(TOKEN_KEY, token);
}

/// Get access token, ignoring an empty entry
pub fn load_token(store: &impl KeyValueStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

pub fn remove_token(store: &impl KeyValueStore) {
    store.remove(TOKEN_KEY);
}

/// Save the user profile as JSON
pub fn save_user(store: &impl KeyValueStore, user: &User) {
    match serde_json::to_string(user) {
        Ok(json) => store.set(USER_KEY, &json),
        Err(e) => log::error!("Failed to serialize user profile: {}", e),
    }
}

/// Restore the user profile. A corrupt entry is dropped.
pub fn load_user(store: &impl KeyValueStore) -> Option<User> {
    let raw = store.get(USER_KEY)?;
    match serde_json::from_str::<User>(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("Discarding stored user profile: {}", e);
            store.remove(USER_KEY);
            None
        }
    }
}

/// Clear token and user profile
pub fn clear_session(store: &impl KeyValueStore) {
    store.remove(TOKEN_KEY);
    store.remove(USER_KEY);
}

#[cfg(test)]
pub(crate) mod memory {
    use super::KeyValueStore;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct MemoryStore {
        pub entries: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for MemoryStore {
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
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;

    fn admin() -> User {
        User {
            id: 1,
            name: "Admin".into(),
            email: "admin@csms.local".into(),
            role: "admin".into(),
            status: "active".into(),
            ..Default::default()
        }
    }

    #[test]
    fn session_is_written_under_known_keys() {
        let store = MemoryStore::default();
        save_token(&store, "tok-123");
        save_user(&store, &admin());

        assert_eq!(store.get("auth_token").as_deref(), Some("tok-123"));
        assert!(store.get("user").unwrap().contains("\"email\":\"admin@csms.local\""));
        assert_eq!(load_token(&store).as_deref(), Some("tok-123"));
        assert_eq!(load_user(&store), Some(admin()));
    }

    #[test]
    fn clear_removes_both_entries() {
        let store = MemoryStore::default();
        save_token(&store, "tok-123");
        save_user(&store, &admin());

        clear_session(&store);

        assert!(store.entries.borrow().is_empty());
        assert_eq!(load_token(&store), None);
        assert_eq!(load_user(&store), None);
    }

    #[test]
    fn corrupt_user_entry_is_discarded() {
        let store = MemoryStore::default();
        store.set(USER_KEY, "{not json");

        assert_eq!(load_user(&store), None);
        assert_eq!(store.get(USER_KEY), None);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let store = MemoryStore::default();
        store.set(TOKEN_KEY, "");
        assert_eq!(load_token(&store), None);
    }
}
