use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use web_sys::window;

use crate::shared::fallback::non_empty;
use contracts::system::auth::TenantRecord;

pub const DEFAULT_REDIRECT_KEY: &str = "mh_default_redirect";
pub const DEFAULT_ADMIN_REDIRECT_KEY: &str = "mh_default_admin_redirect";
pub const TENANT_KEY: &str = "mh_tenant";
pub const ACCESS_TOKEN_KEY: &str = "mh_access_token";
pub const USER_INFO_KEY: &str = "mh_user_info";
pub const USER_ROLES_KEY: &str = "mh_user_roles";

/// String key/value storage. Writes are best effort.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Window `localStorage`
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

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Decode a JSON value; unparsable data reads as absent
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unparsable '{}' in storage: {}", key, e);
            None
        }
    }
}

pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => log::warn!("Failed to serialize '{}': {}", key, e),
    }
}

/// Stored values the routing policy consults on every navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredPreferences {
    /// Preferred destination when the URL names no brand/locale
    pub default_redirect: Option<String>,
    /// Preferred destination when an admin page is denied
    pub default_admin_redirect: Option<String>,
    /// Tenant segment for the login URL
    pub tenant: Option<String>,
}

impl StoredPreferences {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            default_redirect: non_empty(store.get(DEFAULT_REDIRECT_KEY)),
            default_admin_redirect: non_empty(store.get(DEFAULT_ADMIN_REDIRECT_KEY)),
            tenant: read_json::<TenantRecord>(store, TENANT_KEY)
                .and_then(|record| non_empty(record.tenant)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let store = MemoryStorage::new();
        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_preferences_accept_non_empty_values() {
        let store = MemoryStorage::new()
            .with(DEFAULT_REDIRECT_KEY, "/fr_FR/acme/home")
            .with(DEFAULT_ADMIN_REDIRECT_KEY, "")
            .with(TENANT_KEY, r#"{"tenant": "Acme"}"#);

        let prefs = StoredPreferences::load(&store);
        assert_eq!(prefs.default_redirect.as_deref(), Some("/fr_FR/acme/home"));
        assert_eq!(prefs.default_admin_redirect, None);
        assert_eq!(prefs.tenant.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_malformed_tenant_is_ignored() {
        for raw in ["not json", r#"{"tenant": ""}"#, r#"{"other": 1}"#, r#""Acme""#] {
            let store = MemoryStorage::new().with(TENANT_KEY, raw);
            assert_eq!(StoredPreferences::load(&store).tenant, None, "raw: {}", raw);
        }
    }

    #[test]
    fn test_empty_storage_has_no_preferences() {
        assert_eq!(
            StoredPreferences::load(&MemoryStorage::new()),
            StoredPreferences::default()
        );
    }
}
