//! Where the signed-in session's tokens live between page loads.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Tokens of the signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Persistence for `StoredSession`. `None` clears it.
pub trait SessionStore {
    fn load(&self) -> Option<StoredSession>;
    fn save(&self, session: Option<&StoredSession>);
}

/// Store kept in memory. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Rc<RefCell<Option<StoredSession>>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<StoredSession> {
        self.0.borrow().clone()
    }

    fn save(&self, session: Option<&StoredSession>) {
        *self.0.borrow_mut() = session.cloned();
    }
}

/// Store in the browser's `localStorage`, surviving reloads and shared by
/// every tab on the same origin.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy)]
pub struct BrowserStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    pub const DEFAULT_KEY: &'static str = "beautybook.auth";

    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for BrowserStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserStore {
    fn load(&self) -> Option<StoredSession> {
        let raw = Self::storage()?.get_item(self.key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored session");
                None
            }
        }
    }

    fn save(&self, session: Option<&StoredSession>) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable; session will not persist");
            return;
        };
        let result = match session.map(serde_json::to_string) {
            Some(Ok(raw)) => storage.set_item(self.key, &raw),
            Some(Err(e)) => {
                tracing::error!(error = %e, "failed to encode session");
                return;
            }
            None => storage.remove_item(self.key),
        };
        if let Err(e) = result {
            tracing::warn!(error = ?e, "failed to write stored session");
        }
    }
}

/// The store a client uses unless given one: `localStorage` in the browser,
/// memory elsewhere.
pub fn default_store() -> Box<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(BrowserStore::default())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryStore::new();
        let other_tab = store.clone();
        let session = StoredSession {
            access_token: "jwt".to_string(),
            refresh_token: Some("refresh".to_string()),
        };

        store.save(Some(&session));
        assert_eq!(other_tab.load(), Some(session));

        other_tab.save(None);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_stored_session_without_refresh_token() {
        let session: StoredSession = serde_json::from_str(r#"{"access_token":"jwt"}"#).unwrap();
        assert_eq!(session.refresh_token, None);
    }
}
