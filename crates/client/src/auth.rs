//! Credential storage
//!
//! The login flow writes a bearer token here, every request reads it, and a
//! 401 response clears it. In the browser the store is backed by local
//! storage under [`TOKEN_KEY`]; natively (and in tests) an in-process store
//! is used.

use std::sync::Mutex;

/// Local storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Where the session credential lives.
pub trait TokenStore: Send + Sync {
    /// Current token, if the user is logged in.
    fn get(&self) -> Option<String>;

    /// Store a token after a successful login.
    fn set(&self, token: &str);

    /// Drop the token (logout or expired session).
    fn clear(&self);
}

/// In-process store, the default off-browser.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().expect("token store lock poisoned").clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().expect("token store lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token store lock poisoned") = None;
    }
}

/// Browser local storage under [`TOKEN_KEY`], shared with the login flow.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserTokenStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        local_storage().and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
    }

    fn set(&self, token: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);

        store.set("abc123");
        assert_eq!(store.get(), Some("abc123".to_string()));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn with_token_starts_populated() {
        let store = MemoryTokenStore::with_token("tok");
        assert_eq!(store.get(), Some("tok".to_string()));
    }
}
