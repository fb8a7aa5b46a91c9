use anyhow::{Context, Result};
use gloo::storage::{LocalStorage, Storage};
use std::cell::RefCell;
use std::rc::Rc;

const TOKEN_KEY: &str = "meufuturo.access_token";

/// Access token of the logged-in user, persisted in `localStorage`.
///
/// Clones share the same token so the API client always sends the latest one.
#[derive(Clone, Default)]
pub struct Session {
    token: Rc<RefCell<Option<String>>>,
}

impl Session {
    /// Pick up a token saved by a previous visit, if any
    pub fn restore() -> Self {
        let token = LocalStorage::get::<String>(TOKEN_KEY)
            .ok()
            .filter(|t| !t.is_empty());
        if token.is_some() {
            log::debug!("restored saved session");
        }
        Self {
            token: Rc::new(RefCell::new(token)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Keep the token in memory and try to persist it. A storage failure
    /// still leaves the in-memory session usable.
    pub fn store(&self, token: String) -> Result<()> {
        self.token.replace(Some(token.clone()));
        LocalStorage::set(TOKEN_KEY, token).context("failed to persist access token")
    }

    pub fn clear(&self) {
        self.token.replace(None);
        LocalStorage::delete(TOKEN_KEY);
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.token, &other.token)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_store_restore_and_clear() {
        let session = Session::restore();
        session.store("abc".to_string()).unwrap();

        let restored = Session::restore();
        assert_eq!(restored.token().as_deref(), Some("abc"));

        restored.clear();
        assert!(!Session::restore().is_authenticated());
    }

    #[wasm_bindgen_test]
    fn test_clones_share_token() {
        let session = Session::default();
        let clone = session.clone();
        session.token.replace(Some("t".to_string()));
        assert_eq!(clone.token().as_deref(), Some("t"));
        assert!(session == clone);
    }
}
