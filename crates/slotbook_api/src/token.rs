// --- File: crates/slotbook_api/src/token.rs ---
use std::sync::{Arc, RwLock};

/// The backend bearer token, shared between the client and whoever logs in.
///
/// Cloning shares the same slot: clearing it through one handle (e.g. after
/// a 401) is visible through all of them.
#[derive(Clone, Debug, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.filter(|t| !t.is_empty()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let mut slot = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = if token.is_empty() { None } else { Some(token) };
    }

    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
