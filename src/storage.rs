//! Durable key/value storage.
//!
//! The game only ever needs string records under a handful of keys, so the
//! seam is the same shape as the browser's `localStorage`. The wasm build
//! uses the real thing; tests and native builds use [`MemoryStorage`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::GameError;

/// String key/value store with `localStorage` semantics.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), GameError>;
    fn remove_item(&self, key: &str) -> Result<(), GameError>;
}

/// `window.localStorage`. Only constructible in the browser.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Returns `None` when storage is disabled (private mode, sandboxed iframe).
    pub fn open() -> Option<Self> {
        let inner = web_sys::window()?.local_storage().ok()??;
        Some(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
        self.inner
            .get_item(key)
            .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), GameError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), GameError> {
        self.inner
            .remove_item(key)
            .map_err(|e| GameError::PersistenceUnavailable(format!("{e:?}")))
    }
}

/// In-memory storage. Clones share the same map, so a test can keep a handle
/// and inspect what the store wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail, like a full quota.
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), GameError> {
        if self.fail_writes.get() {
            return Err(GameError::PersistenceUnavailable("quota exceeded".into()));
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), GameError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
