use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::window;

/// Key/value storage the form state is persisted into
pub trait StateStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

/// `window.sessionStorage`: survives reloads, cleared by the browser when the session ends
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage() -> Option<web_sys::Storage> {
        window().and_then(|w| w.session_storage().ok().flatten())
    }
}

impl StateStorage for BrowserSessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(s) => {
                if let Err(e) = s.set_item(key, value) {
                    log::warn!("sessionStorage write failed for '{}': {:?}", key, e);
                }
            }
            None => log::warn!("sessionStorage is not available, state not persisted"),
        }
    }
}

/// In-memory storage, clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}
