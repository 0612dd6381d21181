use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Pluggable key/value backend the auth client persists its session in.
///
/// Implementations are shared behind an `Arc`, so they handle their own
/// synchronisation.
pub trait SessionStorage: Send + Sync + fmt::Debug {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
}

/// Process-local storage. The default backend; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k"), None);
        storage.set_item("k", "v".into());
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
        storage.set_item("k", "w".into());
        assert_eq!(storage.get_item("k").as_deref(), Some("w"));
        storage.remove_item("k");
        assert_eq!(storage.get_item("k"), None);
    }
}
