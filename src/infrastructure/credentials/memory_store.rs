use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Credential store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no keys are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryCredentialStore::new();
        assert!(store.is_empty());

        store.set("tokenName", "X-Token").unwrap();
        assert_eq!(store.get("tokenName").as_deref(), Some("X-Token"));

        store.set("tokenName", "X-Other").unwrap();
        assert_eq!(store.get("tokenName").as_deref(), Some("X-Other"));
        assert_eq!(store.len(), 1);

        store.remove("tokenName").unwrap();
        assert_eq!(store.get("tokenName"), None);
        store.remove("tokenName").unwrap();
    }
}
