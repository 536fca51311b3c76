use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Credential store persisted as a flat JSON object on disk
///
/// The file is read on first access and rewritten on every mutation, so
/// credentials survive process restarts. A missing file is an empty store.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileCredentialStore {
    /// Store backed by the JSON file at `path`; nothing is read until first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, CredentialStoreError> {
        match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        debug!(path = %self.path.display(), keys = entries.len(), "credential store persisted");
        Ok(())
    }

    /// Run `f` against the loaded entries, loading them first if needed
    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> Result<T, CredentialStoreError>,
    ) -> Result<T, CredentialStoreError> {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            *guard = Some(Self::load(&self.path)?);
        }
        f(guard.get_or_insert_with(BTreeMap::new))
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.with_entries(|entries| Ok(entries.get(key).cloned())) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read credential store");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
            self.persist(entries)
        })
    }

    fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        self.with_entries(|entries| {
            if entries.remove(key).is_some() {
                self.persist(entries)?;
            }
            Ok(())
        })
    }
}
