// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON file key store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::StoreError;

use super::KeyStore;

/// Key store backed by a JSON object on disk.
///
/// Every write goes straight to the file. A missing file reads as an empty
/// store; parent directories are created on the first write.
///
/// # Examples
///
/// ```no_run
/// use floower_client::store::{FileKeyStore, KeyStore, LAST_USED_API_KEY};
///
/// # fn example() -> Result<(), floower_client::error::StoreError> {
/// let store = FileKeyStore::default_location()?;
/// store.set(LAST_USED_API_KEY, "my-api-key")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileKeyStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    lock: Mutex<()>,
}

impl FileKeyStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates a store at `<config dir>/floower/storage.json`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoLocation` if the platform has no config
    /// directory.
    pub fn default_location() -> Result<Self, StoreError> {
        let mut path = dirs::config_dir().ok_or(StoreError::NoLocation)?;
        path.push("floower");
        path.push("storage.json");
        Ok(Self::new(path))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;

        tracing::debug!(path = %self.path.display(), "Saved key store");
        Ok(())
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
