// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence for the last used API key.
//!
//! The client remembers the key it last connected with so that
//! [`Floower::reconnect`](crate::Floower::reconnect) can resume the session
//! after a restart. Storage is abstracted behind [`KeyStore`]:
//!
//! - [`MemoryKeyStore`]: process-local, the default
//! - [`FileKeyStore`]: a JSON file that survives restarts
//!
//! # Examples
//!
//! ```
//! use floower_client::store::{KeyStore, MemoryKeyStore, LAST_USED_API_KEY};
//!
//! let store = MemoryKeyStore::new();
//! store.set(LAST_USED_API_KEY, "K").unwrap();
//! assert_eq!(store.get(LAST_USED_API_KEY).unwrap().as_deref(), Some("K"));
//! ```

mod file;
mod memory;

pub use file::FileKeyStore;
pub use memory::MemoryKeyStore;

use std::fmt;

use crate::error::StoreError;

/// Key under which the last used API key is stored.
pub const LAST_USED_API_KEY: &str = "last-used-api-key";

/// A string key-value store that outlives the client.
pub trait KeyStore: Send + Sync + fmt::Debug {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes a value. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
