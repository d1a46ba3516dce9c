// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floower client builder.

use std::sync::Arc;
use std::time::Duration;

use crate::device::Floower;
#[cfg(feature = "http")]
use crate::error::Error;
#[cfg(feature = "http")]
use crate::protocol::{HttpClient, HttpConfig};
use crate::protocol::Transport;
use crate::store::{KeyStore, MemoryKeyStore};

/// Interval between two refresh ticks unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Builder for [`Floower`] clients.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use floower_client::Floower;
/// use floower_client::store::FileKeyStore;
///
/// # fn example() -> floower_client::Result<()> {
/// // In-memory key store, public API
/// let floower = Floower::builder().build()?;
///
/// // Remember the API key across restarts
/// let floower = Floower::builder()
///     .with_key_store(Arc::new(FileKeyStore::default_location()?))
///     .with_poll_interval(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FloowerBuilder {
    #[cfg(feature = "http")]
    config: HttpConfig,
    poll_interval: Duration,
    store: Option<Arc<dyn KeyStore>>,
}

impl FloowerBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "http")]
            config: HttpConfig::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            store: None,
        }
    }

    /// Replaces the HTTP configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_config(mut self, config: HttpConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API endpoint.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Sets the interval between refresh ticks.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets where the last used API key is persisted.
    #[must_use]
    pub fn with_key_store(mut self, store: Arc<dyn KeyStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Returns the configured poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Builds a client talking HTTP to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an `http(s)` URL or the HTTP
    /// client cannot be created.
    #[cfg(feature = "http")]
    pub fn build(self) -> Result<Floower<HttpClient>, Error> {
        let client = self.config.clone().into_client().map_err(Error::Protocol)?;
        Ok(self.build_with_transport(client))
    }

    /// Builds a client over a custom transport.
    #[must_use]
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Floower<T> {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryKeyStore::new()));
        Floower::new(transport, store, self.poll_interval)
    }
}

impl Default for FloowerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
