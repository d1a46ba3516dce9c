// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for a Floower device.
//!
//! [`Floower`] keeps a local mirror of the device state, applies changes to
//! it optimistically and pushes the whole state to the API after each
//! change. A [`PollingHandle`] refreshes the mirror periodically.
//!
//! # Connection lifecycle
//!
//! ```text
//! unset --connect(key)/reconnect()--> key set --GET 200--> connected
//!   ^                                                          |
//!   +------------------------ disconnect() --------------------+
//! ```
//!
//! Only a successful retrieval sets `connected`; only
//! [`disconnect`](Floower::disconnect) clears it. Failed polls leave it as
//! it was.

mod builder;
mod poller;

pub use builder::{DEFAULT_POLL_INTERVAL, FloowerBuilder};
pub use poller::PollingHandle;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::error::{Error, ParseError, ProtocolError, Result};
#[cfg(feature = "http")]
use crate::protocol::HttpClient;
use crate::protocol::{StateUpdate, Transport};
use crate::state::{ColorScheme, DeviceState};
use crate::store::{KeyStore, LAST_USED_API_KEY};
use crate::subscription::{CallbackRegistry, ClientEvent, Subscribable, SubscriptionId};
use crate::types::{PetalsLevel, RgbColor};

/// HTTP status the API answers a successful state push with.
const PUSH_OK: u16 = 204;

/// HTTP status of a usable info response.
const FETCH_OK: u16 = 200;

/// API key and connection flag, always updated together.
#[derive(Debug, Default)]
struct Connection {
    api_key: Option<String>,
    connected: bool,
}

struct Inner<T> {
    transport: T,
    store: Arc<dyn KeyStore>,
    poll_interval: Duration,
    connection: RwLock<Connection>,
    state: RwLock<DeviceState>,
    color_scheme: RwLock<ColorScheme>,
    callbacks: CallbackRegistry,
}

/// Client for one Floower device.
///
/// Cloning a `Floower` gives another handle to the same client; all clones
/// see the same state and subscribers.
///
/// Setters change the local mirror first and then push it. When the push
/// fails the local change is kept, and the next successful retrieval
/// overwrites it with whatever the device reports.
///
/// # Examples
///
/// ```no_run
/// use floower_client::Floower;
/// use floower_client::subscription::Subscribable;
///
/// #[tokio::main]
/// async fn main() -> floower_client::Result<()> {
///     let floower = Floower::builder().build()?;
///
///     floower.connect("my-api-key").await?;
///     let _polling = floower.start_polling();
///
///     floower.on_change({
///         let floower = floower.clone();
///         move || println!("petals at {}", floower.petals())
///     });
///
///     floower.open().await?;
///     floower.set_color("#ff8000").await?;
///     Ok(())
/// }
/// ```
pub struct Floower<T: Transport> {
    inner: Arc<Inner<T>>,
}

impl<T: Transport> Clone for Floower<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> fmt::Debug for Floower<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Floower")
            .field("connected", &self.connected())
            .field("state", &self.state())
            .field("color_scheme", &*self.inner.color_scheme.read())
            .field("store", &self.inner.store)
            .field("callbacks", &self.inner.callbacks)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http")]
impl Floower<HttpClient> {
    /// Returns a builder for a client talking to the Floower HTTP API.
    ///
    /// Use [`FloowerBuilder::build_with_transport`] for other transports.
    #[must_use]
    pub fn builder() -> FloowerBuilder {
        FloowerBuilder::new()
    }
}

impl<T: Transport> Floower<T> {
    /// Creates a client over `transport`.
    pub(crate) fn new(transport: T, store: Arc<dyn KeyStore>, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                store,
                poll_interval,
                connection: RwLock::new(Connection::default()),
                state: RwLock::new(DeviceState::new()),
                color_scheme: RwLock::new(ColorScheme::new()),
                callbacks: CallbackRegistry::new(),
            }),
        }
    }

    // ========== Connection ==========

    /// Resumes the session with the persisted API key.
    ///
    /// Having no persisted key is not an error: the client simply stays
    /// disconnected.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read or the retrieval fails.
    pub async fn reconnect(&self) -> Result<()> {
        let Some(api_key) = self.inner.store.get(LAST_USED_API_KEY)? else {
            tracing::debug!("No persisted API key, staying disconnected");
            return Ok(());
        };

        self.inner.connection.write().api_key = Some(api_key);
        self.retrieve_info().await
    }

    /// Connects with `api_key` and persists it.
    ///
    /// The key is persisted even when the retrieval fails, so a rejected
    /// key is still offered by [`reconnect`](Self::reconnect) until
    /// [`disconnect`](Self::disconnect) is called.
    ///
    /// # Errors
    ///
    /// Returns the retrieval error if the device could not be reached, or a
    /// store error if the retrieval succeeded but the key could not be
    /// persisted.
    pub async fn connect(&self, api_key: impl Into<String>) -> Result<()> {
        let api_key = api_key.into();
        self.inner.connection.write().api_key = Some(api_key.clone());

        let retrieved = self.retrieve_info().await;
        let persisted = self.inner.store.set(LAST_USED_API_KEY, &api_key);

        match &retrieved {
            Ok(()) => tracing::info!("Connected to Floower"),
            Err(e) => tracing::info!(error = %e, "Connection attempt failed"),
        }

        retrieved?;
        persisted.map_err(Error::Store)
    }

    /// Disconnects and forgets the API key.
    ///
    /// Subscribers of [`ClientEvent::Disconnected`] are notified even if the
    /// persisted key could not be removed.
    ///
    /// # Errors
    ///
    /// Returns a store error if the persisted key could not be removed.
    pub fn disconnect(&self) -> Result<()> {
        {
            let mut connection = self.inner.connection.write();
            connection.connected = false;
            connection.api_key = None;
        }

        let removed = self.inner.store.remove(LAST_USED_API_KEY);
        if let Err(e) = &removed {
            tracing::warn!(error = %e, "Failed to remove persisted API key");
        }

        tracing::info!("Disconnected from Floower");
        self.inner.callbacks.dispatch(ClientEvent::Disconnected);

        removed.map_err(Error::Store)
    }

    /// Returns `true` once a retrieval has succeeded and until
    /// [`disconnect`](Self::disconnect).
    #[must_use]
    pub fn connected(&self) -> bool {
        self.inner.connection.read().connected
    }

    /// Returns the API key in use, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.inner.connection.read().api_key.clone()
    }

    // ========== Petals ==========

    /// Opens the petals fully.
    ///
    /// # Errors
    ///
    /// Returns error if the state could not be pushed.
    pub async fn open(&self) -> Result<()> {
        self.set_petals(PetalsLevel::OPEN).await
    }

    /// Closes the petals.
    ///
    /// # Errors
    ///
    /// Returns error if the state could not be pushed.
    pub async fn close(&self) -> Result<()> {
        self.set_petals(PetalsLevel::CLOSED).await
    }

    /// Closes the petals if they are open at all, opens them fully otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the state could not be pushed.
    pub async fn toggle(&self) -> Result<()> {
        self.update_state(|state| state.set_petals(state.petals().toggled()));
        self.push_state().await
    }

    /// Closes the petals and turns the light off.
    ///
    /// # Errors
    ///
    /// Returns error if the state could not be pushed.
    pub async fn off(&self) -> Result<()> {
        self.update_state(DeviceState::turn_off);
        self.push_state().await
    }

    /// Returns the petal level.
    #[must_use]
    pub fn petals(&self) -> PetalsLevel {
        self.inner.state.read().petals()
    }

    /// Sets the petal level.
    ///
    /// # Errors
    ///
    /// Returns error if the state could not be pushed.
    pub async fn set_petals(&self, level: PetalsLevel) -> Result<()> {
        self.update_state(|state| state.set_petals(level));
        self.push_state().await
    }

    // ========== Color ==========

    /// Returns the light color as `#rrggbb`, or `None` when the light is off.
    ///
    /// A color of `#000000` cannot be told apart from "off".
    #[must_use]
    pub fn color(&self) -> Option<String> {
        self.inner.state.read().color_hex()
    }

    /// Sets the light color from a hex string (`#rrggbb`).
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` without changing anything if
    /// `hex` does not parse, or an error if the state could not be pushed.
    pub async fn set_color(&self, hex: &str) -> Result<()> {
        let color = RgbColor::from_hex(hex)?;
        self.set_rgb_color(color).await
    }

    /// Sets the light color.
    ///
    /// # Errors
    ///
    /// Returns error if the state could not be pushed.
    pub async fn set_rgb_color(&self, color: RgbColor) -> Result<()> {
        self.update_state(|state| state.set_color(color));
        self.push_state().await
    }

    /// Returns a snapshot of the mirrored device state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        *self.inner.state.read()
    }

    // ========== Color scheme ==========

    /// Returns a snapshot of the swatches as `#rrggbb` strings.
    #[must_use]
    pub fn color_scheme(&self) -> Vec<String> {
        self.inner.color_scheme.read().to_hex_strings()
    }

    /// Replaces the swatch at `index` and pushes the scheme.
    ///
    /// # Errors
    ///
    /// Returns a `ValueError` without changing anything if `hex` does not
    /// parse or `index` is out of range, or an error if the scheme could not
    /// be pushed.
    pub async fn set_color_scheme_at(&self, index: usize, hex: &str) -> Result<()> {
        let color = RgbColor::from_hex(hex)?;
        self.inner.color_scheme.write().set(index, color)?;
        self.push_color_scheme().await
    }

    /// Replaces every swatch and pushes the scheme.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` without changing anything if any
    /// entry does not parse, or an error if the scheme could not be pushed.
    pub async fn set_color_scheme<I, S>(&self, colors: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let scheme = ColorScheme::from_hex(colors)?;
        *self.inner.color_scheme.write() = scheme;
        self.push_color_scheme().await
    }

    // ========== Polling ==========

    /// Runs one refresh tick.
    ///
    /// While connected, retrieves the device info and then notifies
    /// [`ClientEvent::Change`] subscribers whatever the outcome. Retrieval
    /// errors are logged, not returned. While disconnected, does nothing.
    ///
    /// A tick interrupted by [`disconnect`](Self::disconnect) does not
    /// notify.
    pub async fn refresh(&self) {
        if !self.connected() {
            tracing::trace!("Not connected, skipping refresh");
            return;
        }

        if let Err(e) = self.retrieve_info().await {
            tracing::warn!(error = %e, "Periodic refresh failed");
        }

        if !self.connected() {
            tracing::debug!("Disconnected during refresh, change not notified");
            return;
        }

        self.inner.callbacks.dispatch(ClientEvent::Change);
    }

    /// Starts refreshing every poll interval (5 seconds by default).
    ///
    /// The loop keeps running while disconnected, it just skips the ticks.
    /// It stops when the returned handle is stopped or dropped, or when every
    /// handle to this client is gone.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use = "polling stops when the handle is dropped"]
    pub fn start_polling(&self) -> PollingHandle {
        poller::spawn(Arc::downgrade(&self.inner), self.inner.poll_interval)
    }

    /// Returns the interval between refresh ticks.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    // ========== Internal ==========

    fn update_state(&self, f: impl FnOnce(&mut DeviceState)) {
        f(&mut *self.inner.state.write());
    }

    /// Retrieves the device info and replaces the local mirror with it.
    async fn retrieve_info(&self) -> Result<()> {
        let Some(api_key) = self.api_key() else {
            return Err(Error::NotConnected);
        };

        let response = self.inner.transport.fetch_info(&api_key).await?;

        if response.status != FETCH_OK {
            return Err(ProtocolError::UnexpectedStatus(response.status).into());
        }

        let Some(state) = response.info.state else {
            return Err(ParseError::MissingField("state".to_string()).into());
        };
        let scheme = response
            .info
            .settings
            .and_then(|settings| settings.color_scheme)
            .map(|packed| ColorScheme::from_packed(&packed));

        let mut connection = self.inner.connection.write();
        if connection.api_key.as_deref() != Some(api_key.as_str()) {
            // disconnected or switched keys while the request was in flight
            tracing::debug!("Discarding info fetched with a stale API key");
            return Ok(());
        }

        *self.inner.state.write() = state;
        if let Some(scheme) = scheme {
            *self.inner.color_scheme.write() = scheme;
        }
        connection.connected = true;

        tracing::debug!(state = ?state, "Device info retrieved");
        Ok(())
    }

    /// Pushes the whole local state to the device.
    async fn push_state(&self) -> Result<()> {
        let update = {
            let connection = self.inner.connection.read();
            match (&connection.api_key, connection.connected) {
                (Some(api_key), true) => StateUpdate::new(self.state(), api_key.as_str()),
                _ => {
                    tracing::debug!("Not connected, state kept locally");
                    return Err(Error::NotConnected);
                }
            }
        };

        let status = self.inner.transport.push_state(&update).await?;
        if status != PUSH_OK {
            tracing::debug!(status, "State push answered with unexpected success status");
        }

        Ok(())
    }

    /// Pushes the color scheme to the device.
    ///
    /// The API has no write path for the scheme yet, so this only checks the
    /// connection.
    #[allow(clippy::unused_async)]
    async fn push_color_scheme(&self) -> Result<()> {
        if !self.connected() {
            tracing::debug!("Not connected, color scheme kept locally");
            return Err(Error::NotConnected);
        }

        tracing::debug!("Color scheme push is not supported by the API, kept locally");
        Ok(())
    }
}

impl<T: Transport> Subscribable for Floower<T> {
    fn on<F>(&self, event: ClientEvent, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.callbacks.subscribe(event, callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.callbacks.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::protocol::{FetchResponse, InfoResponse};
    use crate::store::MemoryKeyStore;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Transport double answering from canned values.
    #[derive(Debug, Clone)]
    struct FakeTransport {
        fetch: Arc<Mutex<std::result::Result<FetchResponse, u16>>>,
        push_status: u16,
        fetches: Arc<AtomicUsize>,
        pushes: Arc<Mutex<Vec<StateUpdate>>>,
    }

    impl FakeTransport {
        fn answering(body: &str) -> Self {
            Self {
                fetch: Arc::new(Mutex::new(Ok(FetchResponse {
                    status: 200,
                    info: InfoResponse::parse_lenient(body),
                }))),
                push_status: 204,
                fetches: Arc::new(AtomicUsize::new(0)),
                pushes: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(status: u16) -> Self {
            let transport = Self::answering("{}");
            *transport.fetch.lock() = Err(status);
            transport
        }

        fn pushed(&self) -> Vec<StateUpdate> {
            self.pushes.lock().clone()
        }
    }

    impl Transport for FakeTransport {
        async fn fetch_info(
            &self,
            _api_key: &str,
        ) -> std::result::Result<FetchResponse, ProtocolError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.fetch
                .lock()
                .clone()
                .map_err(|status| ProtocolError::Status {
                    status,
                    body: String::new(),
                })
        }

        async fn push_state(&self, update: &StateUpdate) -> std::result::Result<u16, ProtocolError> {
            self.pushes.lock().push(update.clone());
            Ok(self.push_status)
        }
    }

    const SCENARIO: &str = r#"{
        "state": {"petalsLevel": 100, "red": 10, "green": 20, "blue": 30},
        "settings": {"colorScheme": [0]}
    }"#;

    fn client(transport: &FakeTransport) -> (Floower<FakeTransport>, MemoryKeyStore) {
        let store = MemoryKeyStore::new();
        let floower = Floower::new(
            transport.clone(),
            Arc::new(store.clone()),
            Duration::from_secs(5),
        );
        (floower, store)
    }

    #[tokio::test]
    async fn connect_mirrors_device() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, store) = client(&transport);

        floower.connect("K").await.unwrap();

        assert!(floower.connected());
        assert_eq!(floower.petals(), PetalsLevel::OPEN);
        assert_eq!(floower.color().as_deref(), Some("#0a141e"));
        assert_eq!(floower.color_scheme(), ["#ffffff"]);
        assert_eq!(store.get(LAST_USED_API_KEY).unwrap().as_deref(), Some("K"));
    }

    #[tokio::test]
    async fn failed_connect_still_persists_key() {
        let transport = FakeTransport::failing(500);
        let (floower, store) = client(&transport);

        let err = floower.connect("bad").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::Status { status: 500, .. })
        ));
        assert!(!floower.connected());
        assert_eq!(store.get(LAST_USED_API_KEY).unwrap().as_deref(), Some("bad"));
    }

    #[tokio::test]
    async fn reconnect_without_key_is_a_no_op() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);

        floower.reconnect().await.unwrap();

        assert!(!floower.connected());
        assert_eq!(transport.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reconnect_uses_persisted_key() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, store) = client(&transport);
        store.set(LAST_USED_API_KEY, "saved").unwrap();

        floower.reconnect().await.unwrap();

        assert!(floower.connected());
        assert_eq!(floower.api_key().as_deref(), Some("saved"));
    }

    #[tokio::test]
    async fn missing_state_leaves_client_disconnected() {
        let transport = FakeTransport::answering("garbage");
        let (floower, _store) = client(&transport);

        let err = floower.connect("K").await.unwrap_err();

        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
        assert!(!floower.connected());
    }

    #[tokio::test]
    async fn non_200_success_is_not_a_connection() {
        let transport = FakeTransport::answering(SCENARIO);
        transport.fetch.lock().as_mut().unwrap().status = 202;
        let (floower, _store) = client(&transport);

        let err = floower.connect("K").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Protocol(ProtocolError::UnexpectedStatus(202))
        ));
        assert!(!floower.connected());
        assert_eq!(floower.state(), DeviceState::new());
    }

    #[tokio::test]
    async fn scheme_is_kept_when_settings_are_absent() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        *transport.fetch.lock() = Ok(FetchResponse {
            status: 200,
            info: InfoResponse::parse_lenient(
                r#"{"state": {"petalsLevel": 0, "red": 1, "green": 1, "blue": 1}}"#,
            ),
        });
        floower.refresh().await;

        assert_eq!(floower.petals(), PetalsLevel::CLOSED);
        assert_eq!(floower.color_scheme(), ["#ffffff"]);
    }

    #[tokio::test]
    async fn malformed_scheme_keeps_old_scheme_but_applies_state() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        *transport.fetch.lock() = Ok(FetchResponse {
            status: 200,
            info: InfoResponse::parse_lenient(
                r#"{
                    "state": {"petalsLevel": 0, "red": 0, "green": 0, "blue": 255},
                    "settings": {"colorScheme": [0, -1]}
                }"#,
            ),
        });
        floower.refresh().await;

        assert!(floower.connected());
        assert_eq!(floower.color().as_deref(), Some("#0000ff"));
        assert_eq!(floower.color_scheme(), ["#ffffff"]);
    }

    #[tokio::test]
    async fn malformed_scheme_does_not_block_connect() {
        let transport = FakeTransport::answering(
            r#"{
                "state": {"petalsLevel": 100, "red": 10, "green": 20, "blue": 30},
                "settings": {"colorScheme": [0, -1]}
            }"#,
        );
        let (floower, _store) = client(&transport);

        floower.connect("K").await.unwrap();

        assert!(floower.connected());
        assert_eq!(floower.petals(), PetalsLevel::OPEN);
        assert!(floower.color_scheme().is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_connection() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        *transport.fetch.lock() = Err(503);
        floower.refresh().await;

        assert!(floower.connected());
        assert_eq!(floower.color().as_deref(), Some("#0a141e"));
    }

    #[tokio::test]
    async fn disconnect_clears_key_and_notifies() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, store) = client(&transport);
        floower.connect("K").await.unwrap();

        let notified = Arc::new(AtomicUsize::new(0));
        let n = Arc::clone(&notified);
        floower.on_disconnected(move || {
            n.fetch_add(1, Ordering::SeqCst);
        });

        floower.disconnect().unwrap();

        assert!(!floower.connected());
        assert_eq!(floower.api_key(), None);
        assert_eq!(store.get(LAST_USED_API_KEY).unwrap(), None);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn off_zeroes_everything_and_pushes() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        floower.off().await.unwrap();

        assert_eq!(floower.state(), DeviceState::new());
        assert_eq!(floower.color(), None);
        let pushed = transport.pushed();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].state(), &DeviceState::new());
        assert_eq!(pushed[0].api_key(), "K");
    }

    #[tokio::test]
    async fn toggle_alternates_between_closed_and_open() {
        let transport = FakeTransport::answering(
            r#"{"state": {"petalsLevel": 0, "red": 0, "green": 0, "blue": 0}}"#,
        );
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        floower.toggle().await.unwrap();
        assert_eq!(floower.petals(), PetalsLevel::OPEN);
        floower.toggle().await.unwrap();
        assert_eq!(floower.petals(), PetalsLevel::CLOSED);

        let levels: Vec<u8> = transport
            .pushed()
            .iter()
            .map(|u| u.state().petals().value())
            .collect();
        assert_eq!(levels, [100, 0]);
    }

    #[tokio::test]
    async fn open_and_close_keep_color() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        floower.close().await.unwrap();
        assert_eq!(floower.petals(), PetalsLevel::CLOSED);
        assert_eq!(floower.color().as_deref(), Some("#0a141e"));

        floower.open().await.unwrap();
        assert_eq!(floower.petals(), PetalsLevel::OPEN);
    }

    #[tokio::test]
    async fn set_color_pushes_channels() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        floower.set_color("#0000ff").await.unwrap();

        assert_eq!(floower.color().as_deref(), Some("#0000ff"));
        assert_eq!(transport.pushed()[0].state().color(), RgbColor::new(0, 0, 255));
    }

    #[tokio::test]
    async fn invalid_color_changes_nothing() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        let err = floower.set_color("#xyzxyz").await.unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::InvalidHexColor(_))));

        let err = floower.set_color("#f00").await.unwrap_err();
        assert!(matches!(err, Error::Value(ValueError::InvalidHexColor(_))));

        assert_eq!(floower.color().as_deref(), Some("#0a141e"));
        assert!(transport.pushed().is_empty());
    }

    #[tokio::test]
    async fn changes_while_disconnected_stay_local() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);

        let err = floower.open().await.unwrap_err();

        assert!(matches!(err, Error::NotConnected));
        assert_eq!(floower.petals(), PetalsLevel::OPEN);
        assert!(transport.pushed().is_empty());
    }

    #[tokio::test]
    async fn unexpected_push_status_is_accepted() {
        let mut transport = FakeTransport::answering(SCENARIO);
        transport.push_status = 200;
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        floower.close().await.unwrap();
    }

    #[tokio::test]
    async fn color_scheme_updates() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        floower.connect("K").await.unwrap();

        floower.set_color_scheme_at(0, "#FF0000").await.unwrap();
        assert_eq!(floower.color_scheme(), ["#ff0000"]);

        let err = floower.set_color_scheme_at(3, "#00ff00").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::SchemeIndexOutOfRange { index: 3, len: 1 })
        ));

        floower
            .set_color_scheme(["#010203", "#040506"])
            .await
            .unwrap();
        assert_eq!(floower.color_scheme(), ["#010203", "#040506"]);

        assert!(floower.set_color_scheme(["#010203", "bad"]).await.is_err());
        assert_eq!(floower.color_scheme(), ["#010203", "#040506"]);

        // the scheme has no write path, nothing goes over the wire
        assert!(transport.pushed().is_empty());
    }

    #[tokio::test]
    async fn color_scheme_change_needs_connection() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);

        let err = floower.set_color_scheme(["#ffffff"]).await.unwrap_err();

        assert!(matches!(err, Error::NotConnected));
        assert_eq!(floower.color_scheme(), ["#ffffff"]);
    }

    #[tokio::test]
    async fn refresh_notifies_only_while_connected() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);

        let changes = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&changes);
        floower.on_change(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        floower.refresh().await;
        assert_eq!(changes.load(Ordering::SeqCst), 0);
        assert_eq!(transport.fetches.load(Ordering::SeqCst), 0);

        floower.connect("K").await.unwrap();
        floower.refresh().await;
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(transport.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let transport = FakeTransport::answering(SCENARIO);
        let (floower, _store) = client(&transport);
        let other = floower.clone();

        floower.connect("K").await.unwrap();

        assert!(other.connected());
        assert_eq!(other.petals(), PetalsLevel::OPEN);
    }
}
