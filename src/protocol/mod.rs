// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the Floower cloud API.
//!
//! The API has two calls:
//!
//! - `GET {base}?apiKey={key}` returns the device state and settings
//! - `PUT {base}` with `{petalsLevel, red, green, blue, apiKey}` updates the
//!   state and answers `204 No Content`
//!
//! [`Transport`] abstracts these two calls so the client can run against
//! [`HttpClient`] in production and against an in-memory double in tests.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProtocolError;
use crate::state::DeviceState;

/// Body of a successful info request.
///
/// Every field is optional. A body that is not valid JSON parses as
/// [`InfoResponse::default`], and each top-level field is decoded on its
/// own: a malformed `settings` object does not cost the `state`, and the
/// other way round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoResponse {
    /// Current device state.
    pub state: Option<DeviceState>,
    /// Device settings.
    pub settings: Option<Settings>,
}

impl InfoResponse {
    /// Parses a response body, dropping whatever does not decode.
    #[must_use]
    pub fn parse_lenient(body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unparsable info body");
                return Self::default();
            }
        };

        Self {
            state: lenient_field(&value, "state"),
            settings: lenient_field(&value, "settings"),
        }
    }
}

/// Decodes `value[field]`, or `None` if it is absent or malformed.
fn lenient_field<T: DeserializeOwned>(value: &Value, field: &str) -> Option<T> {
    let raw = value.get(field)?;
    T::deserialize(raw)
        .map_err(|e| tracing::debug!(field, error = %e, "Ignoring malformed info field"))
        .ok()
}

/// Device settings carried by an info response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Swatches, each packed as `(hue << 7) | saturation`.
    pub color_scheme: Option<Vec<u32>>,
}

/// An info request that completed with a 2xx or 3xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The parsed body.
    pub info: InfoResponse,
}

/// Body of a state update request.
///
/// # Examples
///
/// ```
/// use floower_client::protocol::StateUpdate;
/// use floower_client::state::DeviceState;
///
/// let update = StateUpdate::new(DeviceState::new(), "K");
/// let json = serde_json::to_value(&update).unwrap();
/// assert_eq!(
///     json,
///     serde_json::json!({"petalsLevel": 0, "red": 0, "green": 0, "blue": 0, "apiKey": "K"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    #[serde(flatten)]
    state: DeviceState,
    api_key: String,
}

impl StateUpdate {
    /// Creates an update pushing `state` on behalf of `api_key`.
    #[must_use]
    pub fn new(state: DeviceState, api_key: impl Into<String>) -> Self {
        Self {
            state,
            api_key: api_key.into(),
        }
    }

    /// Returns the state being pushed.
    #[must_use]
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Returns the API key the update is sent with.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Trait for transports that can reach the Floower API.
///
/// Implementations report 2xx and 3xx answers as `Ok` and every other
/// status as [`ProtocolError::Status`]. Interpreting the success status is
/// left to the caller.
pub trait Transport: Send + Sync + 'static {
    /// Retrieves the device info for `api_key`.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the status is not
    /// 2xx/3xx.
    fn fetch_info(
        &self,
        api_key: &str,
    ) -> impl Future<Output = Result<FetchResponse, ProtocolError>> + Send;

    /// Pushes a full state update and returns the response status.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request fails or the status is not
    /// 2xx/3xx.
    fn push_state(
        &self,
        update: &StateUpdate,
    ) -> impl Future<Output = Result<u16, ProtocolError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PetalsLevel, RgbColor};

    #[test]
    fn parses_full_info() {
        let info = InfoResponse::parse_lenient(
            r#"{
                "state": {"petalsLevel": 100, "red": 10, "green": 20, "blue": 30},
                "settings": {"colorScheme": [0, 15460]}
            }"#,
        );
        assert_eq!(
            info.state,
            Some(DeviceState::with_parts(
                PetalsLevel::OPEN,
                RgbColor::new(10, 20, 30)
            ))
        );
        assert_eq!(info.settings.unwrap().color_scheme, Some(vec![0, 15460]));
    }

    #[test]
    fn settings_are_optional() {
        let info = InfoResponse::parse_lenient(
            r#"{"state": {"petalsLevel": 0, "red": 0, "green": 0, "blue": 0}}"#,
        );
        assert!(info.state.is_some());
        assert!(info.settings.is_none());

        let info = InfoResponse::parse_lenient(r#"{"state": {}, "settings": {}}"#);
        assert_eq!(info.settings.unwrap().color_scheme, None);
    }

    #[test]
    fn bad_scheme_entry_keeps_state() {
        let info = InfoResponse::parse_lenient(
            r#"{
                "state": {"petalsLevel": 100, "red": 10, "green": 20, "blue": 30},
                "settings": {"colorScheme": [0, -1]}
            }"#,
        );
        assert_eq!(
            info.state,
            Some(DeviceState::with_parts(
                PetalsLevel::OPEN,
                RgbColor::new(10, 20, 30)
            ))
        );
        assert_eq!(info.settings, None);
    }

    #[test]
    fn bad_state_keeps_settings() {
        let info = InfoResponse::parse_lenient(
            r#"{"state": "broken", "settings": {"colorScheme": [100]}}"#,
        );
        assert_eq!(info.state, None);
        assert_eq!(info.settings.unwrap().color_scheme, Some(vec![100]));
    }

    #[test]
    fn non_object_body_is_empty() {
        assert_eq!(InfoResponse::parse_lenient("[1, 2]"), InfoResponse::default());
    }

    #[test]
    fn malformed_json_is_empty() {
        assert_eq!(InfoResponse::parse_lenient("not json"), InfoResponse::default());
        assert_eq!(InfoResponse::parse_lenient(""), InfoResponse::default());
    }

    #[test]
    fn state_update_flattens_state() {
        let update = StateUpdate::new(
            DeviceState::with_parts(PetalsLevel::OPEN, RgbColor::new(1, 2, 3)),
            "secret",
        );
        assert_eq!(update.api_key(), "secret");
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "petalsLevel": 100,
                "red": 1,
                "green": 2,
                "blue": 3,
                "apiKey": "secret"
            })
        );
    }
}
