// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the Floower cloud API.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::error::ProtocolError;
use crate::protocol::{FetchResponse, InfoResponse, StateUpdate, Transport};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for the HTTP transport.
///
/// # Examples
///
/// ```
/// use floower_client::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Production endpoint, no timeout
/// let config = HttpConfig::new();
/// assert_eq!(config.base_url(), "https://api.floud.cz/floower");
///
/// // Custom endpoint
/// let config = HttpConfig::new()
///     .with_base_url("http://127.0.0.1:8080/floower")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpConfig {
    /// The public Floower API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.floud.cz/floower";

    /// Creates a configuration for the public API endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets a request timeout. Requests never time out by default.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the base URL is not an
    /// `http://` or `https://` URL, or an HTTP error if the client cannot be
    /// built.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(self.base_url));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// HttpClient - reqwest transport
// ============================================================================

/// HTTP client for the Floower API.
///
/// # Examples
///
/// ```no_run
/// use floower_client::protocol::{HttpConfig, Transport};
///
/// # async fn example() -> floower_client::Result<()> {
/// let client = HttpConfig::new().into_client()?;
/// let response = client.fetch_info("my-api-key").await?;
/// println!("{:?}", response.info.state);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Returns the API endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the info URL for a key.
    fn info_url(&self, api_key: &str) -> String {
        format!("{}?apiKey={}", self.base_url, urlencoding::encode(api_key))
    }

    /// Splits a response into its status and body, failing on non-2xx/3xx.
    async fn read(response: Response) -> Result<(u16, String), ProtocolError> {
        let status = response.status();
        let body = response.text().await.map_err(ProtocolError::Http)?;

        if !(status.is_success() || status.is_redirection()) {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok((status.as_u16(), body))
    }
}

impl Transport for HttpClient {
    async fn fetch_info(&self, api_key: &str) -> Result<FetchResponse, ProtocolError> {
        tracing::debug!(url = %self.base_url, "Fetching device info");

        let response = self
            .client
            .get(self.info_url(api_key))
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let (status, body) = Self::read(response).await?;

        tracing::debug!(status, body = %body, "Received device info");

        Ok(FetchResponse {
            status,
            info: InfoResponse::parse_lenient(&body),
        })
    }

    async fn push_state(&self, update: &StateUpdate) -> Result<u16, ProtocolError> {
        tracing::debug!(url = %self.base_url, state = ?update.state(), "Pushing device state");

        let response = self
            .client
            .put(&self.base_url)
            .json(update)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let (status, _) = Self::read(response).await?;

        tracing::debug!(status, "State push answered");

        Ok(status)
    }
}
