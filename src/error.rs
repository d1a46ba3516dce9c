// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Floower client.
//!
//! This module provides the error hierarchy for the library: value
//! validation, HTTP communication, JSON parsing and API key persistence.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the device API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred while reading or writing the persisted API key.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The client is not connected to a device, so nothing was sent.
    #[error("device is not connected")]
    NotConnected,
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0}")]
    InvalidHexColor(String),

    /// A color scheme index does not address an existing swatch.
    #[error("color scheme index {index} is out of range (length {len})")]
    SchemeIndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Current number of swatches.
        len: usize,
    },
}

/// Errors related to HTTP communication with the device API.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed at the transport level.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The API answered with a success status the client does not handle.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing API responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),
}

/// Errors related to persisting the API key.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid JSON object.
    #[error("corrupt store: {0}")]
    Json(#[from] serde_json::Error),

    /// No configuration directory could be determined for this platform.
    #[error("could not determine a storage location")]
    NoLocation,
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::OutOfRange {
            min: 0,
            max: 100,
            actual: 150,
        };
        assert_eq!(err.to_string(), "value 150 is out of range [0, 100]");
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::InvalidHexColor("#zz".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::InvalidHexColor(_))));
    }

    #[test]
    fn scheme_index_display() {
        let err = ValueError::SchemeIndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "color scheme index 4 is out of range (length 2)"
        );
    }

    #[test]
    fn status_error_display() {
        let err = ProtocolError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 401: invalid api key");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("state".to_string());
        assert_eq!(err.to_string(), "missing field in response: state");
    }

    #[test]
    fn not_connected_display() {
        assert_eq!(Error::NotConnected.to_string(), "device is not connected");
    }
}
