// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Petal level type.
//!
//! This module provides a type-safe representation of how far the petals
//! are open, ensuring values are always within 0-100.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// How far the petals are open, as a percentage (0-100).
///
/// 0 is closed (and reads as "off"), 100 is fully open. The UI only drives
/// the two extremes, but any value in between is accepted.
///
/// On the wire the level is a plain number. Anything the API sends is
/// saturated into 0-100 rather than rejected: negatives read as closed,
/// fractions are rounded.
///
/// # Examples
///
/// ```
/// use floower_client::types::PetalsLevel;
///
/// let half = PetalsLevel::new(50).unwrap();
/// assert_eq!(half.value(), 50);
/// assert!(half.is_open());
///
/// assert_eq!(PetalsLevel::CLOSED.toggled(), PetalsLevel::OPEN);
/// assert!(PetalsLevel::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "f64", into = "u8")]
pub struct PetalsLevel(u8);

impl PetalsLevel {
    /// Petals fully closed.
    pub const CLOSED: Self = Self(0);

    /// Petals fully open.
    pub const OPEN: Self = Self(100);

    /// Creates a new petal level.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > Self::OPEN.0 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a petal level, clamping to the valid range.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the level as a percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` for any non-zero level.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.0 != 0
    }

    /// Returns [`CLOSED`](Self::CLOSED) when open at all, otherwise
    /// [`OPEN`](Self::OPEN).
    #[must_use]
    pub const fn toggled(&self) -> Self {
        if self.is_open() { Self::CLOSED } else { Self::OPEN }
    }
}

impl fmt::Display for PetalsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for PetalsLevel {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<f64> for PetalsLevel {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(value: f64) -> Self {
        if value.is_nan() {
            return Self::CLOSED;
        }
        Self(value.round().clamp(0.0, 100.0) as u8)
    }
}

impl From<PetalsLevel> for u8 {
    fn from(level: PetalsLevel) -> Self {
        level.0
    }
}
