// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color scheme swatches.

use crate::error::ValueError;
use crate::types::{HsColor, RgbColor};

/// Ordered list of swatch colors configured on the device.
///
/// The position of a color is its swatch index. The API delivers the scheme
/// as HS-packed integers; [`from_packed`](Self::from_packed) decodes them.
///
/// # Examples
///
/// ```
/// use floower_client::state::ColorScheme;
/// use floower_client::types::RgbColor;
///
/// let mut scheme = ColorScheme::from_packed(&[0, (120 << 7) | 100]);
/// assert_eq!(scheme.to_hex_strings(), ["#ffffff", "#00ff00"]);
///
/// scheme.set(0, RgbColor::new(255, 0, 0)).unwrap();
/// assert_eq!(scheme.get(0), Some(RgbColor::new(255, 0, 0)));
/// assert!(scheme.set(2, RgbColor::WHITE).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorScheme {
    colors: Vec<RgbColor>,
}

impl ColorScheme {
    /// Creates an empty scheme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a scheme from the API's HS-packed integers.
    #[must_use]
    pub fn from_packed(values: &[u32]) -> Self {
        values
            .iter()
            .map(|&value| HsColor::from_packed(value).to_rgb())
            .collect()
    }

    /// Parses a scheme from hex strings.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` for the first entry that does
    /// not parse.
    pub fn from_hex<I, S>(values: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .map(|value| RgbColor::from_hex(value.as_ref()))
            .collect()
    }

    /// Returns the number of swatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if there are no swatches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the swatch at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<RgbColor> {
        self.colors.get(index).copied()
    }

    /// Replaces the swatch at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::SchemeIndexOutOfRange` if there is no swatch at
    /// `index`.
    pub fn set(&mut self, index: usize, color: RgbColor) -> Result<(), ValueError> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(ValueError::SchemeIndexOutOfRange { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Iterates over the swatches in order.
    pub fn iter(&self) -> impl Iterator<Item = RgbColor> + '_ {
        self.colors.iter().copied()
    }

    /// Returns the swatches as lowercase `#rrggbb` strings.
    #[must_use]
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(RgbColor::to_hex).collect()
    }
}

impl FromIterator<RgbColor> for ColorScheme {
    fn from_iter<T: IntoIterator<Item = RgbColor>>(iter: T) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}
