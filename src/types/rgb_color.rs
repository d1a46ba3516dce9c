// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! RGB color type with hex encoding.
//!
//! The device API carries light color as three 8-bit channels, while the
//! client surface exposes colors as `#rrggbb` strings. [`RgbColor`] converts
//! between the two.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// RGB color with 8-bit channels (0-255).
///
/// # Examples
///
/// ```
/// use floower_client::types::RgbColor;
///
/// let color = RgbColor::new(10, 20, 30);
/// assert_eq!(color.to_hex(), "#0a141e");
///
/// let parsed = RgbColor::from_hex("#0A141E").unwrap();
/// assert_eq!(parsed, color);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl RgbColor {
    /// Black, which the device treats as "no color".
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Full white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new RGB color.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    ///
    /// Bits above the low 24 are ignored.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_packed(value: u32) -> Self {
        Self::new(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    /// Parses an RGB color from a hex string.
    ///
    /// Accepts `#RRGGBB` and `RRGGBB`, in either case. Shorthand `#RGB` is
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHexColor` if the string has the wrong
    /// length or contains a non-hex character.
    ///
    /// # Examples
    ///
    /// ```
    /// use floower_client::types::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#0000ff").unwrap();
    /// assert_eq!(color.blue(), 255);
    ///
    /// assert!(RgbColor::from_hex("#f00").is_err());
    /// assert!(RgbColor::from_hex("#12345g").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ValueError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || ValueError::InvalidHexColor(hex.to_string());

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let packed = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(Self::from_packed(packed))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Returns the color packed as `0xRRGGBB`.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn packed(&self) -> u32 {
        ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32
    }

    /// Returns `true` if every channel is zero.
    #[must_use]
    pub const fn is_black(&self) -> bool {
        self.red == 0 && self.green == 0 && self.blue == 0
    }

    /// Returns the color as a lowercase `#rrggbb` string.
    ///
    /// Leading zero bytes are always kept.
    ///
    /// ```
    /// use floower_client::types::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(0, 0, 255).to_hex(), "#0000ff");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:06x}", self.packed())
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.packed())
    }
}

impl FromStr for RgbColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<&str> for RgbColor {
    type Error = ValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_hex(value)
    }
}

impl From<(u8, u8, u8)> for RgbColor {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}
