// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hue/saturation colors as packed by the device settings payload.
//!
//! The color scheme stored on the device is a list of integers, each packing
//! a hue (0-360) in the upper bits and a saturation (0-100) in the low 7
//! bits. Brightness is not stored; swatches are always shown at full value.

use std::fmt;

use super::RgbColor;

/// Number of low bits holding the saturation.
const SATURATION_BITS: u32 = 7;

/// Mask selecting the saturation bits.
const SATURATION_MASK: u32 = (1 << SATURATION_BITS) - 1;

/// A hue/saturation pair decoded from the packed settings format.
///
/// # Examples
///
/// ```
/// use floower_client::types::HsColor;
///
/// // hue 120, saturation 100
/// let green = HsColor::from_packed((120 << 7) | 100);
/// assert_eq!(green.hue(), 120);
/// assert_eq!(green.saturation(), 100);
/// assert_eq!(green.to_rgb().to_hex(), "#00ff00");
///
/// // saturation 0 is white whatever the hue
/// assert_eq!(HsColor::from_packed(0).to_rgb().to_hex(), "#ffffff");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HsColor {
    hue: u32,
    saturation: u8,
}

impl HsColor {
    /// Maximum meaningful hue.
    pub const MAX_HUE: u32 = 360;

    /// Maximum meaningful saturation.
    pub const MAX_SATURATION: u8 = 100;

    /// Decodes a packed hue/saturation value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            hue: value >> SATURATION_BITS,
            // masked to 7 bits
            saturation: (value & SATURATION_MASK) as u8,
        }
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> u32 {
        self.hue
    }

    /// Returns the saturation percentage.
    ///
    /// The packed format can carry up to 127; values above 100 are treated
    /// as 100 when converting.
    #[must_use]
    pub const fn saturation(&self) -> u8 {
        self.saturation
    }

    /// Converts to RGB at full brightness.
    #[must_use]
    pub fn to_rgb(&self) -> RgbColor {
        let hue = f64::from(self.hue) / f64::from(Self::MAX_HUE);
        let saturation =
            (f64::from(self.saturation) / f64::from(Self::MAX_SATURATION)).min(1.0);
        hsv_to_rgb(hue, saturation, 1.0)
    }

    /// Converts to a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.to_rgb().to_hex()
    }
}

impl From<u32> for HsColor {
    fn from(value: u32) -> Self {
        Self::from_packed(value)
    }
}

impl fmt::Display for HsColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HS({}, {}%)", self.hue, self.saturation)
    }
}

/// Converts HSV with every component in `[0.0, 1.0]` to RGB.
///
/// Uses the six-sector formula; the sector is `floor(h * 6) mod 6`, so a hue
/// of exactly 1.0 wraps back to red.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> RgbColor {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    let channel = |x: f64| (x * 255.0).round().clamp(0.0, 255.0) as u8;
    RgbColor::new(channel(r), channel(g), channel(b))
}
