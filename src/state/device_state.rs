// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mirrored device state.

use serde::{Deserialize, Serialize};

use crate::types::{PetalsLevel, RgbColor};

/// State of a Floower device: petal level plus light color.
///
/// This is the unit pulled from and pushed to the API. The four fields
/// travel together in every request even when only one changed locally.
///
/// The JSON layout matches the API: `{"petalsLevel", "red", "green", "blue"}`.
/// Missing fields decode as zero.
///
/// # Examples
///
/// ```
/// use floower_client::state::DeviceState;
/// use floower_client::types::{PetalsLevel, RgbColor};
///
/// let mut state = DeviceState::new();
/// assert_eq!(state.color_hex(), None);
///
/// state.set_color(RgbColor::new(10, 20, 30));
/// state.set_petals(PetalsLevel::OPEN);
/// assert_eq!(state.color_hex().as_deref(), Some("#0a141e"));
///
/// state.turn_off();
/// assert_eq!(state, DeviceState::new());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceState {
    petals_level: PetalsLevel,
    red: u8,
    green: u8,
    blue: u8,
}

impl DeviceState {
    /// Creates a closed, unlit state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state from its parts.
    #[must_use]
    pub const fn with_parts(petals: PetalsLevel, color: RgbColor) -> Self {
        Self {
            petals_level: petals,
            red: color.red(),
            green: color.green(),
            blue: color.blue(),
        }
    }

    /// Gets the petal level.
    #[must_use]
    pub const fn petals(&self) -> PetalsLevel {
        self.petals_level
    }

    /// Sets the petal level.
    pub fn set_petals(&mut self, level: PetalsLevel) {
        self.petals_level = level;
    }

    /// Gets the light color, black included.
    #[must_use]
    pub const fn color(&self) -> RgbColor {
        RgbColor::new(self.red, self.green, self.blue)
    }

    /// Sets the light color.
    pub fn set_color(&mut self, color: RgbColor) {
        self.red = color.red();
        self.green = color.green();
        self.blue = color.blue();
    }

    /// Gets the light color as `#rrggbb`, or `None` when every channel is 0.
    ///
    /// An explicit `#000000` therefore reads the same as "no color".
    #[must_use]
    pub fn color_hex(&self) -> Option<String> {
        let color = self.color();
        (!color.is_black()).then(|| color.to_hex())
    }

    /// Closes the petals and clears the color.
    pub fn turn_off(&mut self) {
        *self = Self::default();
    }
}
