// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for Floower device control.
//!
//! # Types
//!
//! - [`RgbColor`] - Light color, 8 bits per channel, `#rrggbb` encoding
//! - [`HsColor`] - Hue/saturation pair packed into one integer by the settings payload
//! - [`PetalsLevel`] - How far the petals are open (0-100%)

mod hs_color;
mod petals;
mod rgb_color;

pub use hs_color::HsColor;
pub use petals::PetalsLevel;
pub use rgb_color::RgbColor;
