// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Locally mirrored device state.
//!
//! [`DeviceState`] is the petal level and color quadruple exchanged with the
//! API, and [`ColorScheme`] is the list of swatches from the device settings.
//! The client owns one of each and replaces them wholesale on every
//! successful retrieval.
//!
//! # Examples
//!
//! ```
//! use floower_client::state::DeviceState;
//! use floower_client::types::PetalsLevel;
//!
//! let mut state = DeviceState::new();
//! state.set_petals(state.petals().toggled());
//! assert_eq!(state.petals(), PetalsLevel::OPEN);
//! ```

mod color_scheme;
mod device_state;

pub use color_scheme::ColorScheme;
pub use device_state::DeviceState;
