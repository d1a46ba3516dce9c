// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floower Client - A Rust library to control a Floower through its cloud API.
//!
//! A Floower is a mechanical flower whose petals open and close and whose
//! blossom lights up in any color. This library keeps a local mirror of the
//! device state, pushes changes to the cloud API and refreshes the mirror
//! periodically.
//!
//! # Supported Features
//!
//! - **Petals**: open, close, toggle, set an exact level (0-100)
//! - **Light**: set the color from a `#rrggbb` string, turn everything off
//! - **Color scheme**: read and edit the swatches stored on the device
//! - **Session**: connect with an API key, resume with the persisted key
//! - **Notifications**: subscribe to periodic refreshes and disconnection
//!
//! # Quick Start
//!
//! ```no_run
//! use floower_client::Floower;
//!
//! #[tokio::main]
//! async fn main() -> floower_client::Result<()> {
//!     let floower = Floower::builder().build()?;
//!
//!     floower.connect("my-api-key").await?;
//!
//!     floower.open().await?;
//!     floower.set_color("#ff8000").await?;
//!     println!("color is {:?}", floower.color());
//!
//!     floower.off().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Resuming a Session with Polling
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use floower_client::store::FileKeyStore;
//! use floower_client::{Floower, subscription::Subscribable};
//!
//! #[tokio::main]
//! async fn main() -> floower_client::Result<()> {
//!     let floower = Floower::builder()
//!         .with_key_store(Arc::new(FileKeyStore::default_location()?))
//!         .build()?;
//!
//!     // No-op if no key was persisted
//!     floower.reconnect().await?;
//!
//!     floower.on_change({
//!         let floower = floower.clone();
//!         move || println!("petals at {}", floower.petals())
//!     });
//!     floower.on_disconnected(|| println!("disconnected"));
//!
//!     let polling = floower.start_polling();
//!     tokio::time::sleep(Duration::from_secs(60)).await;
//!     polling.stop();
//!     Ok(())
//! }
//! ```
//!
//! ## Working with Colors
//!
//! Swatches arrive packed as `(hue << 7) | saturation` and decode to RGB at
//! full brightness:
//!
//! ```
//! use floower_client::{HsColor, RgbColor};
//!
//! assert_eq!(HsColor::from_packed((120 << 7) | 100).to_hex(), "#00ff00");
//! assert_eq!(RgbColor::from_hex("#0a141e").unwrap(), RgbColor::new(10, 20, 30));
//! ```

mod device;
pub mod error;
pub mod protocol;
pub mod state;
pub mod store;
pub mod subscription;
pub mod types;

pub use device::{DEFAULT_POLL_INTERVAL, Floower, FloowerBuilder, PollingHandle};
pub use error::{Error, ParseError, ProtocolError, Result, StoreError, ValueError};
pub use protocol::Transport;
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use state::{ColorScheme, DeviceState};
pub use store::{FileKeyStore, KeyStore, MemoryKeyStore};
pub use subscription::{ClientEvent, Subscribable, SubscriptionId};
pub use types::{HsColor, PetalsLevel, RgbColor};
