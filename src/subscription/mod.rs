// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for client notifications.
//!
//! A client emits two notifications, described by [`ClientEvent`]:
//!
//! - `change` after every periodic refresh while connected
//! - `disconnected` when [`Floower::disconnect`](crate::Floower::disconnect) is called
//!
//! The system consists of:
//!
//! - [`SubscriptionId`] - A unique identifier for a subscription, used to unsubscribe
//! - [`CallbackRegistry`] - Registry that keeps callbacks in order and dispatches events
//! - [`Subscribable`] - Trait for types that support event subscriptions

mod callback;
mod subscribable;

pub use callback::{CallbackRegistry, ClientEvent, SubscriptionId};
pub use subscribable::Subscribable;
