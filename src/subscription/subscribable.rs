// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for types that emit client notifications.

use crate::subscription::{ClientEvent, SubscriptionId};

/// Trait for types that support event subscriptions.
///
/// Subscribers are kept per event in registration order; registering a new
/// callback never replaces an earlier one.
///
/// # Examples
///
/// ```no_run
/// use floower_client::Floower;
/// use floower_client::subscription::Subscribable;
///
/// # async fn example() -> floower_client::Result<()> {
/// let floower = Floower::builder().build()?;
///
/// let sub_id = floower.on_change(|| println!("state refreshed"));
/// floower.on_disconnected(|| println!("bye"));
///
/// floower.unsubscribe(sub_id);
/// # Ok(())
/// # }
/// ```
pub trait Subscribable {
    /// Subscribes to `event`.
    fn on<F>(&self, event: ClientEvent, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static;

    /// Subscribes to periodic refresh notifications.
    fn on_change<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(ClientEvent::Change, callback)
    }

    /// Subscribes to explicit disconnection.
    fn on_disconnected<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on(ClientEvent::Disconnected, callback)
    }

    /// Unsubscribes a callback by its subscription ID.
    ///
    /// Returns `true` if the subscription was found and removed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}
