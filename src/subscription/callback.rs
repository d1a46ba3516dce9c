// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Callback management for client notifications.
//!
//! - [`ClientEvent`] - The notifications a client emits
//! - [`SubscriptionId`] - Unique identifier for unsubscribing
//! - [`CallbackRegistry`] - Registry storing and dispatching callbacks

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Notifications emitted by a [`Floower`](crate::Floower) client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientEvent {
    /// A periodic refresh ran while connected.
    ///
    /// Fired after every tick, whether or not the retrieval succeeded or
    /// anything actually changed.
    Change,
    /// The client was explicitly disconnected.
    Disconnected,
}

impl ClientEvent {
    /// Returns the event name used by UI bindings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier for a subscription.
///
/// Returned when subscribing and used to unsubscribe later. IDs are unique
/// within a client's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Callback = Arc<dyn Fn() + Send + Sync>;

type Subscribers = RwLock<Vec<(SubscriptionId, Callback)>>;

/// Registry for client notification callbacks.
///
/// Each event keeps its subscribers in registration order and calls all of
/// them on dispatch. Callbacks run outside the registry lock, so a callback
/// may subscribe, unsubscribe or query the client.
pub struct CallbackRegistry {
    next_id: AtomicU64,
    change: Subscribers,
    disconnected: Subscribers,
}

impl CallbackRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            change: RwLock::new(Vec::new()),
            disconnected: RwLock::new(Vec::new()),
        }
    }

    fn subscribers(&self, event: ClientEvent) -> &Subscribers {
        match event {
            ClientEvent::Change => &self.change,
            ClientEvent::Disconnected => &self.disconnected,
        }
    }

    /// Registers a callback for `event`.
    pub fn subscribe<F>(&self, event: ClientEvent, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers(event)
            .write()
            .push((id, Arc::new(callback)));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        [&self.change, &self.disconnected].into_iter().any(|list| {
            let mut list = list.write();
            let before = list.len();
            list.retain(|(sub, _)| *sub != id);
            list.len() != before
        })
    }

    /// Calls every subscriber of `event` in registration order.
    pub fn dispatch(&self, event: ClientEvent) {
        let callbacks: Vec<Callback> = self
            .subscribers(event)
            .read()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        tracing::trace!(%event, subscribers = callbacks.len(), "Dispatching event");

        for callback in callbacks {
            callback();
        }
    }

    /// Returns the number of subscribers for `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: ClientEvent) -> usize {
        self.subscribers(event).read().len()
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("change", &self.change.read().len())
            .field("disconnected", &self.disconnected.read().len())
            .finish_non_exhaustive()
    }
}
