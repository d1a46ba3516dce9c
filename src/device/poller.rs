// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic refresh task.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::device::{Floower, Inner};
use crate::protocol::Transport;

/// Handle to a running refresh loop.
///
/// Returned by [`Floower::start_polling`]. Dropping the handle stops the
/// loop.
#[derive(Debug)]
pub struct PollingHandle {
    task: JoinHandle<()>,
}

impl PollingHandle {
    /// Stops the loop. A tick already in flight is abandoned.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollingHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns the loop on the current Tokio runtime.
///
/// The task only holds a weak reference to the client and exits once the
/// last client handle is dropped.
pub(super) fn spawn<T: Transport>(inner: Weak<Inner<T>>, interval: Duration) -> PollingHandle {
    let task = tokio::spawn(async move {
        tracing::debug!(?interval, "Polling started");

        loop {
            tokio::time::sleep(interval).await;

            let Some(inner) = inner.upgrade() else {
                tracing::debug!("Client dropped, polling stopped");
                break;
            };

            Floower { inner }.refresh().await;
        }
    });

    PollingHandle { task }
}
