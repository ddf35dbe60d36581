// Copyright 2026 the cadence authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A publish/subscribe bus for raw input events.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use cadence_core::platform::{InputCallback, InputEvent, InputSource, SubscriptionId};

/// Delivers published input events to every subscriber, in the publisher's
/// own context.
///
/// Subscriber callbacks are expected to return quickly (the engine's does a
/// single atomic bit operation); they run outside the registry lock, so a
/// callback may itself subscribe or unsubscribe.
pub struct InputBus {
    subscribers: Mutex<HashMap<u64, InputCallback>>,
    next_id: AtomicU64,
}

impl InputBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Publishes one event to every current subscriber.
    pub fn publish(&self, event: InputEvent) {
        let callbacks: Vec<InputCallback> =
            self.subscribers.lock().unwrap().values().cloned().collect();
        log::trace!("publishing {event:?} to {} subscriber(s)", callbacks.len());
        for callback in callbacks {
            callback(&event);
        }
    }

    /// The number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InputBus {
    fn subscribe(&self, callback: InputCallback) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.lock().unwrap().insert(id, callback);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.subscribers.lock().unwrap().remove(&id.0).is_none() {
            log::warn!("unsubscribe for unknown subscription {id:?}");
        }
    }
}
