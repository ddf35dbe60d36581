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

//! The raw input event contract.
//!
//! Input arrives as discrete key transition events published from the
//! platform's own delivery context. Subscribers register a callback that is
//! invoked in that context; it must not block, and in the engine's case it
//! only performs one atomic bit operation before returning.

use std::sync::Arc;

/// A physical control identifier as delivered by the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// The up direction control.
    Up,
    /// The down direction control.
    Down,
    /// The right direction control.
    Right,
    /// The left direction control.
    Left,
    /// The confirm control.
    Ok,
    /// The back/cancel control.
    Back,
    /// Any other control, identified by a backend-specific code. The engine
    /// has no mapping for these and drops them.
    Other(u16),
}

/// The kind of transition an input event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// The control went down.
    Press,
    /// The control came back up.
    Release,
    /// Auto-repeat while the control stays down.
    Repeat,
    /// Backend classification of a completed short press.
    Short,
    /// Backend classification of a completed long press.
    Long,
}

/// A single raw input transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    /// The control that changed.
    pub key: InputKey,
    /// What happened to it.
    pub kind: InputKind,
}

/// Callback invoked in the input producer's context for every event.
pub type InputCallback = Arc<dyn Fn(&InputEvent) + Send + Sync>;

/// Token identifying one subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// A publish/subscribe source of raw input transitions.
pub trait InputSource: Send + Sync {
    /// Registers `callback` to be invoked for every published event.
    fn subscribe(&self, callback: InputCallback) -> SubscriptionId;

    /// Removes a subscription. Unknown tokens are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
