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

//! The loop task's cooperative notification primitive.
//!
//! [`SignalFlags`] is a word of latched bits with exactly one blocking
//! consumer. Producers (the ticker callback, stop handles) raise bits from
//! any context without ever blocking on the consumer; the loop task parks in
//! [`SignalFlags::wait_any`] until at least one of the bits it asked for is
//! set. Bits raised while the consumer is busy stay latched, so a tick and a
//! stop request arriving back to back are observed as one batched wake.

use std::sync::{Condvar, Mutex};

use thiserror::Error;

use crate::cadence_bitflags;

cadence_bitflags! {
    /// The signal bits a loop wake can carry.
    pub struct SignalSet: u32 {
        /// A tick is due: run one update/render cycle.
        const UPDATE = 1 << 0;
        /// Terminate the loop after the current iteration.
        const STOP = 1 << 1;
    }
}

/// The distinguished malfunction value of the wait primitive.
///
/// There is no recovery path: a loop whose wait primitive is unusable has
/// lost its tick source, and the engine treats this as fatal.
#[derive(Debug, Error)]
#[error("signal flags unusable: a task panicked while holding the flag word")]
pub struct SignalError;

/// A latched signal word with a single blocking consumer.
pub struct SignalFlags {
    bits: Mutex<u32>,
    wake: Condvar,
}

impl SignalFlags {
    /// Creates a flag word with no bits set.
    pub fn new() -> Self {
        Self {
            bits: Mutex::new(0),
            wake: Condvar::new(),
        }
    }

    /// Raises `signals` and wakes the consumer if it is parked.
    ///
    /// Callable from any context. Raising an already-set bit is a no-op, so
    /// repeated stop requests coalesce into a single observed wake.
    pub fn raise(&self, signals: SignalSet) {
        // Poisoning is surfaced on the consumer side; producers must return
        // immediately either way.
        if let Ok(mut bits) = self.bits.lock() {
            *bits |= signals.bits();
            self.wake.notify_one();
        }
    }

    /// Blocks until at least one bit in `mask` is set, then consumes and
    /// returns every masked bit that fired.
    ///
    /// The wait is indefinite: if no producer ever raises a masked bit this
    /// never returns. Bits outside `mask` are left latched for a later wait.
    pub fn wait_any(&self, mask: SignalSet) -> Result<SignalSet, SignalError> {
        let mut bits = self.bits.lock().map_err(|_| SignalError)?;
        loop {
            let fired = *bits & mask.bits();
            if fired != 0 {
                *bits &= !fired;
                return Ok(SignalSet::from_bits(fired));
            }
            bits = self.wake.wait(bits).map_err(|_| SignalError)?;
        }
    }
}

impl Default for SignalFlags {
    fn default() -> Self {
        Self::new()
    }
}
