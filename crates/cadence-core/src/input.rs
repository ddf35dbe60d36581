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

//! Logical key state tracking with edge-triggered snapshots.
//!
//! Raw transitions from the input source are folded into a single shared
//! word of currently-held key bits ([`HeldKeys`]). The fold runs in the
//! producer's delivery context and is one atomic read-modify-write; the loop
//! task reads the whole word once per tick and derives the pressed/released
//! edges by comparing against the previous tick's word ([`InputSnapshot`]).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::cadence_bitflags;
use crate::platform::{InputCallback, InputKey, InputKind};

cadence_bitflags! {
    /// A set of logical keys, one bit per key.
    pub struct KeySet: u32 {
        /// The up direction key.
        const UP = 1 << 0;
        /// The down direction key.
        const DOWN = 1 << 1;
        /// The right direction key.
        const RIGHT = 1 << 2;
        /// The left direction key.
        const LEFT = 1 << 3;
        /// The confirm key.
        const OK = 1 << 4;
        /// The back/cancel key.
        const BACK = 1 << 5;
    }
}

/// The logical buttons the engine reports to the frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// The up direction key.
    Up,
    /// The down direction key.
    Down,
    /// The right direction key.
    Right,
    /// The left direction key.
    Left,
    /// The confirm key.
    Ok,
    /// The back/cancel key.
    Back,
}

impl Key {
    /// The single-bit [`KeySet`] for this key.
    pub const fn mask(self) -> KeySet {
        match self {
            Key::Up => KeySet::UP,
            Key::Down => KeySet::DOWN,
            Key::Right => KeySet::RIGHT,
            Key::Left => KeySet::LEFT,
            Key::Ok => KeySet::OK,
            Key::Back => KeySet::BACK,
        }
    }
}

/// Maps a raw input key to its logical bit, if it has one.
fn map_key(key: InputKey) -> Option<KeySet> {
    match key {
        InputKey::Up => Some(KeySet::UP),
        InputKey::Down => Some(KeySet::DOWN),
        InputKey::Right => Some(KeySet::RIGHT),
        InputKey::Left => Some(KeySet::LEFT),
        InputKey::Ok => Some(KeySet::OK),
        InputKey::Back => Some(KeySet::BACK),
        InputKey::Other(_) => None,
    }
}

/// The currently-held key word shared between the input producer and the
/// loop task.
///
/// The producer side only performs one atomic bit set/clear per event and
/// returns; the loop side loads the whole word once per tick. Individual bit
/// flips commute and the loop only ever needs the latest complete word, so
/// no lock is involved anywhere.
pub struct HeldKeys {
    bits: Arc<AtomicU32>,
}

impl HeldKeys {
    /// Creates a word with no keys held.
    pub fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Builds the subscription callback that folds raw transitions into the
    /// word.
    ///
    /// Press sets the mapped key's bit, Release clears it. Unmapped keys and
    /// other transition kinds (repeat, short/long classification) are
    /// dropped silently.
    pub fn observer(&self) -> InputCallback {
        let bits = Arc::clone(&self.bits);
        Arc::new(move |event| {
            let Some(key) = map_key(event.key) else {
                return;
            };
            // A single word with no dependent data; ordering is irrelevant.
            match event.kind {
                InputKind::Press => {
                    bits.fetch_or(key.bits(), Ordering::Relaxed);
                }
                InputKind::Release => {
                    bits.fetch_and(!key.bits(), Ordering::Relaxed);
                }
                InputKind::Repeat | InputKind::Short | InputKind::Long => {}
            }
        })
    }

    /// The latest complete held-key word.
    pub fn snapshot(&self) -> KeySet {
        KeySet::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge-triggered input classification for one tick.
///
/// Computed once per tick from the current and previous held words and
/// immutable for the duration of the frame callback. `pressed` and
/// `released` are always disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Keys currently down.
    pub held: KeySet,
    /// Keys down this tick that were up on the previous tick.
    pub pressed: KeySet,
    /// Keys up this tick that were down on the previous tick.
    pub released: KeySet,
}

impl InputSnapshot {
    /// Classifies the transition from the previous tick's held word to the
    /// current one.
    pub fn from_transition(prev: KeySet, curr: KeySet) -> Self {
        Self {
            held: curr,
            pressed: curr & !prev,
            released: !curr & prev,
        }
    }

    /// Whether `key` is currently down.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(key.mask())
    }

    /// Whether `key` went down on this tick.
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key.mask())
    }

    /// Whether `key` came up on this tick.
    pub fn just_released(&self, key: Key) -> bool {
        self.released.contains(key.mask())
    }
}
