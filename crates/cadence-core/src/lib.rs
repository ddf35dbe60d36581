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

//! # cadence core
//!
//! A fixed-rate update/render loop for frame-based applications on small
//! devices: one blocking loop task that waits on merged tick/stop signals,
//! derives edge-triggered input snapshots from an atomically shared key
//! word, invokes a single per-frame callback with a render surface, and
//! measures its own frame rate from a wrapping cycle counter.
//!
//! The platform services the loop consumes (surface provider, input source,
//! ticker, cycle counter) are contracts in [`platform`]; concrete backends
//! live outside this crate.

#![warn(missing_docs)]

mod bitflags;
pub mod clock;
pub mod engine;
pub mod input;
pub mod platform;
pub mod signal;

pub use engine::{Engine, FrameCallback, RunHandle, Settings, StopHandle};
pub use input::{InputSnapshot, Key, KeySet};
pub use platform::Platform;
