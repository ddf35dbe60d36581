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

//! Contracts for the platform services the engine consumes.
//!
//! The engine never reaches into ambient global state for its collaborators.
//! The render surface provider, the raw input source, the periodic ticker
//! and the cycle counter are each handed to it as a trait object at
//! construction and held for the engine's lifetime. Any backend
//! (a real device layer, a desktop host, a test fake) can implement these
//! traits to drive the loop.

pub mod counter;
pub mod input;
pub mod surface;
pub mod ticker;

pub use counter::CycleCounter;
pub use input::{InputCallback, InputEvent, InputKey, InputKind, InputSource, SubscriptionId};
pub use surface::{DrawMode, Surface, SurfaceProvider};
pub use ticker::{TickNotifier, Ticker};

use std::sync::Arc;

/// The bundle of injected platform services an engine runs against.
#[derive(Clone)]
pub struct Platform {
    /// Hands out the render surface for the duration of a run.
    pub gui: Arc<dyn SurfaceProvider>,
    /// Delivers raw key transition events.
    pub input: Arc<dyn InputSource>,
    /// Fires the periodic update notification while a run is active.
    pub ticker: Arc<dyn Ticker>,
    /// Wrapping cycle counter used for rate measurement.
    pub counter: Arc<dyn CycleCounter>,
}
