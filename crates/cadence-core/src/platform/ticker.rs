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

//! The periodic tick source contract.

use std::sync::Arc;

/// Callback a ticker invokes once per period, from its own context.
///
/// It must only post a lightweight notification and never perform frame
/// work; the engine passes a closure that raises the update signal bit.
pub type TickNotifier = Arc<dyn Fn() + Send + Sync>;

/// A periodic tick source, armed for the duration of one run.
pub trait Ticker: Send + Sync {
    /// Begins invoking `notify` at approximately `frequency` Hz. Starting an
    /// already-started ticker rearms it at the new rate.
    fn start(&self, frequency: f32, notify: TickNotifier);

    /// Stops delivery. A notification already in flight may still be
    /// observed once after this returns.
    fn stop(&self);
}
