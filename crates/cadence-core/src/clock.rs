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

//! Self-measuring frame timing.
//!
//! The clock samples the platform's wrapping cycle counter once per tick and
//! derives the instantaneous rate from the cycle delta. The measured rate is
//! independent of the configured tick frequency; the two diverge whenever
//! the callback can't keep up with the ticker.

use std::sync::Arc;

use crate::platform::CycleCounter;

/// Measures the cycle-to-cycle frame rate of the running loop.
pub struct FrameClock {
    counter: Arc<dyn CycleCounter>,
    prev: u32,
}

impl FrameClock {
    /// Starts measuring from the counter's current value.
    pub fn start(counter: Arc<dyn CycleCounter>) -> Self {
        let prev = counter.ticks();
        Self { counter, prev }
    }

    /// Samples the counter and returns the rate since the previous sample,
    /// in frames per second.
    ///
    /// The delta is taken with wrapping subtraction, so a counter wrap
    /// between two samples still measures correctly. A delta of zero (the
    /// counter did not advance) is clamped to one cycle.
    pub fn sample(&mut self) -> f32 {
        let now = self.counter.ticks();
        let delta = now.wrapping_sub(self.prev);
        self.prev = now;
        self.counter.frequency() as f32 / delta.max(1) as f32
    }
}
