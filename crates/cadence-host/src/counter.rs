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

//! A wall-clock cycle counter.

use std::time::Instant;

use cadence_core::platform::CycleCounter;

/// Microsecond ticks derived from [`Instant`], truncated to the wrapping
/// u32 counter the engine expects (one wrap every ~71.6 minutes).
pub struct WallClockCounter {
    origin: Instant,
}

impl WallClockCounter {
    /// Creates a counter starting at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClockCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleCounter for WallClockCounter {
    fn ticks(&self) -> u32 {
        self.origin.elapsed().as_micros() as u32
    }

    fn frequency(&self) -> u32 {
        1_000_000
    }
}
