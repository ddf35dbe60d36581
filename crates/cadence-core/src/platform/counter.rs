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

//! The cycle counter contract used for rate measurement.

/// A monotonically increasing counter with defined wraparound.
///
/// The counter value wraps modulo 2^32; consumers take differences with
/// wrapping subtraction, so a wrap between two samples still yields the
/// correct elapsed cycle count.
pub trait CycleCounter: Send + Sync {
    /// The current counter value.
    fn ticks(&self) -> u32;

    /// The counter's nominal rate in ticks per second.
    fn frequency(&self) -> u32;
}
