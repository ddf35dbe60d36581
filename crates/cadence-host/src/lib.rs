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

//! Concrete std-host implementations of the cadence platform contracts:
//! a thread-driven ticker, a wall-clock cycle counter, an input event bus,
//! and a char-cell console rendering backend.

pub mod console;
pub mod counter;
pub mod input_bus;
pub mod ticker;

pub use console::{AnsiSink, Cell, CellSurface, ConsoleGui, FrameSink};
pub use counter::WallClockCounter;
pub use input_bus::InputBus;
pub use ticker::ThreadTicker;
