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

//! The render surface contract.
//!
//! The engine draws through a small direct-draw interface: reset the frame,
//! let the application draw, optionally overlay the measured rate, commit.
//! The surface is exclusively owned by the loop task between `acquire` and
//! `release`; nothing here needs to be thread-safe.

/// How draw operations combine with existing frame content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Draw over whatever is underneath.
    #[default]
    Normal,
    /// Invert the cells the glyphs land on, keeping overlays readable over
    /// arbitrary application content.
    Invert,
}

/// A drawable frame, owned by the loop task for the duration of one run.
pub trait Surface {
    /// Clears the frame and restores the default draw mode.
    fn reset(&mut self);

    /// Selects the draw mode for subsequent operations.
    fn set_draw_mode(&mut self, mode: DrawMode);

    /// Draws `text` with its left edge at `(x, y)`. Content outside the
    /// frame is clipped, not an error.
    fn draw_str(&mut self, x: i32, y: i32, text: &str);

    /// Pushes the finished frame to the output.
    fn commit(&mut self);

    /// Frame width in cells.
    fn width(&self) -> u32;

    /// Frame height in cells.
    fn height(&self) -> u32;
}

/// Hands out exclusive render surfaces.
pub trait SurfaceProvider: Send + Sync {
    /// Acquires direct-draw access to the output. The engine calls this once
    /// per run, before the first tick.
    fn acquire(&self) -> Box<dyn Surface>;

    /// Returns a surface previously handed out by [`acquire`](Self::acquire).
    fn release(&self, surface: Box<dyn Surface>);
}
