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

//! A char-cell console rendering backend.
//!
//! [`CellSurface`] implements the engine's [`Surface`] contract over a grid
//! of character cells with an invert attribute per cell, and hands finished
//! frames to a [`FrameSink`]. [`AnsiSink`] renders them to the terminal with
//! reverse video for inverted cells; tests plug in a recording sink instead.

use std::io::{self, Write};
use std::sync::Arc;

use cadence_core::platform::{DrawMode, Surface, SurfaceProvider};

/// One character cell of a committed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The glyph occupying the cell.
    pub glyph: char,
    /// Whether the cell is rendered in reverse video.
    pub inverted: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            inverted: false,
        }
    }
}

/// Receives finished frames from a [`CellSurface`] commit.
pub trait FrameSink: Send + Sync {
    /// Presents one committed frame, `cells` in row-major order.
    fn present(&self, width: u32, height: u32, cells: &[Cell]);
}

/// A char-cell framebuffer implementing the engine's surface contract.
pub struct CellSurface {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    mode: DrawMode,
    sink: Arc<dyn FrameSink>,
}

impl CellSurface {
    fn new(width: u32, height: u32, sink: Arc<dyn FrameSink>) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            mode: DrawMode::Normal,
            sink,
        }
    }

    /// The cell at `(x, y)`, if it is inside the frame.
    pub fn cell(&self, x: u32, y: u32) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[(y * self.width + x) as usize])
        } else {
            None
        }
    }
}

impl Surface for CellSurface {
    fn reset(&mut self) {
        self.cells.fill(Cell::default());
        self.mode = DrawMode::Normal;
    }

    fn set_draw_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    fn draw_str(&mut self, x: i32, y: i32, text: &str) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        for (offset, glyph) in text.chars().enumerate() {
            let cx = x + offset as i32;
            if cx < 0 || cx >= self.width as i32 {
                continue;
            }
            let index = (y as u32 * self.width + cx as u32) as usize;
            let inverted = match self.mode {
                DrawMode::Normal => false,
                DrawMode::Invert => !self.cells[index].inverted,
            };
            self.cells[index] = Cell { glyph, inverted };
        }
    }

    fn commit(&mut self) {
        self.sink.present(self.width, self.height, &self.cells);
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Hands out [`CellSurface`] frames bound to a shared sink.
pub struct ConsoleGui {
    width: u32,
    height: u32,
    sink: Arc<dyn FrameSink>,
}

impl ConsoleGui {
    /// Creates a provider for `width` x `height` cell frames presented to
    /// `sink`.
    pub fn new(width: u32, height: u32, sink: Arc<dyn FrameSink>) -> Self {
        Self {
            width,
            height,
            sink,
        }
    }
}

impl SurfaceProvider for ConsoleGui {
    fn acquire(&self) -> Box<dyn Surface> {
        log::debug!("surface acquired ({}x{})", self.width, self.height);
        Box::new(CellSurface::new(
            self.width,
            self.height,
            Arc::clone(&self.sink),
        ))
    }

    fn release(&self, _surface: Box<dyn Surface>) {
        log::debug!("surface released");
    }
}

/// Renders committed frames to the terminal with ANSI escapes, using
/// reverse video for inverted cells.
pub struct AnsiSink;

impl AnsiSink {
    /// Creates the sink and clears the terminal once.
    pub fn new() -> Self {
        print!("\x1b[2J");
        Self
    }
}

impl Default for AnsiSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for AnsiSink {
    fn present(&self, width: u32, height: u32, cells: &[Cell]) {
        let mut out = String::with_capacity(cells.len() + height as usize * 8);
        out.push_str("\x1b[H");
        for y in 0..height {
            let mut inverted = false;
            for x in 0..width {
                let cell = cells[(y * width + x) as usize];
                if cell.inverted != inverted {
                    out.push_str(if cell.inverted { "\x1b[7m" } else { "\x1b[27m" });
                    inverted = cell.inverted;
                }
                out.push(cell.glyph);
            }
            out.push_str("\x1b[0m\r\n");
        }

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(error) = handle.write_all(out.as_bytes()).and_then(|_| handle.flush()) {
            log::error!("failed to present frame: {error}");
        }
    }
}
