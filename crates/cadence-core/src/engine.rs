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

//! The engine loop.
//!
//! [`Engine::run`] is a single blocking task: it arms the ticker, subscribes
//! the input tracker, then cycles wait → snapshot → callback → commit until
//! a stop signal is observed. Stop is cooperative and rides the same signal
//! word as ticks, so a stop raised in the same batch as a final tick still
//! renders that frame before the loop unwinds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::FrameClock;
use crate::input::{HeldKeys, InputSnapshot, KeySet};
use crate::platform::{DrawMode, Platform, Surface};
use crate::signal::{SignalFlags, SignalSet};

/// Configuration for one engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target update rate in Hz. Must be positive and finite.
    pub frequency: f32,
    /// Overlay the rounded measured rate on every committed frame.
    pub show_rate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frequency: 60.0,
            show_rate: false,
        }
    }
}

/// The per-frame application callback.
///
/// Invoked once per tick with the callback-scoped [`RunHandle`], the render
/// surface (already reset for this frame) and the tick's input snapshot.
/// Application context lives in the closure's captures.
pub type FrameCallback = Box<dyn FnMut(&RunHandle, &mut dyn Surface, InputSnapshot) + Send>;

/// The callback-scoped view of the running loop.
///
/// Valid only for the duration of one callback invocation; it is handed in
/// by reference and cannot be retained.
pub struct RunHandle {
    flags: Arc<SignalFlags>,
    rate: f32,
    target: f32,
}

impl RunHandle {
    /// Requests loop termination.
    ///
    /// Callable from inside the callback (the common case: the application
    /// decides the game is over). Safe to call repeatedly; every call raises
    /// the same stop bit and the loop terminates exactly once.
    pub fn stop(&self) {
        self.flags.raise(SignalSet::STOP);
    }

    /// The measured frame rate for the current tick, in Hz.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Seconds elapsed during the last measured frame.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.rate
    }

    /// The last measured frame interval in units of the configured target
    /// interval.
    ///
    /// Converges to 1.0 when the loop keeps up with the ticker; a callback
    /// can scale per-frame motion by this to stay consistent under load.
    pub fn delta_frames(&self) -> f32 {
        self.rate / self.target
    }
}

/// A cloneable out-of-loop stop control.
///
/// Any context holding one can request termination of the owning engine's
/// current (or next) run.
#[derive(Clone)]
pub struct StopHandle {
    flags: Arc<SignalFlags>,
}

impl StopHandle {
    /// Requests loop termination. Idempotent.
    pub fn stop(&self) {
        self.flags.raise(SignalSet::STOP);
    }
}

/// The fixed-rate update/render loop.
///
/// Owns the injected platform services for its lifetime and the signal word
/// shared with the ticker and stop handles. One engine can be run repeatedly;
/// each run tears down completely before `run` returns.
pub struct Engine {
    platform: Platform,
    settings: Settings,
    callback: FrameCallback,
    flags: Arc<SignalFlags>,
}

impl Engine {
    /// Creates an engine from its platform services, settings and per-frame
    /// callback.
    ///
    /// # Panics
    ///
    /// Panics if `settings.frequency` is not a positive, finite number of
    /// Hz. A loop with no valid tick rate has no valid behavior, so this is
    /// a fatal misconfiguration rather than a recoverable error.
    pub fn new(
        platform: Platform,
        settings: Settings,
        callback: impl FnMut(&RunHandle, &mut dyn Surface, InputSnapshot) + Send + 'static,
    ) -> Self {
        assert!(
            settings.frequency.is_finite() && settings.frequency > 0.0,
            "engine frequency must be a positive number of Hz, got {}",
            settings.frequency
        );
        log::info!("engine created, target {} Hz", settings.frequency);
        Self {
            platform,
            settings,
            callback: Box::new(callback),
            flags: Arc::new(SignalFlags::new()),
        }
    }

    /// This engine's settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A stop control usable from outside the loop task.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flags: Arc::clone(&self.flags),
        }
    }

    /// Runs the loop until a stop is observed.
    ///
    /// Blocks the calling task. Each iteration parks until the ticker or a
    /// stop handle raises a signal; there is no timeout, because a tick
    /// source that stops firing is an unrecoverable failure of an external
    /// dependency, not a condition this layer recovers from.
    ///
    /// # Panics
    ///
    /// Panics if the signal wait primitive reports a malfunction.
    pub fn run(&mut self) {
        log::info!("run started, target {} Hz", self.settings.frequency);

        let held = HeldKeys::new();
        let mut prev = KeySet::EMPTY;

        let mut surface = self.platform.gui.acquire();
        let subscription = self.platform.input.subscribe(held.observer());

        let tick_flags = Arc::clone(&self.flags);
        self.platform.ticker.start(
            self.settings.frequency,
            Arc::new(move || tick_flags.raise(SignalSet::UPDATE)),
        );

        let mut clock = FrameClock::start(Arc::clone(&self.platform.counter));

        loop {
            let fired = self
                .flags
                .wait_any(SignalSet::UPDATE | SignalSet::STOP)
                .expect("engine signal wait malfunctioned");

            if fired.contains(SignalSet::UPDATE) {
                let current = held.snapshot();
                let input = InputSnapshot::from_transition(prev, current);
                prev = current;

                surface.reset();
                let rate = clock.sample();
                let handle = RunHandle {
                    flags: Arc::clone(&self.flags),
                    rate,
                    target: self.settings.frequency,
                };
                (self.callback)(&handle, surface.as_mut(), input);

                if self.settings.show_rate {
                    surface.set_draw_mode(DrawMode::Invert);
                    surface.draw_str(0, 7, &format!("{}", rate.round() as u32));
                }

                surface.commit();
            }

            // Checked after the update branch: a stop batched with a final
            // tick still renders that frame.
            if fired.contains(SignalSet::STOP) {
                log::debug!("stop observed");
                break;
            }
        }

        self.platform.ticker.stop();
        self.platform.input.unsubscribe(subscription);
        self.platform.gui.release(surface);
        log::info!("run stopped");
    }
}
