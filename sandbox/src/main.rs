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

// cadence sandbox: a console demo of the fixed-rate loop.
//
// A '@' glyph moves one cell per key tap, a '*' drifts one cell per target
// interval (scaled by the measured delta_frames), and the rate overlay is
// enabled. Input comes from line-buffered stdin, so each mapped character is
// delivered as a press followed by a release two tick periods later.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use cadence_core::platform::{InputEvent, InputKey, InputKind};
use cadence_core::{Engine, Key, Platform, Settings};
use cadence_host::{AnsiSink, ConsoleGui, InputBus, ThreadTicker, WallClockCounter};

const WIDTH: u32 = 40;
const HEIGHT: u32 = 12;
const TARGET_HZ: f32 = 30.0;

/// Publishes key taps parsed from stdin lines.
///
/// A terminal line cannot report key-up, so each mapped character becomes a
/// press, a hold long enough to span at least one tick, and a release.
fn spawn_stdin_feeder(bus: Arc<InputBus>) {
    let hold = Duration::from_secs_f32(2.0 / TARGET_HZ);
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for ch in line.chars() {
                let key = match ch.to_ascii_lowercase() {
                    'w' => InputKey::Up,
                    's' => InputKey::Down,
                    'a' => InputKey::Left,
                    'd' => InputKey::Right,
                    'e' | ' ' => InputKey::Ok,
                    'q' => InputKey::Back,
                    _ => continue,
                };
                bus.publish(InputEvent {
                    key,
                    kind: InputKind::Press,
                });
                thread::sleep(hold);
                bus.publish(InputEvent {
                    key,
                    kind: InputKind::Release,
                });
            }
        }
    });
}

fn main() -> Result<()> {
    env_logger::init();

    let bus = Arc::new(InputBus::new());
    spawn_stdin_feeder(Arc::clone(&bus));

    let platform = Platform {
        gui: Arc::new(ConsoleGui::new(WIDTH, HEIGHT, Arc::new(AnsiSink::new()))),
        input: Arc::clone(&bus) as Arc<dyn cadence_core::platform::InputSource>,
        ticker: Arc::new(ThreadTicker::new()),
        counter: Arc::new(WallClockCounter::new()),
    };

    let settings = Settings {
        frequency: TARGET_HZ,
        show_rate: true,
    };

    let mut x = (WIDTH / 2) as i32;
    let mut y = (HEIGHT / 2) as i32;
    let mut drift = 0.0f32;

    let mut engine = Engine::new(platform, settings, move |run, surface, input| {
        if input.just_pressed(Key::Back) {
            run.stop();
        }
        if input.just_pressed(Key::Left) {
            x -= 1;
        }
        if input.just_pressed(Key::Right) {
            x += 1;
        }
        if input.just_pressed(Key::Up) {
            y -= 1;
        }
        if input.just_pressed(Key::Down) {
            y += 1;
        }
        x = x.clamp(0, surface.width() as i32 - 1);
        y = y.clamp(0, surface.height() as i32 - 1);

        // One cell per target interval, however fast the loop really runs.
        drift += run.delta_frames();
        let star = drift as i32 % surface.width() as i32;

        surface.draw_str(star, 0, "*");
        surface.draw_str(x, y, if input.is_held(Key::Ok) { "#" } else { "@" });
        surface.draw_str(
            0,
            surface.height() as i32 - 1,
            "wasd+enter moves, e pings, q quits",
        );
    });

    log::info!("sandbox starting at {TARGET_HZ} Hz");
    engine.run();
    println!("bye");
    Ok(())
}
