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

//! End-to-end loop scenarios over hand-built platform fakes.
//!
//! The engine runs on its own thread; the test thread plays the platform:
//! it fires ticks manually and rendezvouses with the loop on a channel fed
//! by the fake surface's `commit`, which makes frame counts and snapshot
//! contents fully deterministic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use approx::assert_relative_eq;
use cadence_core::platform::{
    CycleCounter, DrawMode, InputCallback, InputEvent, InputKey, InputKind, InputSource,
    SubscriptionId, Surface, SurfaceProvider, TickNotifier, Ticker,
};
use cadence_core::{Engine, InputSnapshot, Key, KeySet, Platform, Settings};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
struct DrawCall {
    x: i32,
    y: i32,
    text: String,
    mode: DrawMode,
}

#[derive(Debug, Clone)]
struct Frame {
    draws: Vec<DrawCall>,
}

/// A surface that records draw calls and reports every committed frame on a
/// channel.
struct RecordingSurface {
    draws: Vec<DrawCall>,
    mode: DrawMode,
    frames: flume::Sender<Frame>,
}

impl Surface for RecordingSurface {
    fn reset(&mut self) {
        self.draws.clear();
        self.mode = DrawMode::Normal;
    }

    fn set_draw_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    fn draw_str(&mut self, x: i32, y: i32, text: &str) {
        self.draws.push(DrawCall {
            x,
            y,
            text: text.to_string(),
            mode: self.mode,
        });
    }

    fn commit(&mut self) {
        self.frames
            .send(Frame {
                draws: self.draws.clone(),
            })
            .expect("test dropped the frame receiver");
    }

    fn width(&self) -> u32 {
        128
    }

    fn height(&self) -> u32 {
        64
    }
}

#[derive(Default)]
struct ProviderCounters {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

struct RecordingProvider {
    frames: flume::Sender<Frame>,
    counters: Arc<ProviderCounters>,
}

impl SurfaceProvider for RecordingProvider {
    fn acquire(&self) -> Box<dyn Surface> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingSurface {
            draws: Vec::new(),
            mode: DrawMode::Normal,
            frames: self.frames.clone(),
        })
    }

    fn release(&self, _surface: Box<dyn Surface>) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// A ticker fired by the test thread. `fire` blocks until the engine has
/// armed the ticker, so tests never race the loop's startup.
#[derive(Default)]
struct ManualTicker {
    notifier: Mutex<Option<TickNotifier>>,
    armed: Condvar,
    starts: AtomicUsize,
    stops: AtomicUsize,
}

impl ManualTicker {
    fn wait_armed(&self) -> TickNotifier {
        let mut notifier = self.notifier.lock().unwrap();
        while notifier.is_none() {
            notifier = self.armed.wait(notifier).unwrap();
        }
        Arc::clone(notifier.as_ref().unwrap())
    }

    fn fire(&self) {
        let notify = self.wait_armed();
        notify();
    }
}

impl Ticker for ManualTicker {
    fn start(&self, _frequency: f32, notify: TickNotifier) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.notifier.lock().unwrap() = Some(notify);
        self.armed.notify_all();
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        *self.notifier.lock().unwrap() = None;
    }
}

/// A minimal publish/subscribe input bus.
#[derive(Default)]
struct TestBus {
    subscribers: Mutex<HashMap<u64, InputCallback>>,
    next_id: AtomicU64,
}

impl TestBus {
    fn publish(&self, event: InputEvent) {
        let callbacks: Vec<InputCallback> =
            self.subscribers.lock().unwrap().values().cloned().collect();
        for callback in callbacks {
            callback(&event);
        }
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl InputSource for TestBus {
    fn subscribe(&self, callback: InputCallback) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscribers.lock().unwrap().insert(id, callback);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().unwrap().remove(&id.0);
    }
}

/// A counter advancing a fixed step per sample: the measured rate is exactly
/// `frequency / step` on every tick.
struct StepCounter {
    now: AtomicU32,
    step: u32,
    frequency: u32,
}

impl StepCounter {
    fn new(frequency: u32, step: u32) -> Self {
        Self {
            now: AtomicU32::new(0),
            step,
            frequency,
        }
    }
}

impl CycleCounter for StepCounter {
    fn ticks(&self) -> u32 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }

    fn frequency(&self) -> u32 {
        self.frequency
    }
}

struct Harness {
    platform: Platform,
    ticker: Arc<ManualTicker>,
    bus: Arc<TestBus>,
    counters: Arc<ProviderCounters>,
    frames: flume::Receiver<Frame>,
}

/// Builds a platform whose ticker runs at a nominal 60 Hz pace: one counter
/// step per tick equals exactly one target interval.
fn harness() -> Harness {
    let (tx, rx) = flume::unbounded();
    let counters = Arc::new(ProviderCounters::default());
    let ticker = Arc::new(ManualTicker::default());
    let bus = Arc::new(TestBus::default());
    let platform = Platform {
        gui: Arc::new(RecordingProvider {
            frames: tx,
            counters: Arc::clone(&counters),
        }),
        input: Arc::clone(&bus) as Arc<dyn InputSource>,
        ticker: Arc::clone(&ticker) as Arc<dyn Ticker>,
        counter: Arc::new(StepCounter::new(1_000_000, 16_667)),
    };
    Harness {
        platform,
        ticker,
        bus,
        counters,
        frames: rx,
    }
}

fn recv_frame(harness: &Harness) -> Frame {
    harness
        .frames
        .recv_timeout(RECV_TIMEOUT)
        .expect("engine did not commit a frame in time")
}

#[test]
fn stop_on_third_tick_commits_exactly_three_frames() {
    let h = harness();
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&invocations);

    let mut engine = Engine::new(
        h.platform.clone(),
        Settings {
            frequency: 60.0,
            show_rate: true,
        },
        move |run, _surface, _input| {
            if seen.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                run.stop();
            }
        },
    );

    let loop_task = thread::spawn(move || engine.run());

    for _ in 0..3 {
        h.ticker.fire();
        let frame = recv_frame(&h);
        // show_rate on: each frame carries the inverted overlay at the
        // top-left, one counter step ≡ one 60 Hz interval.
        assert_eq!(
            frame.draws,
            vec![DrawCall {
                x: 0,
                y: 7,
                text: "60".to_string(),
                mode: DrawMode::Invert,
            }]
        );
    }

    loop_task.join().expect("engine loop panicked");

    assert!(h.frames.try_recv().is_err(), "no frame after the stop");
    assert_eq!(h.ticker.starts.load(Ordering::SeqCst), 1);
    assert_eq!(h.ticker.stops.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.acquired.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.released.load(Ordering::SeqCst), 1);
    assert_eq!(h.bus.subscriber_count(), 0, "subscription released");
    assert_eq!(invocations.load(Ordering::SeqCst), 3);
}

#[test]
fn repeated_stop_calls_terminate_exactly_once() {
    let h = harness();
    let invocations = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&invocations);

    let mut engine = Engine::new(
        h.platform.clone(),
        Settings::default(),
        move |run, _surface, _input| {
            seen.fetch_add(1, Ordering::SeqCst);
            run.stop();
            run.stop();
            run.stop();
        },
    );

    let loop_task = thread::spawn(move || engine.run());
    h.ticker.fire();
    let _ = recv_frame(&h);
    loop_task.join().expect("engine loop panicked");

    assert_eq!(invocations.load(Ordering::SeqCst), 1);
    assert!(h.frames.try_recv().is_err());
}

#[test]
fn press_then_release_reports_edges_on_consecutive_ticks() {
    let h = harness();
    let snapshots = Arc::new(Mutex::new(Vec::<InputSnapshot>::new()));
    let record = Arc::clone(&snapshots);

    let mut engine = Engine::new(
        h.platform.clone(),
        Settings::default(),
        move |_run, _surface, input| {
            record.lock().unwrap().push(input);
        },
    );
    let stop = engine.stop_handle();

    let loop_task = thread::spawn(move || engine.run());

    // The engine subscribes before arming the ticker, so once the ticker is
    // armed the press below is guaranteed to reach the tracker.
    h.ticker.wait_armed();

    h.bus.publish(InputEvent {
        key: InputKey::Up,
        kind: InputKind::Press,
    });
    h.ticker.fire();
    let _ = recv_frame(&h);

    h.bus.publish(InputEvent {
        key: InputKey::Up,
        kind: InputKind::Release,
    });
    h.ticker.fire();
    let _ = recv_frame(&h);

    stop.stop();
    loop_task.join().expect("engine loop panicked");

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), 2);

    assert_eq!(snapshots[0].held, KeySet::UP);
    assert_eq!(snapshots[0].pressed, KeySet::UP);
    assert_eq!(snapshots[0].released, KeySet::EMPTY);
    assert!(snapshots[0].just_pressed(Key::Up));

    assert_eq!(snapshots[1].held, KeySet::EMPTY);
    assert_eq!(snapshots[1].pressed, KeySet::EMPTY);
    assert_eq!(snapshots[1].released, KeySet::UP);
    assert!(snapshots[1].just_released(Key::Up));
}

#[test]
fn external_stop_without_ticks_commits_nothing() {
    let h = harness();
    let mut engine = Engine::new(h.platform.clone(), Settings::default(), |_, _, _| {
        panic!("callback must not run without a tick");
    });
    let stop = engine.stop_handle();

    let loop_task = thread::spawn(move || engine.run());
    h.ticker.wait_armed();
    stop.stop();
    loop_task.join().expect("engine loop panicked");

    assert!(h.frames.try_recv().is_err());
    assert_eq!(h.ticker.stops.load(Ordering::SeqCst), 1);
    assert_eq!(h.counters.released.load(Ordering::SeqCst), 1);
}

#[test]
fn measured_deltas_converge_at_nominal_pace() {
    let h = harness();
    let deltas = Arc::new(Mutex::new(Vec::<(f32, f32)>::new()));
    let record = Arc::clone(&deltas);

    let mut engine = Engine::new(
        h.platform.clone(),
        Settings::default(),
        move |run, _surface, _input| {
            record
                .lock()
                .unwrap()
                .push((run.delta_time(), run.delta_frames()));
        },
    );
    let stop = engine.stop_handle();

    let loop_task = thread::spawn(move || engine.run());
    for _ in 0..4 {
        h.ticker.fire();
        let _ = recv_frame(&h);
    }
    stop.stop();
    loop_task.join().expect("engine loop panicked");

    let deltas = deltas.lock().unwrap();
    assert_eq!(deltas.len(), 4);
    for (delta_time, delta_frames) in deltas.iter() {
        assert_relative_eq!(*delta_time, 1.0 / 60.0, max_relative = 1e-3);
        assert_relative_eq!(*delta_frames, 1.0, max_relative = 1e-3);
    }
}

#[test]
fn overlay_absent_when_show_rate_is_off() {
    let h = harness();
    let mut engine = Engine::new(
        h.platform.clone(),
        Settings {
            frequency: 60.0,
            show_rate: false,
        },
        |run, surface, _input| {
            surface.draw_str(3, 4, "app");
            run.stop();
        },
    );

    let loop_task = thread::spawn(move || engine.run());
    h.ticker.fire();
    let frame = recv_frame(&h);
    loop_task.join().expect("engine loop panicked");

    assert_eq!(
        frame.draws,
        vec![DrawCall {
            x: 3,
            y: 4,
            text: "app".to_string(),
            mode: DrawMode::Normal,
        }]
    );
}

#[test]
fn engine_is_reusable_across_runs() {
    let h = harness();
    let mut engine = Engine::new(
        h.platform.clone(),
        Settings::default(),
        |run, _surface, _input| run.stop(),
    );

    for expected_run in 1..=2 {
        let loop_task = thread::scope(|scope| {
            let task = scope.spawn(|| engine.run());
            h.ticker.fire();
            let _ = recv_frame(&h);
            task.join()
        });
        loop_task.expect("engine loop panicked");

        assert_eq!(h.ticker.starts.load(Ordering::SeqCst), expected_run);
        assert_eq!(h.ticker.stops.load(Ordering::SeqCst), expected_run);
        assert_eq!(h.counters.acquired.load(Ordering::SeqCst), expected_run);
        assert_eq!(h.counters.released.load(Ordering::SeqCst), expected_run);
        assert_eq!(h.bus.subscriber_count(), 0);
    }
}
