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

//! A thread-driven periodic ticker.

use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cadence_core::platform::{TickNotifier, Ticker};

struct Worker {
    shutdown: flume::Sender<()>,
    handle: JoinHandle<()>,
}

/// Fires the tick notifier from a dedicated worker thread.
///
/// The worker parks in `recv_timeout` on its shutdown channel; each timeout
/// is one tick period, and a shutdown message (or a dropped sender) ends the
/// worker. The notifier therefore runs in the worker's context and must only
/// post a notification, which is exactly what the engine hands it.
pub struct ThreadTicker {
    worker: Mutex<Option<Worker>>,
}

impl ThreadTicker {
    /// Creates an unarmed ticker.
    pub fn new() -> Self {
        Self {
            worker: Mutex::new(None),
        }
    }

    fn shutdown_worker(worker: Option<Worker>) {
        if let Some(Worker { shutdown, handle }) = worker {
            let _ = shutdown.send(());
            if handle.join().is_err() {
                log::error!("ticker worker panicked");
            }
        }
    }
}

impl Default for ThreadTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticker for ThreadTicker {
    fn start(&self, frequency: f32, notify: TickNotifier) {
        assert!(
            frequency.is_finite() && frequency > 0.0,
            "ticker frequency must be a positive number of Hz, got {frequency}"
        );
        let period = Duration::from_secs_f32(1.0 / frequency);

        let (shutdown, tick) = flume::bounded::<()>(1);
        let handle = thread::Builder::new()
            .name("cadence-ticker".into())
            .spawn(move || loop {
                match tick.recv_timeout(period) {
                    Err(flume::RecvTimeoutError::Timeout) => notify(),
                    Ok(()) | Err(flume::RecvTimeoutError::Disconnected) => break,
                }
            })
            .expect("failed to spawn ticker thread");

        log::debug!("ticker armed at {frequency} Hz");
        let previous = self.worker.lock().unwrap().replace(Worker { shutdown, handle });
        // Rearming replaces the worker; the old one is drained first.
        Self::shutdown_worker(previous);
    }

    fn stop(&self) {
        let worker = self.worker.lock().unwrap().take();
        if worker.is_some() {
            log::debug!("ticker stopped");
        }
        Self::shutdown_worker(worker);
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        let worker = self.worker.lock().unwrap().take();
        Self::shutdown_worker(worker);
    }
}
