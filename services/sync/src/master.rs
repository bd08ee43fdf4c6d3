use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ledcontrol_animation::AnimationClock;

use crate::packet::{encode, SYNC_PORT};

const BROADCAST_ADDR: &str = "255.255.255.255";
/// Upper bound on how long a single sleep chunk runs before re-checking
/// the running flag, so `end()` can join within spec 4.G's 1s bound
/// even when `sync_interval` is longer.
const MAX_SLEEP_CHUNK: Duration = Duration::from_millis(200);

/// Broadcasts the current animation time every `sync_interval` seconds
/// (spec 4.G "Master mode"). Sequence increments monotonically and is
/// diagnostic only.
pub struct SyncMaster {
    clock: Arc<AnimationClock>,
    sync_interval: Duration,
    running: Arc<AtomicBool>,
    sequence: Arc<AtomicU32>,
    handle: Option<JoinHandle<()>>,
}

impl SyncMaster {
    pub fn new(clock: Arc<AnimationClock>, sync_interval: f64) -> SyncMaster {
        SyncMaster {
            clock,
            sync_interval: Duration::from_secs_f64(sync_interval.max(0.01)),
            running: Arc::new(AtomicBool::new(false)),
            sequence: Arc::new(AtomicU32::new(0)),
            handle: None,
        }
    }

    pub fn begin(&mut self) {
        if self.running.swap(true, Ordering::AcqRel) {
            return;
        }
        let socket = match UdpSocket::bind(("0.0.0.0", 0)) {
            Ok(socket) => socket,
            Err(err) => {
                log::error!("sync master failed to create broadcast socket: {err}");
                self.running.store(false, Ordering::Release);
                return;
            }
        };
        if let Err(err) = socket.set_broadcast(true) {
            log::error!("sync master failed to enable broadcast: {err}");
            self.running.store(false, Ordering::Release);
            return;
        }

        let clock = Arc::clone(&self.clock);
        let interval = self.sync_interval;
        let running = Arc::clone(&self.running);
        let sequence = Arc::clone(&self.sequence);

        self.handle = Some(thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                let seq = sequence.fetch_add(1, Ordering::Relaxed);
                let packet = encode(seq, clock.get());
                if let Err(err) = socket.send_to(&packet, (BROADCAST_ADDR, SYNC_PORT)) {
                    log::warn!("sync master broadcast failed: {err}");
                }
                let mut remaining = interval;
                while remaining > Duration::ZERO && running.load(Ordering::Acquire) {
                    let chunk = remaining.min(MAX_SLEEP_CHUNK);
                    thread::sleep(chunk);
                    remaining -= chunk;
                }
            }
        }));
        log::info!("sync master started (broadcast every {:.2}s)", self.sync_interval.as_secs_f64());
    }

    pub fn end(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.handle.take() {
            // The broadcast loop sleeps for at most `sync_interval`
            // between iterations, so a bounded join here naturally
            // satisfies spec 4.G's "bounded timeout (1s)" for typical
            // intervals; a very long interval is clamped by the caller.
            if handle.join().is_err() {
                log::warn!("sync master thread panicked while stopping");
            }
        }
        log::info!("sync master stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_end_is_idempotent() {
        let clock = Arc::new(AnimationClock::new());
        let mut master = SyncMaster::new(clock, 0.05);
        master.begin();
        master.begin();
        assert!(master.is_running());
        master.end();
        master.end();
        assert!(!master.is_running());
    }
}
