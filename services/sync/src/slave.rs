use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ledcontrol_animation::AnimationClock;

use crate::packet::{decode, SYNC_PORT};

const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// Listens on UDP 6455 and jumps the shared animation clock to whatever
/// time each well-formed packet carries — no interpolation, no drift
/// estimation (spec 4.G "Slave mode").
pub struct SyncSlave {
    clock: Arc<AnimationClock>,
    running: Arc<AtomicBool>,
    packets_received: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl SyncSlave {
    pub fn new(clock: Arc<AnimationClock>) -> SyncSlave {
        SyncSlave {
            clock,
            running: Arc::new(AtomicBool::new(false)),
            packets_received: Arc::new(AtomicU64::new(0)),
            handle: None,
        }
    }

    pub fn begin(&mut self) -> bool {
        if self.running.swap(true, Ordering::AcqRel) {
            return true;
        }
        let socket = match UdpSocket::bind(("0.0.0.0", SYNC_PORT)) {
            Ok(socket) => socket,
            Err(err) => {
                log::error!("sync slave failed to bind port {SYNC_PORT}: {err}");
                self.running.store(false, Ordering::Release);
                return false;
            }
        };
        if let Err(err) = socket.set_read_timeout(Some(POLL_TIMEOUT)) {
            log::warn!("sync slave failed to set read timeout: {err}");
        }

        let clock = Arc::clone(&self.clock);
        let running = Arc::clone(&self.running);
        let packets_received = Arc::clone(&self.packets_received);
        let mut buf = [0u8; 64];

        self.handle = Some(thread::spawn(move || {
            while running.load(Ordering::Acquire) {
                match socket.recv_from(&mut buf) {
                    Ok((n, _addr)) => {
                        if let Some((_sequence, time)) = decode(&buf[..n]) {
                            clock.set(time);
                            packets_received.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    Err(err) => {
                        if err.kind() == std::io::ErrorKind::WouldBlock || err.kind() == std::io::ErrorKind::TimedOut {
                            continue;
                        }
                        log::info!("sync slave socket closed: {err}");
                        break;
                    }
                }
            }
        }));
        log::info!("sync slave started (listening on port {SYNC_PORT})");
        true
    }

    pub fn end(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("sync slave thread panicked while stopping");
            }
        }
        log::info!("sync slave stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn packets_received(&self) -> u64 {
        self.packets_received.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_end_is_idempotent() {
        let clock = Arc::new(AnimationClock::new());
        let mut slave = SyncSlave::new(clock);
        assert!(slave.begin());
        assert!(slave.begin());
        slave.end();
        slave.end();
        assert!(!slave.is_running());
    }
}
