use std::sync::{Arc, Mutex};
use std::time::Duration;

use ledcontrol_animation::AnimationController;
use ledcontrol_artnet::ArtnetReceiver;
use ledcontrol_settings::ArtnetSettings;
use ledcontrol_strip::Strip;

/// The arbiter's state machine (spec 4.F). Exactly one of
/// `Animating`/`ReceivingArtNet` owns the strip in a stable state;
/// `Idle` is reached only after a fatal hardware error takes the
/// animation thread down (spec 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterState {
    Animating,
    ReceivingArtNet,
    Idle,
}

/// Mutual exclusion between the animation controller and the Art-Net
/// receiver (spec 4.F). Enable/disable Art-Net serializes on a single
/// mutex (spec 5) so concurrent reconfiguration cannot interleave
/// start/stop; the strip is always cleared and committed at transition
/// boundaries so a partially-updated frame can never persist.
pub struct FrameArbiter {
    strip: Arc<Mutex<Strip>>,
    animation: Arc<AnimationController>,
    metrics_interval: Duration,
    inner: Mutex<Inner>,
}

struct Inner {
    state: ArbiterState,
    receiver: Option<ArtnetReceiver>,
}

impl FrameArbiter {
    /// Constructs the arbiter already in `Animating` state, starting
    /// the animation thread immediately.
    pub fn new(strip: Arc<Mutex<Strip>>, animation: Arc<AnimationController>, metrics_interval: Duration) -> FrameArbiter {
        animation.begin();
        FrameArbiter {
            strip,
            animation,
            metrics_interval,
            inner: Mutex::new(Inner { state: ArbiterState::Animating, receiver: None }),
        }
    }

    pub fn state(&self) -> ArbiterState {
        self.inner.lock().unwrap().state
    }

    /// `Animating -> ReceivingArtNet`. A no-op if already receiving
    /// (spec 4.F, "idempotent"); use [`FrameArbiter::reconfigure_artnet`]
    /// to apply a settings change to a live session.
    pub fn enable_artnet(&self, settings: ArtnetSettings) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state == ArbiterState::ReceivingArtNet {
            return;
        }
        self.animation.end();
        self.clear_and_commit();
        inner.receiver = Some(self.start_receiver(settings));
        inner.state = ArbiterState::ReceivingArtNet;
    }

    /// `ReceivingArtNet -> Animating`. A no-op if not currently
    /// receiving.
    pub fn disable_artnet(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != ArbiterState::ReceivingArtNet {
            return;
        }
        if let Some(receiver) = inner.receiver.take() {
            receiver.end();
        }
        self.clear_and_commit();
        self.animation.begin();
        inner.state = ArbiterState::Animating;
    }

    /// `ReceivingArtNet -> ReceivingArtNet` as stop+restart (spec 4.F,
    /// "Settings changes that modify receiver configuration perform
    /// ReceivingArtNet -> ReceivingArtNet as stop+restart"). A no-op
    /// while not currently receiving; the caller is expected to hold
    /// the new settings until the next `enable_artnet`.
    pub fn reconfigure_artnet(&self, settings: ArtnetSettings) {
        let mut inner = self.inner.lock().unwrap();
        if inner.state != ArbiterState::ReceivingArtNet {
            return;
        }
        if let Some(receiver) = inner.receiver.take() {
            receiver.end();
        }
        self.clear_and_commit();
        inner.receiver = Some(self.start_receiver(settings));
    }

    /// Checks whether the thread backing the current state has exited
    /// on its own (a fatal strip commit error for animation, or a
    /// socket error for the receiver) and, if so, performs the implied
    /// transition (spec 4.F's "receiver error" edge back to
    /// `Animating`; spec 7's fatal-hardware-error edge to `Idle`).
    /// Intended to be called periodically by the hosting binary.
    pub fn poll_health(&self) {
        let mut inner = self.inner.lock().unwrap();
        match inner.state {
            ArbiterState::Animating => {
                if !self.animation.is_running() {
                    log::error!("animation thread exited unexpectedly; arbiter entering Idle");
                    inner.state = ArbiterState::Idle;
                }
            }
            ArbiterState::ReceivingArtNet => {
                let receiver_alive = inner.receiver.as_ref().is_some_and(|r| r.is_running());
                if !receiver_alive {
                    log::warn!("artnet receiver exited; falling back to Animating");
                    inner.receiver = None;
                    self.clear_and_commit();
                    self.animation.begin();
                    inner.state = ArbiterState::Animating;
                }
            }
            ArbiterState::Idle => {}
        }
    }

    fn start_receiver(&self, settings: ArtnetSettings) -> ArtnetReceiver {
        let receiver = ArtnetReceiver::new(Arc::clone(&self.strip), settings, self.metrics_interval);
        receiver.begin();
        receiver
    }

    fn clear_and_commit(&self) {
        let mut strip = self.strip.lock().unwrap();
        strip.clear();
        if let Err(err) = strip.commit() {
            log::error!("arbiter transition commit failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledcontrol_animation::{AnimationClock, SharedSettings};
    use ledcontrol_pattern::{PaletteRegistry, PatternRegistry};
    use ledcontrol_settings::Settings;
    use ledcontrol_strip::{ChannelOrder, NullTransport};

    fn test_strip(n: usize) -> Arc<Mutex<Strip>> {
        let transport = NullTransport::new(n, 3);
        Arc::new(Mutex::new(Strip::new(n, ChannelOrder::Rgb, Box::new(transport))))
    }

    fn test_animation(strip: Arc<Mutex<Strip>>) -> Arc<AnimationController> {
        Arc::new(AnimationController::new(
            strip,
            Arc::new(SharedSettings::new(Settings::default())),
            Arc::new(PatternRegistry::new()),
            Arc::new(PaletteRegistry::new()),
            Arc::new(AnimationClock::new()),
            200.0,
        ))
    }

    #[test]
    fn starts_in_animating_state_with_thread_running() {
        let strip = test_strip(4);
        let animation = test_animation(Arc::clone(&strip));
        let arbiter = FrameArbiter::new(strip, Arc::clone(&animation), Duration::from_secs(10));
        assert_eq!(arbiter.state(), ArbiterState::Animating);
        assert!(animation.is_running());
        animation.end();
    }

    #[test]
    fn enable_artnet_stops_animation_and_starts_receiving() {
        let strip = test_strip(4);
        let animation = test_animation(Arc::clone(&strip));
        let arbiter = FrameArbiter::new(strip, Arc::clone(&animation), Duration::from_secs(10));
        arbiter.enable_artnet(ArtnetSettings::default());
        assert_eq!(arbiter.state(), ArbiterState::ReceivingArtNet);
        assert!(!animation.is_running());
        arbiter.disable_artnet();
    }

    #[test]
    fn enable_artnet_twice_is_idempotent() {
        let strip = test_strip(4);
        let animation = test_animation(Arc::clone(&strip));
        let arbiter = FrameArbiter::new(strip, Arc::clone(&animation), Duration::from_secs(10));
        arbiter.enable_artnet(ArtnetSettings::default());
        arbiter.enable_artnet(ArtnetSettings::default());
        assert_eq!(arbiter.state(), ArbiterState::ReceivingArtNet);
        arbiter.disable_artnet();
    }

    #[test]
    fn disable_artnet_restarts_animation() {
        let strip = test_strip(4);
        let animation = test_animation(Arc::clone(&strip));
        let arbiter = FrameArbiter::new(strip, Arc::clone(&animation), Duration::from_secs(10));
        arbiter.enable_artnet(ArtnetSettings::default());
        arbiter.disable_artnet();
        assert_eq!(arbiter.state(), ArbiterState::Animating);
        assert!(animation.is_running());
        animation.end();
    }
}
