use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// The animation clock `t` (spec 3 "Pattern", spec 4.D, spec 5 "Animation
/// clock"): a shared scalar written by the sync slave and read by the
/// animation thread every frame. Stored as the bit pattern of an `f64`
/// in an `AtomicU64` rather than behind a mutex, per spec 5's own
/// suggestion ("use an atomic 64-bit store/load; no need for ordering
/// beyond acquire/release").
#[derive(Default)]
pub struct AnimationClock {
    bits: AtomicU64,
    reset_pending: AtomicBool,
}

impl AnimationClock {
    pub fn new() -> AnimationClock {
        AnimationClock {
            bits: AtomicU64::new(0.0f64.to_bits()),
            reset_pending: AtomicBool::new(false),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Jump the clock directly to `t`, as the sync slave does on every
    /// received packet (spec 4.G, "the slave jumps to the received
    /// time").
    pub fn set(&self, t: f64) {
        self.bits.store(t.to_bits(), Ordering::Release);
    }

    pub fn advance(&self, dt: f64) {
        let current = self.get();
        self.set(current + dt);
    }

    /// Requests that the clock be zeroed at the start of the next
    /// frame (spec 4.D, `reset_timer()`). Deferred rather than applied
    /// immediately so it always lands on a frame boundary.
    pub fn request_reset(&self) {
        self.reset_pending.store(true, Ordering::Release);
    }

    /// Applies a pending reset, if any. Called once per frame by the
    /// animation loop before computing `dt`.
    pub fn take_reset(&self) -> bool {
        if self.reset_pending.swap(false, Ordering::AcqRel) {
            self.set(0.0);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let clock = AnimationClock::new();
        assert_eq!(clock.get(), 0.0);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let clock = AnimationClock::new();
        clock.set(12.5);
        assert_eq!(clock.get(), 12.5);
    }

    #[test]
    fn advance_adds_to_current_value() {
        let clock = AnimationClock::new();
        clock.set(1.0);
        clock.advance(0.5);
        assert_eq!(clock.get(), 1.5);
    }

    #[test]
    fn request_reset_is_deferred_until_take_reset() {
        let clock = AnimationClock::new();
        clock.set(9.0);
        clock.request_reset();
        assert_eq!(clock.get(), 9.0);
        assert!(clock.take_reset());
        assert_eq!(clock.get(), 0.0);
        assert!(!clock.take_reset());
    }
}
