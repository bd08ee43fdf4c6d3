use std::sync::{Arc, RwLock};

use ledcontrol_settings::Settings;

/// Settings published as immutable snapshots behind an atomic pointer
/// swap rather than mutated in place (spec 5, "settings are immutable
/// snapshots with atomic pointer exchange — writers construct a new
/// snapshot, then publish"). The `RwLock` is held only for the pointer
/// clone on read or the pointer replace on write, never across a frame
/// or packet's worth of work.
pub struct SharedSettings {
    current: RwLock<Arc<Settings>>,
}

impl SharedSettings {
    pub fn new(initial: Settings) -> SharedSettings {
        SharedSettings {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Cheap snapshot clone (an `Arc` bump), read every frame by the
    /// animation thread and every packet by the Art-Net receiver.
    pub fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.current.read().unwrap())
    }

    pub fn publish(&self, settings: Settings) {
        *self.current.write().unwrap() = Arc::new(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_latest_publish() {
        let shared = SharedSettings::new(Settings::default());
        let mut updated = Settings::default();
        updated.global_brightness = 0.3;
        shared.publish(updated);
        assert_eq!(shared.snapshot().global_brightness, 0.3);
    }

    #[test]
    fn earlier_snapshot_is_unaffected_by_later_publish() {
        let shared = SharedSettings::new(Settings::default());
        let before = shared.snapshot();
        let mut updated = Settings::default();
        updated.global_brightness = 0.1;
        shared.publish(updated);
        assert_eq!(before.global_brightness, 1.0);
    }
}
