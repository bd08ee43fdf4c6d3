use ledcontrol_color::{Rgb, RgbwAlgorithm};
use serde::{Deserialize, Serialize};

use crate::{ArtnetSettings, Group, SyncSettings};

/// A complete, immutable configuration snapshot (spec 3 "Global
/// settings"). Published by reconfiguration via atomic pointer swap
/// rather than mutated in place — see the animation crate's
/// `SharedSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub on: bool,
    pub global_brightness: f32,
    pub global_saturation: f32,
    pub global_color_temp_kelvin: f32,
    pub global_correction: Rgb,
    pub rgbw_algorithm: RgbwAlgorithm,
    pub white_led_temperature: f32,
    pub use_white_channel: bool,
    pub groups: Vec<Group>,
    pub artnet: ArtnetSettings,
    pub sync: SyncSettings,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            on: true,
            global_brightness: 1.0,
            global_saturation: 1.0,
            global_color_temp_kelvin: 6500.0,
            global_correction: Rgb { r: 1.0, g: 1.0, b: 1.0 },
            rgbw_algorithm: RgbwAlgorithm::Legacy,
            white_led_temperature: 6500.0,
            use_white_channel: false,
            groups: Vec::new(),
            artnet: ArtnetSettings::default(),
            sync: SyncSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_on_and_full_brightness() {
        let settings = Settings::default();
        assert!(settings.on);
        assert_eq!(settings.global_brightness, 1.0);
        assert!(settings.groups.is_empty());
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, parsed);
    }
}
