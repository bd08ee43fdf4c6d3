use ledcontrol_color::{Rgb, RgbwAlgorithm};
use serde::{Deserialize, Serialize};

use crate::{ArtnetSettingsDelta, GroupDelta, Settings, SyncSettingsDelta};

/// A partial settings update as delivered by the reconfiguration
/// collaborator (spec 6). Every field is optional so a client only
/// needs to send what changed; `groups`, when present, replaces groups
/// wholesale rather than merging element-by-element, since group lists
/// are reordered and resized as a unit in practice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsDelta {
    #[serde(default)]
    pub on: Option<bool>,
    #[serde(default)]
    pub global_brightness: Option<f32>,
    #[serde(default)]
    pub global_saturation: Option<f32>,
    #[serde(default)]
    pub global_color_temp_kelvin: Option<f32>,
    #[serde(default)]
    pub global_correction: Option<Rgb>,
    #[serde(default)]
    pub rgbw_algorithm: Option<RgbwAlgorithm>,
    #[serde(default)]
    pub white_led_temperature: Option<f32>,
    #[serde(default)]
    pub use_white_channel: Option<bool>,
    /// Replaces the entire group list when present.
    #[serde(default)]
    pub groups: Option<Vec<GroupDelta>>,
    #[serde(default)]
    pub artnet: Option<ArtnetSettingsDelta>,
    #[serde(default)]
    pub sync: Option<SyncSettingsDelta>,
}

impl SettingsDelta {
    /// Builds a new, fully-formed snapshot from `base` and this delta.
    /// `groups`, if present, is applied positionally against `base`'s
    /// existing groups (a `GroupDelta` past the end of `base.groups`
    /// is applied against [`crate::Group::default`]).
    pub fn apply(&self, base: &Settings) -> Settings {
        let groups = match &self.groups {
            Some(deltas) => deltas
                .iter()
                .enumerate()
                .map(|(i, delta)| {
                    let existing = base.groups.get(i).cloned().unwrap_or_default();
                    delta.apply(&existing)
                })
                .collect(),
            None => base.groups.clone(),
        };

        Settings {
            on: self.on.unwrap_or(base.on),
            global_brightness: self.global_brightness.unwrap_or(base.global_brightness),
            global_saturation: self.global_saturation.unwrap_or(base.global_saturation),
            global_color_temp_kelvin: self
                .global_color_temp_kelvin
                .unwrap_or(base.global_color_temp_kelvin),
            global_correction: self.global_correction.unwrap_or(base.global_correction),
            rgbw_algorithm: self.rgbw_algorithm.unwrap_or(base.rgbw_algorithm),
            white_led_temperature: self
                .white_led_temperature
                .unwrap_or(base.white_led_temperature),
            use_white_channel: self.use_white_channel.unwrap_or(base.use_white_channel),
            groups,
            artnet: match &self.artnet {
                Some(delta) => delta.apply(&base.artnet),
                None => base.artnet.clone(),
            },
            sync: match &self.sync {
                Some(delta) => delta.apply(&base.sync),
                None => base.sync.clone(),
            },
        }
    }

    /// True if applying this delta would require the frame arbiter to
    /// restart a live Art-Net session (spec 4.F).
    pub fn requires_artnet_restart(&self) -> bool {
        self.artnet.as_ref().is_some_and(|d| d.requires_restart())
    }
}
