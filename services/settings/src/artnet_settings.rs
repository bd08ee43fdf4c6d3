use serde::{Deserialize, Serialize};

/// Temporal conditioning applied to incoming Art-Net tuples (spec 4.E
/// step 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameInterpolation {
    #[default]
    None,
    Average,
    Lerp,
}

/// Spatial conditioning applied across physical LEDs in one frame (spec
/// 4.E step 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpatialSmoothing {
    #[default]
    None,
    Average,
    Lerp,
    Gaussian,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtnetSettings {
    pub enable_artnet: bool,
    pub universe: u16,
    pub channel_offset: usize,
    pub group_size: usize,
    pub frame_interpolation: FrameInterpolation,
    pub frame_interp_size: usize,
    pub spatial_smoothing: SpatialSmoothing,
    pub spatial_size: usize,
}

impl Default for ArtnetSettings {
    fn default() -> ArtnetSettings {
        ArtnetSettings {
            enable_artnet: false,
            universe: 0,
            channel_offset: 0,
            group_size: 1,
            frame_interpolation: FrameInterpolation::None,
            frame_interp_size: 1,
            spatial_smoothing: SpatialSmoothing::None,
            spatial_size: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtnetSettingsDelta {
    #[serde(default)]
    pub enable_artnet: Option<bool>,
    #[serde(default)]
    pub universe: Option<u16>,
    #[serde(default)]
    pub channel_offset: Option<usize>,
    #[serde(default)]
    pub group_size: Option<usize>,
    #[serde(default)]
    pub frame_interpolation: Option<FrameInterpolation>,
    #[serde(default)]
    pub frame_interp_size: Option<usize>,
    #[serde(default)]
    pub spatial_smoothing: Option<SpatialSmoothing>,
    #[serde(default)]
    pub spatial_size: Option<usize>,
}

impl ArtnetSettingsDelta {
    pub fn apply(&self, base: &ArtnetSettings) -> ArtnetSettings {
        ArtnetSettings {
            enable_artnet: self.enable_artnet.unwrap_or(base.enable_artnet),
            universe: self.universe.unwrap_or(base.universe),
            channel_offset: self.channel_offset.unwrap_or(base.channel_offset),
            group_size: self.group_size.unwrap_or(base.group_size),
            frame_interpolation: self.frame_interpolation.unwrap_or(base.frame_interpolation),
            frame_interp_size: self.frame_interp_size.unwrap_or(base.frame_interp_size),
            spatial_smoothing: self.spatial_smoothing.unwrap_or(base.spatial_smoothing),
            spatial_size: self.spatial_size.unwrap_or(base.spatial_size),
        }
    }

    /// True if this delta touches anything beyond `enable_artnet`,
    /// meaning a live `ReceivingArtNet` session must be restarted rather
    /// than left running (spec 4.F, "perform ReceivingArtNet ->
    /// ReceivingArtNet as stop+restart").
    pub fn requires_restart(&self) -> bool {
        self.universe.is_some()
            || self.channel_offset.is_some()
            || self.group_size.is_some()
            || self.frame_interpolation.is_some()
            || self.frame_interp_size.is_some()
            || self.spatial_smoothing.is_some()
            || self.spatial_size.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_only_delta_does_not_require_restart() {
        let delta = ArtnetSettingsDelta { enable_artnet: Some(true), ..Default::default() };
        assert!(!delta.requires_restart());
    }

    #[test]
    fn universe_change_requires_restart() {
        let delta = ArtnetSettingsDelta { universe: Some(3), ..Default::default() };
        assert!(delta.requires_restart());
    }
}
