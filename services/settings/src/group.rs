use serde::{Deserialize, Serialize};

/// A contiguous LED range with its own rendering parameters (spec 3
/// "Group"). Groups partition or subset the strip; when ranges overlap,
/// later groups in declared order win for the overlapping pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub start: usize,
    pub end: usize,
    pub pattern_id: u32,
    pub palette_id: u32,
    pub brightness: f32,
    pub saturation: f32,
    pub color_temp_kelvin: f32,
    pub speed: f32,
    pub scale: f32,
}

impl Default for Group {
    fn default() -> Group {
        Group {
            start: 0,
            end: 0,
            pattern_id: 0,
            palette_id: 0,
            brightness: 1.0,
            saturation: 1.0,
            color_temp_kelvin: 6500.0,
            speed: 1.0,
            scale: 1.0,
        }
    }
}

impl Group {
    /// `[start, end)` intersected with `[0, strip_len)`, as used by the
    /// animation loop's per-group pixel range (spec 4.D step 2a).
    pub fn clamped_range(&self, strip_len: usize) -> std::ops::Range<usize> {
        let start = self.start.min(strip_len);
        let end = self.end.min(strip_len).max(start);
        start..end
    }
}

/// Partial update for a single group; `None` fields leave the
/// corresponding value unchanged (spec 6, per-group reconfiguration
/// fields).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupDelta {
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    #[serde(default)]
    pub pattern_id: Option<u32>,
    #[serde(default)]
    pub palette_id: Option<u32>,
    #[serde(default)]
    pub brightness: Option<f32>,
    #[serde(default)]
    pub saturation: Option<f32>,
    #[serde(default)]
    pub color_temp_kelvin: Option<f32>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub scale: Option<f32>,
}

impl GroupDelta {
    pub fn apply(&self, base: &Group) -> Group {
        Group {
            start: self.start.unwrap_or(base.start),
            end: self.end.unwrap_or(base.end),
            pattern_id: self.pattern_id.unwrap_or(base.pattern_id),
            palette_id: self.palette_id.unwrap_or(base.palette_id),
            brightness: self.brightness.unwrap_or(base.brightness),
            saturation: self.saturation.unwrap_or(base.saturation),
            color_temp_kelvin: self.color_temp_kelvin.unwrap_or(base.color_temp_kelvin),
            speed: self.speed.unwrap_or(base.speed),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_range_intersects_strip_length() {
        let group = Group { start: 5, end: 20, ..Group::default() };
        assert_eq!(group.clamped_range(10), 5..10);
    }

    #[test]
    fn clamped_range_handles_start_past_strip_length() {
        let group = Group { start: 50, end: 60, ..Group::default() };
        assert_eq!(group.clamped_range(10), 10..10);
    }

    #[test]
    fn delta_apply_only_overrides_present_fields() {
        let base = Group { brightness: 0.5, speed: 2.0, ..Group::default() };
        let delta = GroupDelta { brightness: Some(1.0), ..GroupDelta::default() };
        let updated = delta.apply(&base);
        assert_eq!(updated.brightness, 1.0);
        assert_eq!(updated.speed, 2.0);
    }
}
