use crate::Rgb;

/// Which RGB -> RGBW split to use when a strip has a dedicated white
/// channel. See spec 4.A: legacy keeps the white emitter neutral, advanced
/// accounts for the white LED's own color temperature tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum RgbwAlgorithm {
    #[default]
    Legacy,
    Advanced,
}

/// Everything [`crate::evaluate`] needs beyond the pixel itself: the
/// effective (group * global) brightness and saturation, the current
/// global color temperature, the per-channel correction multiplier, and
/// the strip's RGBW configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionParams {
    /// Used only for RGB-mode pixels; HSV pixels carry their own `s`.
    pub saturation: f32,
    pub brightness: f32,
    pub color_temp_kelvin: f32,
    pub correction: Rgb,
    pub rgbw_algorithm: RgbwAlgorithm,
    pub has_white: bool,
    /// Normalized white-LED tint (`max channel == 1`), looked up from
    /// [`crate::blackbody_to_rgb`] at the strip's configured white LED
    /// temperature. Unused under [`RgbwAlgorithm::Legacy`].
    pub white_tint: Rgb,
}

/// HSV hue -> full-chroma RGB using the "rainbow" spectrum: six piecewise
/// linear ramps of 32 steps each (`256/8`), biased toward perceived
/// luminance equality so yellow and cyan are pulled down relative to the
/// canonical HSV cone. This is the same hue wheel FastLED's
/// `hsv2rgb_rainbow` uses, ported from the fused 8-bit integer routine in
/// the original driver (`render_hsv2rgb_rainbow_float`) and adapted to
/// return a standalone unit-interval chroma triple; saturation and value
/// are applied by the caller as separate pipeline stages.
pub(crate) fn hsv_to_rgb_rainbow(hue: f32) -> Rgb {
    let hue_u8 = ((hue.rem_euclid(1.0)) * 255.0) as u32 & 0xFF;
    let offset = hue_u8 & 0x1F;
    let offset8 = offset << 3;
    let third = offset8 / 3;
    let two_thirds = third * 2;

    let (r, g, b): (u32, u32, u32) = if hue_u8 & 0x80 == 0 {
        if hue_u8 & 0x40 == 0 {
            if hue_u8 & 0x20 == 0 {
                (255 - third, third, 0)
            } else {
                (171, 85 + third, 0)
            }
        } else if hue_u8 & 0x20 == 0 {
            (171 - two_thirds, 170 + third, 0)
        } else {
            (0, 255 - third, third)
        }
    } else if hue_u8 & 0x40 == 0 {
        if hue_u8 & 0x20 == 0 {
            (0, 171 - two_thirds, 85 + two_thirds)
        } else {
            (third, 0, 255 - third)
        }
    } else if hue_u8 & 0x20 == 0 {
        (85 + third, 0, 171 - third)
    } else {
        (170 + third, 0, 85 - third)
    };

    Rgb {
        r: (r.min(255) as f32) / 255.0,
        g: (g.min(255) as f32) / 255.0,
        b: (b.min(255) as f32) / 255.0,
    }
}

/// Blend `rgb` toward the channel average by `1 - saturation`, i.e. the
/// generic desaturation step shared by both pixel color modes (spec 4.A
/// step 1), matching the non-white branch of the original driver's
/// `render_rgb_float`.
pub(crate) fn desaturate(rgb: Rgb, saturation: f32) -> Rgb {
    if saturation >= 1.0 {
        return rgb;
    }
    let avg = (rgb.r + rgb.g + rgb.b) / 3.0;
    Rgb {
        r: (rgb.r - avg) * saturation + avg,
        g: (rgb.g - avg) * saturation + avg,
        b: (rgb.b - avg) * saturation + avg,
    }
}

/// Split post-correction RGB into (possibly reduced) RGB plus a white
/// intensity, per spec 4.A. Both algorithms extract `w_raw = min(r,g,b)`
/// and report a squared white intensity (matching the legacy algorithm's
/// perceptual curve); they differ only in how much of `w_raw` is removed
/// from each RGB channel: legacy removes it uniformly, advanced removes
/// it weighted by the white LED's own tint. With a neutral tint
/// `(1,1,1)` the two are bit-identical, which is exactly the invariant
/// spec 4.A/8 requires.
pub fn rgbw_split(
    rgb: Rgb,
    has_white: bool,
    algorithm: RgbwAlgorithm,
    white_tint: Rgb,
) -> (Rgb, f32) {
    if !has_white {
        return (rgb, 0.0);
    }
    let tint = match algorithm {
        RgbwAlgorithm::Legacy => Rgb { r: 1.0, g: 1.0, b: 1.0 },
        RgbwAlgorithm::Advanced => white_tint,
    };
    let w_raw = rgb.min_channel().max(0.0);
    let w = w_raw * w_raw;
    let subtract = Rgb {
        r: w_raw * tint.r,
        g: w_raw * tint.g,
        b: w_raw * tint.b,
    };
    let split = Rgb {
        r: (rgb.r - subtract.r).max(0.0),
        g: (rgb.g - subtract.g).max(0.0),
        b: (rgb.b - subtract.b).max(0.0),
    };
    (split, w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_wheel_hits_primary_colors() {
        let red = hsv_to_rgb_rainbow(0.0);
        assert!(red.r > 0.95 && red.g < 0.05 && red.b < 0.05);
        // Green sits roughly a third of the way around the wheel.
        let green = hsv_to_rgb_rainbow(1.0 / 3.0);
        assert!(green.g > 0.8);
        let blue = hsv_to_rgb_rainbow(2.0 / 3.0);
        assert!(blue.b > 0.8);
    }

    #[test]
    fn desaturate_is_identity_at_full_saturation() {
        let rgb = Rgb { r: 1.0, g: 0.2, b: 0.6 };
        assert_eq!(desaturate(rgb, 1.0), rgb);
    }

    #[test]
    fn desaturate_to_zero_collapses_to_average() {
        let rgb = Rgb { r: 1.0, g: 0.0, b: 0.5 };
        let gray = desaturate(rgb, 0.0);
        let avg = (rgb.r + rgb.g + rgb.b) / 3.0;
        assert!((gray.r - avg).abs() < 1e-6);
        assert!((gray.g - avg).abs() < 1e-6);
        assert!((gray.b - avg).abs() < 1e-6);
    }
}
