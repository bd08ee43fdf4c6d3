/// A color expressed as hue/saturation/value, each nominally in `[0, 1)`
/// for hue and `[0, 1]` for saturation and value. Hue wraps; saturation
/// and value clamp. See spec data model, "Pixel".
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// A color expressed as red/green/blue, each in the unit interval.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn clamped(self) -> Rgb {
        Rgb {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    pub fn scale(self, factor: f32) -> Rgb {
        Rgb {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    pub fn multiply(self, other: Rgb) -> Rgb {
        Rgb {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }

    pub fn min_channel(self) -> f32 {
        self.r.min(self.g).min(self.b)
    }

    pub fn max_channel(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    /// Scale so the largest channel is exactly 1.0, as required for a
    /// white-LED tint (spec 4.A Advanced: `max(wr,wg,wb)=1`).
    pub fn normalized(self) -> Rgb {
        let max = self.max_channel();
        if max <= 0.0 {
            Rgb { r: 1.0, g: 1.0, b: 1.0 }
        } else {
            self.scale(1.0 / max)
        }
    }
}

/// A pixel as produced by pattern evaluation: either color space, never
/// both. The engine never stores 8-bit pixels internally; quantization is
/// the last step before hardware commit.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Pixel {
    Hsv(Hsv),
    Rgb(Rgb),
}

/// A pattern's declared output color space, fixed per pattern id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    #[default]
    Hsv,
    Rgb,
}
