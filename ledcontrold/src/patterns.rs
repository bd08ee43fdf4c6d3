//! The stable built-in pattern/palette ids `ledcontrold` registers at
//! startup. User-compiled patterns (spec 4.C, out of scope for this
//! binary) would be registered above [`FIRST_USER_PATTERN_ID`].

use ledcontrol_color::Hsv;
use ledcontrol_pattern::{ColorWipe, PaletteRegistry, PatternRegistry, Perlin1D, RainbowWave, Solid, Sparkle};

pub const PATTERN_SOLID: u32 = 0;
pub const PATTERN_RAINBOW_WAVE: u32 = 1;
pub const PATTERN_COLOR_WIPE: u32 = 2;
pub const PATTERN_SPARKLE: u32 = 3;
pub const PATTERN_PERLIN: u32 = 4;

pub const FIRST_USER_PATTERN_ID: u32 = 1000;

pub const PALETTE_RAINBOW: u32 = 0;
pub const PALETTE_FIRE: u32 = 1;

/// Registers the fixed library of native patterns (spec 9 "Design
/// notes", the built-in pattern set expansion).
pub fn builtin_patterns() -> PatternRegistry {
    let mut registry = PatternRegistry::new();
    registry.register(
        PATTERN_SOLID,
        Box::new(Solid { color: Hsv { h: 0.0, s: 0.0, v: 1.0 } }),
    );
    registry.register(PATTERN_RAINBOW_WAVE, Box::new(RainbowWave { cycles: 1.0 }));
    registry.register(
        PATTERN_COLOR_WIPE,
        Box::new(ColorWipe {
            color: Hsv { h: 0.0, s: 1.0, v: 1.0 },
            width: 0.1,
            speed: 0.2,
        }),
    );
    registry.register(
        PATTERN_SPARKLE,
        Box::new(Sparkle::new(Hsv { h: 0.13, s: 0.3, v: 1.0 }, 0.6, 1.2)),
    );
    registry.register(PATTERN_PERLIN, Box::new(Perlin1D { scale: 3.0, speed: 0.3 }));
    registry
}

/// Registers the default palette set: a full-spectrum rainbow and a
/// warm fire gradient, both built from a handful of HSV stops per spec
/// 3 "Palette".
pub fn builtin_palettes() -> PaletteRegistry {
    let mut registry = PaletteRegistry::new();
    registry.register(
        PALETTE_RAINBOW,
        ledcontrol_pattern::Palette::new(vec![
            (0.0, Hsv { h: 0.0, s: 1.0, v: 1.0 }),
            (1.0 / 3.0, Hsv { h: 1.0 / 3.0, s: 1.0, v: 1.0 }),
            (2.0 / 3.0, Hsv { h: 2.0 / 3.0, s: 1.0, v: 1.0 }),
        ]),
    );
    registry.register(
        PALETTE_FIRE,
        ledcontrol_pattern::Palette::new(vec![
            (0.0, Hsv { h: 0.0, s: 1.0, v: 0.2 }),
            (0.3, Hsv { h: 0.02, s: 1.0, v: 0.8 }),
            (0.6, Hsv { h: 0.08, s: 1.0, v: 1.0 }),
            (1.0, Hsv { h: 0.12, s: 0.6, v: 1.0 }),
        ]),
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns_registers_all_five() {
        let registry = builtin_patterns();
        assert_eq!(registry.len(), 5);
        assert!(registry.contains(PATTERN_SOLID));
        assert!(registry.contains(PATTERN_PERLIN));
    }

    #[test]
    fn builtin_palettes_registers_rainbow_and_fire() {
        let registry = builtin_palettes();
        assert!(registry.contains(PALETTE_RAINBOW));
        assert!(registry.contains(PALETTE_FIRE));
    }
}
