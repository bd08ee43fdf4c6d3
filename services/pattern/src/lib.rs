//! Pattern registry, palettes, and built-in patterns (component C).

mod builtins;
mod compile;
mod mapping;
mod palette;
mod palette_registry;
mod pattern;
mod registry;

pub use builtins::{ColorWipe, Perlin1D, RainbowWave, Solid, Sparkle};
pub use compile::{validate_source, CompileError};
pub use mapping::PixelMapping;
pub use palette::Palette;
pub use palette_registry::PaletteRegistry;
pub use pattern::{Pattern, PatternInput, PatternOutput, PatternState};
pub use registry::PatternRegistry;
