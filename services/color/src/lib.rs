//! Float HSV/RGB pixel evaluation to packed 32-bit RGBW words.
//!
//! This crate is the bottom of the render pipeline (component A in the
//! core's dependency order): it owns no state and performs no I/O. Every
//! function here is pure and allocation-free, so it is safe to call once
//! per pixel per frame from the animation hot loop.

mod blackbody;
mod convert;
mod pixel;

pub use blackbody::blackbody_to_rgb;
pub use convert::{rgbw_split, ConversionParams, RgbwAlgorithm};
pub use pixel::{ColorMode, Hsv, Pixel, Rgb};

/// Pack an RGBW tuple (each channel already 8-bit quantized) into the
/// canonical `0xWWRRGGBB` word. Channel reordering for the wire happens
/// downstream, in the strip component.
pub fn pack_rgbw(r: u8, g: u8, b: u8, w: u8) -> u32 {
    (u32::from(w) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Inverse of [`pack_rgbw`].
pub fn unpack_rgbw(word: u32) -> (u8, u8, u8, u8) {
    let w = (word >> 24) as u8;
    let r = (word >> 16) as u8;
    let g = (word >> 8) as u8;
    let b = word as u8;
    (r, g, b, w)
}

/// Evaluate a [`Pixel`] into a packed RGBW word, following the seven-stage
/// pipeline from the core's color design: saturation blend, perceptual
/// brightness, color-temperature correction, per-channel correction, the
/// RGB->RGBW split, 8-bit quantization, in that order. Channel reordering
/// for the wire is the caller's (strip component's) responsibility.
pub fn evaluate(pixel: Pixel, params: &ConversionParams) -> u32 {
    let (hue_rgb, own_value) = match pixel {
        Pixel::Hsv(hsv) => (convert::hsv_to_rgb_rainbow(hsv.h), Some(hsv.v)),
        Pixel::Rgb(rgb) => (rgb.clamped(), None),
    };

    // (1) saturation blend: desaturate toward the channel average.
    let sat = match pixel {
        Pixel::Hsv(hsv) => hsv.s,
        Pixel::Rgb(_) => params.saturation,
    }
    .clamp(0.0, 1.0);
    let desaturated = convert::desaturate(hue_rgb, sat);

    // (2) brightness: HSV pixels carry their own perceptual value which is
    // squared before being scaled by the effective (group * global)
    // brightness; RGB pixels have no such component and scale linearly.
    let value_term = match own_value {
        Some(v) => {
            let v = v.clamp(0.0, 1.0);
            v * v
        }
        None => 1.0,
    };
    let effective_brightness = (value_term * params.brightness).clamp(0.0, 1.0);
    let brightened = desaturated.scale(effective_brightness);

    // (3) color-temperature correction, as a per-channel multiplier.
    let temp_rgb = blackbody::blackbody_to_rgb(params.color_temp_kelvin);
    let temp_corrected = brightened.multiply(temp_rgb);

    // (4) per-channel correction multiplier.
    let corrected = temp_corrected.multiply(params.correction);

    // (5) RGB -> RGBW split.
    let (split_rgb, w) = convert::rgbw_split(
        corrected,
        params.has_white,
        params.rgbw_algorithm,
        params.white_tint,
    );

    // (6) 8-bit quantization, (7) reorder happens in the strip component.
    let r8 = quantize(split_rgb.r);
    let g8 = quantize(split_rgb.g);
    let b8 = quantize(split_rgb.b);
    let w8 = quantize(w);

    pack_rgbw(r8, g8, b8, w8)
}

fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
