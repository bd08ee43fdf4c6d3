use std::sync::Mutex;

use ledcontrol_color::{ColorMode, Hsv, Pixel, Rgb};
use rand::Rng;

use crate::pattern::{Pattern, PatternInput, PatternOutput, PatternState};
use crate::Palette;

/// A single fixed color, ignoring position and time (spec 9, built-in
/// pattern list).
pub struct Solid {
    pub color: Hsv,
}

impl Pattern for Solid {
    fn color_mode(&self) -> ColorMode {
        ColorMode::Hsv
    }

    fn evaluate(&self, _input: &PatternInput, _palette: Option<&Palette>) -> PatternOutput {
        PatternOutput {
            pixel: Pixel::Hsv(self.color),
            next_state: PatternState::ZERO,
        }
    }
}

/// A hue ramp that travels down the strip over time: hue is a function
/// of `x - t`, wrapped into `[0, 1)`.
pub struct RainbowWave {
    pub cycles: f32,
}

impl Pattern for RainbowWave {
    fn color_mode(&self) -> ColorMode {
        ColorMode::Hsv
    }

    fn evaluate(&self, input: &PatternInput, palette: Option<&Palette>) -> PatternOutput {
        let hue = (input.x * self.cycles - input.t_scaled).rem_euclid(1.0);
        let pixel = match palette {
            Some(p) => {
                let mut color = p.sample(hue);
                color.v = 1.0;
                Pixel::Hsv(color)
            }
            None => Pixel::Hsv(Hsv { h: hue, s: 1.0, v: 1.0 }),
        };
        PatternOutput {
            pixel,
            next_state: PatternState::ZERO,
        }
    }
}

/// A single lit segment that sweeps the strip, bouncing at the ends.
/// `prev_state.0[0]` carries the segment's current position in `[0, 1)`,
/// `prev_state.0[1]` carries the direction (`1.0` or `-1.0`).
pub struct ColorWipe {
    pub color: Hsv,
    pub width: f32,
    pub speed: f32,
}

impl Pattern for ColorWipe {
    fn color_mode(&self) -> ColorMode {
        ColorMode::Hsv
    }

    fn evaluate(&self, input: &PatternInput, _palette: Option<&Palette>) -> PatternOutput {
        let mut pos = input.prev_state.0[0];
        let mut dir = if input.prev_state.0[1] == 0.0 {
            1.0
        } else {
            input.prev_state.0[1]
        };
        // Only pixel 0 advances the shared position; every other pixel
        // just reads it back from the previous frame's carried state.
        if input.index == 0 {
            pos += dir * self.speed * input.dt;
            if pos > 1.0 {
                pos = 1.0;
                dir = -1.0;
            } else if pos < 0.0 {
                pos = 0.0;
                dir = 1.0;
            }
        }
        let dist = (input.x - pos).abs();
        let lit = dist <= self.width * 0.5;
        let pixel = if lit {
            Pixel::Hsv(self.color)
        } else {
            Pixel::Hsv(Hsv { h: self.color.h, s: self.color.s, v: 0.0 })
        };
        PatternOutput {
            pixel,
            next_state: PatternState([pos, dir, 0.0, 0.0]),
        }
    }
}

/// Randomly lit pixels that decay to black. Each pixel independently
/// rolls a chance per second of re-igniting at full brightness, then
/// decays exponentially. `prev_state.0[0]` carries the current
/// brightness.
pub struct Sparkle {
    pub color: Hsv,
    pub ignite_chance_per_second: f32,
    pub decay_per_second: f32,
    rng: Mutex<rand::rngs::StdRng>,
}

impl Sparkle {
    pub fn new(color: Hsv, ignite_chance_per_second: f32, decay_per_second: f32) -> Sparkle {
        use rand::SeedableRng;
        Sparkle {
            color,
            ignite_chance_per_second,
            decay_per_second,
            rng: Mutex::new(rand::rngs::StdRng::from_entropy()),
        }
    }
}

impl Pattern for Sparkle {
    fn color_mode(&self) -> ColorMode {
        ColorMode::Hsv
    }

    fn evaluate(&self, input: &PatternInput, _palette: Option<&Palette>) -> PatternOutput {
        let mut brightness = input.prev_state.0[0];
        brightness = (brightness - self.decay_per_second * input.dt).max(0.0);

        let ignite_probability = (self.ignite_chance_per_second * input.dt).clamp(0.0, 1.0);
        let roll: f32 = self.rng.lock().unwrap().gen();
        if roll < ignite_probability {
            brightness = 1.0;
        }

        let pixel = Pixel::Hsv(Hsv {
            h: self.color.h,
            s: self.color.s,
            v: brightness,
        });
        PatternOutput {
            pixel,
            next_state: PatternState([brightness, 0.0, 0.0, 0.0]),
        }
    }
}

/// Smooth 1D value noise driving hue over position and time. Not true
/// Perlin noise (no gradient vectors are needed in one dimension with
/// only a brightness/hue output); cosine-interpolated hashed lattice
/// values give the same qualitative look with a fraction of the code.
pub struct Perlin1D {
    pub scale: f32,
    pub speed: f32,
}

impl Perlin1D {
    fn hash(n: i64) -> f32 {
        let mut x = n.wrapping_mul(0x2545F4914F6CDD1D) ^ (n >> 13);
        x ^= x << 7;
        x ^= x >> 17;
        ((x as u64 & 0xFFFFFF) as f32) / (0xFFFFFF as f32)
    }

    fn noise(x: f32) -> f32 {
        let i = x.floor() as i64;
        let f = x - x.floor();
        let a = Self::hash(i);
        let b = Self::hash(i + 1);
        let smooth = f * f * (3.0 - 2.0 * f);
        a + (b - a) * smooth
    }
}

impl Pattern for Perlin1D {
    fn color_mode(&self) -> ColorMode {
        ColorMode::Hsv
    }

    fn evaluate(&self, input: &PatternInput, _palette: Option<&Palette>) -> PatternOutput {
        let sample_point = input.x * self.scale + input.t_scaled * self.speed;
        let hue = Self::noise(sample_point);
        PatternOutput {
            pixel: Pixel::Hsv(Hsv { h: hue, s: 1.0, v: 1.0 }),
            next_state: PatternState::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(index: usize, x: f32, t: f32, dt: f32, prev: PatternState) -> PatternInput {
        PatternInput {
            index,
            pixel_count: 10,
            x,
            y: 0.0,
            z: 0.0,
            t_scaled: t,
            dt,
            prev_state: prev,
        }
    }

    #[test]
    fn solid_ignores_position_and_time() {
        let p = Solid { color: Hsv { h: 0.2, s: 1.0, v: 1.0 } };
        let out_a = p.evaluate(&input(0, 0.0, 0.0, 0.016, PatternState::ZERO), None);
        let out_b = p.evaluate(&input(9, 0.9, 5.0, 0.016, PatternState::ZERO), None);
        assert_eq!(out_a.pixel, out_b.pixel);
    }

    #[test]
    fn rainbow_wave_hue_depends_on_position() {
        let p = RainbowWave { cycles: 1.0 };
        let a = p.evaluate(&input(0, 0.0, 0.0, 0.016, PatternState::ZERO), None);
        let b = p.evaluate(&input(1, 0.5, 0.0, 0.016, PatternState::ZERO), None);
        assert_ne!(a.pixel, b.pixel);
    }

    #[test]
    fn color_wipe_advances_position_only_from_pixel_zero() {
        let p = ColorWipe { color: Hsv { h: 0.0, s: 1.0, v: 1.0 }, width: 0.1, speed: 1.0 };
        let state = PatternState([0.2, 1.0, 0.0, 0.0]);
        let out = p.evaluate(&input(3, 0.2, 0.0, 0.1, state), None);
        // non-zero index must not move the shared position
        assert_eq!(out.next_state.0[0], 0.2);
    }

    #[test]
    fn sparkle_decays_toward_zero_without_ignition() {
        let s = Sparkle::new(Hsv { h: 0.0, s: 0.0, v: 1.0 }, 0.0, 1.0);
        let state = PatternState([1.0, 0.0, 0.0, 0.0]);
        let out = s.evaluate(&input(0, 0.0, 0.0, 0.5, state), None);
        assert!(out.next_state.0[0] < 1.0);
    }

    #[test]
    fn perlin_noise_stays_in_unit_range() {
        let p = Perlin1D { scale: 4.0, speed: 1.0 };
        for i in 0..20 {
            let out = p.evaluate(&input(i, i as f32 / 20.0, 1.3, 0.016, PatternState::ZERO), None);
            if let Pixel::Hsv(hsv) = out.pixel {
                assert!(hsv.h >= 0.0 && hsv.h <= 1.0);
            } else {
                panic!("expected hsv pixel");
            }
        }
    }
}
