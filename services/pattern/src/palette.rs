use ledcontrol_color::Hsv;

const TABLE_SIZE: usize = 256;

/// An ordered sequence of HSV color stops, precomputed into a 256-entry
/// lookup table with linear interpolation in hue/value space (spec 3
/// "Palette", spec 9 "Palette lookup"). The table is rebuilt whenever the
/// stops change; sampling is then a single array index, so there is no
/// allocation on the render path.
pub struct Palette {
    stops: Vec<(f32, Hsv)>,
    table: [Hsv; TABLE_SIZE],
}

impl Palette {
    /// `stops` are `(position, color)` pairs; position is wrapped into
    /// `[0, 1)` and stops are sorted by position before the table is
    /// built. At least one stop is required; an empty list builds an
    /// all-black table.
    pub fn new(stops: Vec<(f32, Hsv)>) -> Palette {
        let mut palette = Palette {
            stops,
            table: [Hsv::default(); TABLE_SIZE],
        };
        palette.rebuild();
        palette
    }

    pub fn set_stops(&mut self, stops: Vec<(f32, Hsv)>) {
        self.stops = stops;
        self.rebuild();
    }

    pub fn stops(&self) -> &[(f32, Hsv)] {
        &self.stops
    }

    pub fn rebuild(&mut self) {
        if self.stops.is_empty() {
            self.table = [Hsv::default(); TABLE_SIZE];
            return;
        }
        let mut stops: Vec<(f32, Hsv)> = self
            .stops
            .iter()
            .map(|(pos, hsv)| (pos.rem_euclid(1.0), *hsv))
            .collect();
        stops.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        for (i, slot) in self.table.iter_mut().enumerate() {
            let t = i as f32 / TABLE_SIZE as f32;
            *slot = Self::interpolate(&stops, t);
        }
    }

    /// Sample the precomputed table at `position` (wrapped into `[0,
    /// 1)`). O(1), no allocation.
    pub fn sample(&self, position: f32) -> Hsv {
        let t = position.rem_euclid(1.0);
        let idx = ((t * TABLE_SIZE as f32) as usize).min(TABLE_SIZE - 1);
        self.table[idx]
    }

    fn interpolate(stops: &[(f32, Hsv)], t: f32) -> Hsv {
        if stops.len() == 1 {
            return stops[0].1;
        }
        // Find the bracketing pair, wrapping past the last stop back to
        // the first (palettes are circular).
        for window in stops.windows(2) {
            let (pos_a, hsv_a) = window[0];
            let (pos_b, hsv_b) = window[1];
            if t >= pos_a && t <= pos_b {
                let span = pos_b - pos_a;
                let local_t = if span > 0.0 { (t - pos_a) / span } else { 0.0 };
                return lerp_hsv(hsv_a, hsv_b, local_t);
            }
        }
        // Wrap segment: last stop -> first stop (+1.0).
        let (pos_last, hsv_last) = *stops.last().unwrap();
        let (pos_first, hsv_first) = stops[0];
        let span = (pos_first + 1.0) - pos_last;
        let local_t = if span > 0.0 {
            (t - pos_last) / span
        } else {
            0.0
        };
        lerp_hsv(hsv_last, hsv_first, local_t.clamp(0.0, 1.0))
    }
}

fn lerp_hsv(a: Hsv, b: Hsv, t: f32) -> Hsv {
    // Hue interpolates along the shortest arc around the wheel.
    let mut dh = b.h - a.h;
    if dh > 0.5 {
        dh -= 1.0;
    } else if dh < -0.5 {
        dh += 1.0;
    }
    Hsv {
        h: (a.h + dh * t).rem_euclid(1.0),
        s: a.s + (b.s - a.s) * t,
        v: a.v + (b.v - a.v) * t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stop_is_constant() {
        let hsv = Hsv { h: 0.3, s: 1.0, v: 1.0 };
        let palette = Palette::new(vec![(0.0, hsv)]);
        assert_eq!(palette.sample(0.0), hsv);
        assert_eq!(palette.sample(0.5), hsv);
    }

    #[test]
    fn interpolates_value_between_stops() {
        let black = Hsv { h: 0.0, s: 0.0, v: 0.0 };
        let white = Hsv { h: 0.0, s: 0.0, v: 1.0 };
        let palette = Palette::new(vec![(0.0, black), (0.5, white)]);
        let mid = palette.sample(0.25);
        assert!(mid.v > 0.3 && mid.v < 0.7);
    }

    #[test]
    fn wraps_from_last_stop_to_first() {
        let red = Hsv { h: 0.0, s: 1.0, v: 1.0 };
        let blue = Hsv { h: 0.66, s: 1.0, v: 1.0 };
        let palette = Palette::new(vec![(0.0, red), (0.5, blue)]);
        // Past 0.5 it should interpolate back toward red by t=1.0/0.0.
        let near_wrap = palette.sample(0.99);
        assert!(near_wrap.h < blue.h || near_wrap.h > 0.9);
    }

    #[test]
    fn rebuild_after_set_stops_changes_sample() {
        let mut palette = Palette::new(vec![(0.0, Hsv { h: 0.0, s: 1.0, v: 1.0 })]);
        palette.set_stops(vec![(0.0, Hsv { h: 0.5, s: 1.0, v: 1.0 })]);
        assert_eq!(palette.sample(0.0).h, 0.5);
    }
}
