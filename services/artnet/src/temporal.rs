use std::collections::VecDeque;

use ledcontrol_settings::FrameInterpolation;

/// Per-physical-LED ring buffer of recently received `(r,g,b,w)` tuples
/// (spec 3 "Art-Net conditioning state", spec 4.E step 3). Allocated
/// once for `led_count` LEDs and reused across packets; reset whenever
/// the receiver restarts or `frame_interp_size`/LED count changes (spec
/// 9, "allocate once on receiver construction and reuse").
pub struct TemporalFilter {
    rings: Vec<VecDeque<(u8, u8, u8, u8)>>,
    size: usize,
}

impl TemporalFilter {
    pub fn new(led_count: usize, size: usize) -> TemporalFilter {
        let size = size.max(1);
        TemporalFilter {
            rings: (0..led_count).map(|_| VecDeque::with_capacity(size)).collect(),
            size,
        }
    }

    pub fn reset(&mut self) {
        for ring in &mut self.rings {
            ring.clear();
        }
    }

    /// Pushes `tuple` into physical LED `index`'s ring and returns the
    /// conditioned value per `mode` (spec 4.E step 3). Out-of-range
    /// indices are a no-op returning the raw tuple unchanged.
    pub fn push_and_filter(
        &mut self,
        index: usize,
        tuple: (u8, u8, u8, u8),
        mode: FrameInterpolation,
    ) -> (u8, u8, u8, u8) {
        let Some(ring) = self.rings.get_mut(index) else {
            return tuple;
        };
        let previous = ring.back().copied();
        if ring.len() == self.size {
            ring.pop_front();
        }
        ring.push_back(tuple);

        match mode {
            FrameInterpolation::None => tuple,
            FrameInterpolation::Average => {
                let n = ring.len() as u32;
                let (mut r, mut g, mut b, mut w) = (0u32, 0u32, 0u32, 0u32);
                for &(tr, tg, tb, tw) in ring.iter() {
                    r += tr as u32;
                    g += tg as u32;
                    b += tb as u32;
                    w += tw as u32;
                }
                ((r / n) as u8, (g / n) as u8, (b / n) as u8, (w / n) as u8)
            }
            FrameInterpolation::Lerp => {
                let Some((pr, pg, pb, pw)) = previous else {
                    return tuple;
                };
                let alpha = 1.0 / self.size as f32;
                lerp_channel(pr, tuple.0, alpha, pg, tuple.1, pb, tuple.2, pw, tuple.3)
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn lerp_channel(
    pr: u8,
    r: u8,
    alpha: f32,
    pg: u8,
    g: u8,
    pb: u8,
    b: u8,
    pw: u8,
    w: u8,
) -> (u8, u8, u8, u8) {
    let step = |prev: u8, next: u8| (prev as f32 + alpha * (next as f32 - prev as f32)) as u8;
    (step(pr, r), step(pg, g), step(pb, b), step(pw, w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_mode_passes_tuple_through() {
        let mut filter = TemporalFilter::new(1, 3);
        assert_eq!(
            filter.push_and_filter(0, (10, 20, 30, 40), FrameInterpolation::None),
            (10, 20, 30, 40)
        );
    }

    #[test]
    fn average_mode_is_channelwise_mean() {
        let mut filter = TemporalFilter::new(1, 2);
        filter.push_and_filter(0, (10, 10, 10, 10), FrameInterpolation::Average);
        let out = filter.push_and_filter(0, (20, 20, 20, 20), FrameInterpolation::Average);
        assert_eq!(out, (15, 15, 15, 15));
    }

    #[test]
    fn average_is_linear_under_addition() {
        let mut a = TemporalFilter::new(1, 3);
        let mut b = TemporalFilter::new(1, 3);
        let mut sum = TemporalFilter::new(1, 3);

        let seq_a = [(10u8, 0, 0, 0), (20, 0, 0, 0), (30, 0, 0, 0)];
        let seq_b = [(5u8, 0, 0, 0), (15, 0, 0, 0), (25, 0, 0, 0)];

        let mut last_a = (0, 0, 0, 0);
        let mut last_b = (0, 0, 0, 0);
        let mut last_sum = (0, 0, 0, 0);
        for i in 0..3 {
            last_a = a.push_and_filter(0, seq_a[i], FrameInterpolation::Average);
            last_b = b.push_and_filter(0, seq_b[i], FrameInterpolation::Average);
            let combined = (seq_a[i].0 + seq_b[i].0, 0, 0, 0);
            last_sum = sum.push_and_filter(0, combined, FrameInterpolation::Average);
        }
        // modulo integer-division rounding, filter(A+B) == filter(A)+filter(B)
        assert!((last_sum.0 as i16 - (last_a.0 as i16 + last_b.0 as i16)).abs() <= 1);
    }

    #[test]
    fn reset_clears_history() {
        let mut filter = TemporalFilter::new(1, 2);
        filter.push_and_filter(0, (255, 255, 255, 255), FrameInterpolation::Average);
        filter.reset();
        let out = filter.push_and_filter(0, (0, 0, 0, 0), FrameInterpolation::Average);
        assert_eq!(out, (0, 0, 0, 0));
    }

    #[test]
    fn out_of_range_index_returns_tuple_unchanged() {
        let mut filter = TemporalFilter::new(1, 2);
        assert_eq!(
            filter.push_and_filter(5, (1, 2, 3, 4), FrameInterpolation::Average),
            (1, 2, 3, 4)
        );
    }
}
