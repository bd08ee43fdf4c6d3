use std::collections::VecDeque;

const WINDOW: usize = 60;

/// Achieved frame rate over a moving window of recent frame durations
/// (spec 4.D step 4, `get_frame_rate()`).
#[derive(Default)]
pub struct FpsCounter {
    samples: VecDeque<f64>,
}

impl FpsCounter {
    pub fn new() -> FpsCounter {
        FpsCounter { samples: VecDeque::with_capacity(WINDOW) }
    }

    pub fn record_frame(&mut self, dt: f64) {
        if self.samples.len() == WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
    }

    /// `0.0` until at least one frame has been recorded.
    pub fn fps(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self.samples.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f64 / total
    }
}
