use ledcontrol_color::Pixel;

/// A visualizer collaborator: receives the float pixel buffer after
/// each frame, throttled by the controller to a target rate (spec 4.D
/// step 5). Modeled on the web visualizer's `update_pixels` hook in the
/// original driver, minus the WebSocket transport itself, which is
/// outside this core's scope.
pub trait FrameSink: Send + Sync {
    fn push_frame(&self, pixels: &[Pixel]);
}

/// The default sink: discards every frame. Selected when no visualizer
/// collaborator is attached.
pub struct NullSink;

impl FrameSink for NullSink {
    fn push_frame(&self, _pixels: &[Pixel]) {}
}

/// Wraps a [`FrameSink`] so it only actually forwards frames at
/// `target_fps` (default 30Hz per spec 4.D step 5), matching the
/// original's `frame_interval` throttle. Implements [`FrameSink`] itself
/// so it can be handed straight to
/// [`AnimationController::with_sink`](crate::AnimationController::with_sink)
/// in place of the sink it wraps.
pub struct ThrottledSink<S: FrameSink> {
    inner: S,
    frame_interval: std::time::Duration,
    last_push_at: std::sync::Mutex<std::time::Instant>,
}

impl<S: FrameSink> ThrottledSink<S> {
    pub fn new(inner: S, target_fps: f64) -> ThrottledSink<S> {
        let frame_interval = if target_fps > 0.0 {
            std::time::Duration::from_secs_f64(1.0 / target_fps)
        } else {
            std::time::Duration::ZERO
        };
        ThrottledSink {
            inner,
            frame_interval,
            last_push_at: std::sync::Mutex::new(
                std::time::Instant::now() - frame_interval,
            ),
        }
    }
}

impl<S: FrameSink> FrameSink for ThrottledSink<S> {
    fn push_frame(&self, pixels: &[Pixel]) {
        let now = std::time::Instant::now();
        let mut last = self.last_push_at.lock().unwrap();
        if now.duration_since(*last) < self.frame_interval {
            return;
        }
        *last = now;
        self.inner.push_frame(pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink(AtomicUsize);
    impl FrameSink for CountingSink {
        fn push_frame(&self, _pixels: &[Pixel]) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn throttle_drops_frames_within_interval() {
        let sink = ThrottledSink::new(CountingSink(AtomicUsize::new(0)), 30.0);
        sink.push_frame(&[]);
        sink.push_frame(&[]);
        assert_eq!(sink.inner.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn throttle_admits_frame_after_interval_elapses() {
        let sink = ThrottledSink::new(CountingSink(AtomicUsize::new(0)), 1000.0);
        sink.push_frame(&[]);
        std::thread::sleep(std::time::Duration::from_millis(5));
        sink.push_frame(&[]);
        assert_eq!(sink.inner.0.load(Ordering::SeqCst), 2);
    }
}
