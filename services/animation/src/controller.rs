use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ledcontrol_color::{blackbody_to_rgb, ConversionParams, Pixel, Rgb};
use ledcontrol_pattern::{PaletteRegistry, PatternInput, PatternRegistry, PatternState, PixelMapping};
use ledcontrol_settings::Settings;
use ledcontrol_strip::Strip;

use crate::clock::AnimationClock;
use crate::error_sink::{ErrorSink, NullErrorSink};
use crate::fps::FpsCounter;
use crate::shared_settings::SharedSettings;
use crate::sink::{FrameSink, NullSink};

/// Runs the per-frame loop described in spec 4.D: evaluate every group's
/// pattern for its pixel range, composite globals, hand the result to
/// the strip, and commit once per frame. Owns the animation thread's
/// lifecycle but not the strip itself — the strip is shared with the
/// Art-Net receiver and the frame arbiter enforces that only one of
/// them writes to it at a time.
pub struct AnimationController {
    strip: Arc<Mutex<Strip>>,
    settings: Arc<SharedSettings>,
    patterns: Arc<PatternRegistry>,
    palettes: Arc<PaletteRegistry>,
    clock: Arc<AnimationClock>,
    mapping: PixelMapping,
    state: Mutex<Vec<PatternState>>,
    fps: Arc<Mutex<FpsCounter>>,
    sink: Arc<dyn FrameSink>,
    error_sink: Arc<dyn ErrorSink>,
    refresh_rate: f64,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl AnimationController {
    pub fn new(
        strip: Arc<Mutex<Strip>>,
        settings: Arc<SharedSettings>,
        patterns: Arc<PatternRegistry>,
        palettes: Arc<PaletteRegistry>,
        clock: Arc<AnimationClock>,
        refresh_rate: f64,
    ) -> AnimationController {
        let pixel_count = strip.lock().unwrap().len();
        AnimationController {
            strip,
            settings,
            patterns,
            palettes,
            clock,
            mapping: PixelMapping::default_linear(pixel_count),
            state: Mutex::new(vec![PatternState::ZERO; pixel_count]),
            fps: Arc::new(Mutex::new(FpsCounter::new())),
            sink: Arc::new(NullSink),
            error_sink: Arc::new(NullErrorSink),
            refresh_rate,
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn FrameSink>) -> AnimationController {
        self.sink = sink;
        self
    }

    pub fn with_error_sink(mut self, error_sink: Arc<dyn ErrorSink>) -> AnimationController {
        self.error_sink = error_sink;
        self
    }

    /// Starts the animation thread at `refresh_rate` Hz. A second call
    /// while already running is a no-op, matching the arbiter's
    /// idempotence requirement for repeated enable/disable cycles.
    pub fn begin(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            return;
        }
        let strip = Arc::clone(&self.strip);
        let settings = Arc::clone(&self.settings);
        let patterns = Arc::clone(&self.patterns);
        let palettes = Arc::clone(&self.palettes);
        let clock = Arc::clone(&self.clock);
        let sink = Arc::clone(&self.sink);
        let error_sink = Arc::clone(&self.error_sink);
        let running = Arc::clone(&self.running);
        let fps = Arc::clone(&self.fps);
        let mapping = self.mapping.clone();
        let pixel_count = mapping.len();
        let state = Mutex::new(
            self.state
                .lock()
                .unwrap()
                .iter()
                .copied()
                .collect::<Vec<_>>(),
        );
        let refresh_rate = self.refresh_rate;

        let handle = thread::spawn(move || {
            run_loop(
                &strip,
                &settings,
                &patterns,
                &palettes,
                &clock,
                &mapping,
                pixel_count,
                &state,
                &sink,
                &error_sink,
                &running,
                &fps,
                refresh_rate,
            );
        });
        *self.handle.lock().unwrap() = Some(handle);
        log::info!("animation thread started at {refresh_rate:.1} Hz");
    }

    /// Stops the animation thread and blocks until it exits.
    pub fn end(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.handle.lock().unwrap().take() {
            if handle.join().is_err() {
                log::warn!("animation thread panicked while stopping");
            }
        }
        log::info!("animation thread stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn set_animation_time(&self, t: f64) {
        self.clock.set(t);
    }

    pub fn get_animation_time(&self) -> f64 {
        self.clock.get()
    }

    pub fn reset_timer(&self) {
        self.clock.request_reset();
    }

    /// Zeroes the strip and commits, independent of whether the
    /// animation thread is currently running. Used by the frame arbiter
    /// at transition boundaries (spec 4.F).
    pub fn clear_leds(&self) {
        let mut strip = self.strip.lock().unwrap();
        strip.clear();
        if let Err(err) = strip.commit() {
            log::error!("clear_leds commit failed: {err}");
            self.error_sink.report(&format!("clear_leds commit failed: {err}"));
        }
    }

    /// Achieved FPS over the most recent moving window (spec 4.D step 4).
    pub fn get_frame_rate(&self) -> f64 {
        self.fps.lock().unwrap().fps()
    }
}

#[allow(clippy::too_many_arguments)]
fn run_loop(
    strip: &Arc<Mutex<Strip>>,
    settings: &Arc<SharedSettings>,
    patterns: &Arc<PatternRegistry>,
    palettes: &Arc<PaletteRegistry>,
    clock: &Arc<AnimationClock>,
    mapping: &PixelMapping,
    pixel_count: usize,
    state: &Mutex<Vec<PatternState>>,
    sink: &Arc<dyn FrameSink>,
    error_sink: &Arc<dyn ErrorSink>,
    running: &Arc<AtomicBool>,
    fps: &Arc<Mutex<FpsCounter>>,
    refresh_rate: f64,
) {
    let period = if refresh_rate > 0.0 { 1.0 / refresh_rate } else { 0.0 };
    let start = Instant::now();
    let mut frame_index: u64 = 0;
    let mut last_frame = Instant::now();

    while running.load(Ordering::Acquire) {
        let reset = clock.take_reset();
        let now = Instant::now();
        let wall_dt = if reset {
            0.0
        } else {
            (now - last_frame).as_secs_f64()
        };
        last_frame = now;
        clock.advance(wall_dt);
        fps.lock().unwrap().record_frame(wall_dt.max(1e-9));

        let snapshot = settings.snapshot();
        let mut pattern_state = state.lock().unwrap();
        let mut frame_pixels = vec![Pixel::Rgb(Rgb::default()); pixel_count];

        {
            let mut guard = strip.lock().unwrap();
            if !snapshot.on {
                guard.clear();
            } else {
                for group in &snapshot.groups {
                    let range = group.clamped_range(pixel_count);
                    if range.is_empty() {
                        continue;
                    }
                    let pattern = patterns.get(group.pattern_id);
                    let palette = palettes.get(group.palette_id);
                    let mut pixels = Vec::with_capacity(range.len());
                    for index in range.clone() {
                        let (x, y, z) = mapping.get(index);
                        let input = PatternInput {
                            index,
                            pixel_count,
                            x,
                            y,
                            z,
                            t_scaled: (clock.get() as f32) * group.speed,
                            dt: wall_dt as f32,
                            prev_state: pattern_state[index],
                        };
                        let pixel = match pattern {
                            Some(p) => {
                                match panic::catch_unwind(AssertUnwindSafe(|| p.evaluate(&input, palette))) {
                                    Ok(output) => {
                                        pattern_state[index] = output.next_state;
                                        output.pixel
                                    }
                                    Err(_) => {
                                        error_sink.report(&format!(
                                            "pattern {} panicked evaluating pixel {index}; falling back to black",
                                            group.pattern_id
                                        ));
                                        Pixel::Rgb(Rgb::default())
                                    }
                                }
                            }
                            None => {
                                error_sink.report(&format!(
                                    "group references unknown pattern id {}; pixel {index} falls back to black",
                                    group.pattern_id
                                ));
                                Pixel::Rgb(Rgb::default())
                            }
                        };
                        frame_pixels[index] = pixel;
                        pixels.push(pixel);
                    }

                    let has_white = guard.has_white() && snapshot.use_white_channel;
                    let white_tint = blackbody_to_rgb(snapshot.white_led_temperature).normalized();
                    let params = ConversionParams {
                        saturation: (group.saturation * snapshot.global_saturation).clamp(0.0, 1.0),
                        brightness: (group.brightness * snapshot.global_brightness).clamp(0.0, 1.0),
                        color_temp_kelvin: group.color_temp_kelvin,
                        correction: snapshot.global_correction,
                        rgbw_algorithm: snapshot.rgbw_algorithm,
                        has_white,
                        white_tint,
                    };
                    guard.set_range(range.start, &pixels, &params);
                }
            }
            if let Err(err) = guard.commit() {
                log::error!("animation frame commit failed: {err}");
                error_sink.report(&format!("fatal: strip commit failed: {err}"));
                running.store(false, Ordering::Release);
            }
        }
        drop(pattern_state);

        sink.push_frame(&frame_pixels);

        frame_index += 1;
        if period > 0.0 {
            let deadline = start + Duration::from_secs_f64(period * frame_index as f64);
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledcontrol_settings::Group;
    use ledcontrol_strip::{ChannelOrder, NullTransport};
    use std::sync::atomic::AtomicUsize;

    fn test_strip(n: usize) -> Arc<Mutex<Strip>> {
        let transport = NullTransport::new(n, 3);
        Arc::new(Mutex::new(Strip::new(n, ChannelOrder::Rgb, Box::new(transport))))
    }

    fn registry_with_solid() -> Arc<PatternRegistry> {
        use ledcontrol_color::Hsv;
        use ledcontrol_pattern::Solid;
        let mut reg = PatternRegistry::new();
        reg.register(0, Box::new(Solid { color: Hsv { h: 0.0, s: 1.0, v: 1.0 } }));
        Arc::new(reg)
    }

    #[test]
    fn clear_leds_zeroes_wire_buffer_even_when_not_running() {
        let strip = test_strip(4);
        let controller = AnimationController::new(
            strip,
            Arc::new(SharedSettings::new(Settings::default())),
            registry_with_solid(),
            Arc::new(PaletteRegistry::new()),
            Arc::new(AnimationClock::new()),
            60.0,
        );
        controller.clear_leds();
        assert!(!controller.is_running());
    }

    #[test]
    fn begin_is_idempotent_when_already_running() {
        let strip = test_strip(4);
        let controller = AnimationController::new(
            strip,
            Arc::new(SharedSettings::new(Settings::default())),
            registry_with_solid(),
            Arc::new(PaletteRegistry::new()),
            Arc::new(AnimationClock::new()),
            200.0,
        );
        controller.begin();
        thread::sleep(Duration::from_millis(20));
        controller.begin();
        assert!(controller.is_running());
        controller.end();
        assert!(!controller.is_running());
    }

    #[test]
    fn animation_loop_renders_group_through_strip() {
        let n = 4;
        let strip = test_strip(n);
        let mut settings = Settings::default();
        settings.groups.push(Group { start: 0, end: n, pattern_id: 0, ..Group::default() });
        let controller = AnimationController::new(
            Arc::clone(&strip),
            Arc::new(SharedSettings::new(settings)),
            registry_with_solid(),
            Arc::new(PaletteRegistry::new()),
            Arc::new(AnimationClock::new()),
            200.0,
        );
        controller.begin();
        thread::sleep(Duration::from_millis(30));
        controller.end();
        let bytes = strip.lock().unwrap().wire_bytes().to_vec();
        // Solid red at full HSV value should render roughly full red.
        assert!(bytes.iter().step_by(3).all(|&r| r > 200));
    }

    #[test]
    fn unknown_pattern_id_falls_back_to_black_and_reports_error() {
        struct CountingErrorSink(AtomicUsize);
        impl ErrorSink for CountingErrorSink {
            fn report(&self, _message: &str) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let n = 2;
        let strip = test_strip(n);
        let mut settings = Settings::default();
        settings.groups.push(Group { start: 0, end: n, pattern_id: 99, ..Group::default() });
        let error_sink = Arc::new(CountingErrorSink(AtomicUsize::new(0)));
        let controller = AnimationController::new(
            Arc::clone(&strip),
            Arc::new(SharedSettings::new(settings)),
            Arc::new(PatternRegistry::new()),
            Arc::new(PaletteRegistry::new()),
            Arc::new(AnimationClock::new()),
            200.0,
        )
        .with_error_sink(error_sink.clone());
        controller.begin();
        thread::sleep(Duration::from_millis(20));
        controller.end();
        assert!(error_sink.0.load(Ordering::SeqCst) > 0);
        assert!(strip.lock().unwrap().wire_bytes().iter().all(|&b| b == 0));
    }
}
