use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ledcontrol_settings::{ArtnetSettings, SpatialSmoothing};
use ledcontrol_strip::Strip;

use crate::packet::{parse_art_dmx, ArtDmxRejection, ARTNET_PORT};
use crate::spatial::convolve;
use crate::stats::ArtnetStats;
use crate::temporal::TemporalFilter;

const RECV_BUFFER_SIZE: usize = 2048;
/// How often the blocking receive wakes up to check the running flag,
/// bounding shutdown latency (spec 5: join timeout 1-2s).
const POLL_TIMEOUT: Duration = Duration::from_millis(200);

/// The ArtDMX receiver thread (component E): binds UDP 6454, parses
/// ArtDMX packets for the configured universe, applies temporal and
/// spatial conditioning, and commits the result directly to the strip.
pub struct ArtnetReceiver {
    strip: Arc<Mutex<Strip>>,
    settings: ArtnetSettings,
    channels_per_led: usize,
    led_count: usize,
    running: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
    metrics_interval: Duration,
}

impl ArtnetReceiver {
    pub fn new(strip: Arc<Mutex<Strip>>, settings: ArtnetSettings, metrics_interval: Duration) -> ArtnetReceiver {
        let (led_count, channels_per_led) = {
            let guard = strip.lock().unwrap();
            (guard.len(), guard.channel_order().channels_per_led())
        };
        ArtnetReceiver {
            strip,
            settings,
            channels_per_led,
            led_count,
            running: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
            metrics_interval,
        }
    }

    pub fn settings(&self) -> &ArtnetSettings {
        &self.settings
    }

    /// Starts the receiver thread. Binding failures (e.g. the port is
    /// already in use) are logged and leave the receiver not running;
    /// the arbiter treats this the same as a receiver that exited on
    /// its own (spec 4.E, "Socket errors cause the receiver thread to
    /// exit cleanly; restart is the arbiter's responsibility").
    pub fn begin(&self) -> bool {
        if self.running.swap(true, Ordering::AcqRel) {
            return true;
        }
        let socket = match UdpSocket::bind(("0.0.0.0", ARTNET_PORT)) {
            Ok(socket) => socket,
            Err(err) => {
                log::error!("artnet receiver failed to bind port {ARTNET_PORT}: {err}");
                self.running.store(false, Ordering::Release);
                return false;
            }
        };
        if let Err(err) = socket.set_read_timeout(Some(POLL_TIMEOUT)) {
            log::warn!("artnet receiver failed to set read timeout: {err}");
        }

        let strip = Arc::clone(&self.strip);
        let settings = self.settings.clone();
        let channels_per_led = self.channels_per_led;
        let led_count = self.led_count;
        let running = Arc::clone(&self.running);
        let metrics_interval = self.metrics_interval;

        let handle = thread::spawn(move || {
            run_loop(socket, &strip, &settings, channels_per_led, led_count, &running, metrics_interval);
        });
        *self.handle.lock().unwrap() = Some(handle);
        log::info!(
            "artnet receiver started (universe={} offset={} leds={})",
            settings.universe,
            settings.channel_offset,
            led_count
        );
        true
    }

    pub fn end(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(handle) = self.handle.lock().unwrap().take() {
            if handle.join().is_err() {
                log::warn!("artnet receiver thread panicked while stopping");
            }
        }
        log::info!("artnet receiver stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

fn run_loop(
    socket: UdpSocket,
    strip: &Arc<Mutex<Strip>>,
    settings: &ArtnetSettings,
    channels_per_led: usize,
    led_count: usize,
    running: &Arc<AtomicBool>,
    metrics_interval: Duration,
) {
    let mut temporal = TemporalFilter::new(led_count, settings.frame_interp_size);
    let mut stats = ArtnetStats::new(metrics_interval);
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];

    while running.load(Ordering::Acquire) {
        let received = match socket.recv_from(&mut buf) {
            Ok((n, _addr)) => n,
            Err(err) => {
                if err.kind() == std::io::ErrorKind::WouldBlock || err.kind() == std::io::ErrorKind::TimedOut {
                    maybe_report(&mut stats);
                    continue;
                }
                log::info!("artnet receiver socket closed: {err}");
                break;
            }
        };

        let packet = match parse_art_dmx(&buf[..received], settings.universe) {
            Ok(packet) => packet,
            Err(ArtDmxRejection::Malformed) => {
                stats.record_malformed();
                maybe_report(&mut stats);
                continue;
            }
            Err(ArtDmxRejection::NotMatching) => {
                stats.record_dropped();
                maybe_report(&mut stats);
                continue;
            }
        };
        stats.record_received();

        let frame = expand_and_filter(packet.payload, settings, channels_per_led, led_count, &mut temporal);
        if !frame.is_empty() {
            let bytes = flatten(&frame, channels_per_led);
            strip.lock().unwrap().set_bulk_bytes(&bytes, 0);
        }

        maybe_report(&mut stats);
    }
}

fn maybe_report(stats: &mut ArtnetStats) {
    if let Some(summary) = stats.maybe_drain_summary() {
        log::info!(
            "artnet: received={} dropped={} malformed={} interval avg={:?} min={:?} max={:?} (n={})",
            stats.received(),
            stats.dropped(),
            stats.malformed(),
            summary.avg,
            summary.min,
            summary.max,
            summary.count
        );
    }
}

/// Expands DMX pixels by `group_size`, runs each physical LED's tuple
/// through the temporal filter, then convolves the resulting
/// (possibly-shorter-than-`led_count`) frame with the spatial kernel
/// (spec 4.E steps 1-4). Returns only the physical LEDs actually filled
/// by this packet; callers leave the rest of the strip untouched.
fn expand_and_filter(
    payload: &[u8],
    settings: &ArtnetSettings,
    cpl: usize,
    led_count: usize,
    temporal: &mut TemporalFilter,
) -> Vec<(u8, u8, u8, u8)> {
    let group_size = settings.group_size.max(1);
    let offset = settings.channel_offset;
    if payload.len() <= offset {
        return Vec::new();
    }
    let usable = payload.len() - offset;
    let dmx_pixel_count = usable / cpl.max(1);

    let mut expanded = Vec::with_capacity(led_count);
    'outer: for dmx_i in 0..dmx_pixel_count {
        let base = offset + dmx_i * cpl;
        let r = *payload.get(base).unwrap_or(&0);
        let g = *payload.get(base + 1).unwrap_or(&0);
        let b = *payload.get(base + 2).unwrap_or(&0);
        let w = if cpl >= 4 { *payload.get(base + 3).unwrap_or(&0) } else { 0 };

        for _ in 0..group_size {
            if expanded.len() >= led_count {
                break 'outer;
            }
            let filtered = temporal.push_and_filter(expanded.len(), (r, g, b, w), settings.frame_interpolation);
            expanded.push(filtered);
        }
    }

    if settings.spatial_smoothing == SpatialSmoothing::None || settings.spatial_size <= 1 {
        expanded
    } else {
        convolve(&expanded, settings.spatial_smoothing, settings.spatial_size)
    }
}

fn flatten(frame: &[(u8, u8, u8, u8)], cpl: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(frame.len() * cpl);
    for &(r, g, b, w) in frame {
        bytes.push(r);
        bytes.push(g);
        bytes.push(b);
        if cpl >= 4 {
            bytes.push(w);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledcontrol_strip::{ChannelOrder, NullTransport};

    fn strip(n: usize, order: ChannelOrder) -> Arc<Mutex<Strip>> {
        let transport = NullTransport::new(n, order.channels_per_led());
        Arc::new(Mutex::new(Strip::new(n, order, Box::new(transport))))
    }

    fn settings(group_size: usize) -> ArtnetSettings {
        ArtnetSettings {
            group_size,
            ..ArtnetSettings::default()
        }
    }

    #[test]
    fn minimal_packet_maps_three_dmx_pixels_to_three_leds() {
        let payload = [255, 0, 0, 128, 0, 255, 0, 64, 0, 0, 255, 32];
        let mut temporal = TemporalFilter::new(3, 1);
        let frame = expand_and_filter(&payload, &settings(1), 4, 3, &mut temporal);
        assert_eq!(frame, vec![(255, 0, 0, 128), (0, 255, 0, 64), (0, 0, 255, 32)]);
    }

    #[test]
    fn group_size_three_replicates_each_dmx_pixel() {
        let payload = [255, 0, 0, 128, 0, 255, 0, 64, 0, 0, 255, 32];
        let mut temporal = TemporalFilter::new(9, 1);
        let frame = expand_and_filter(&payload, &settings(3), 4, 9, &mut temporal);
        assert_eq!(frame.len(), 9);
        assert!(frame[0..3].iter().all(|&p| p == (255, 0, 0, 128)));
        assert!(frame[3..6].iter().all(|&p| p == (0, 255, 0, 64)));
        assert!(frame[6..9].iter().all(|&p| p == (0, 0, 255, 32)));
    }

    #[test]
    fn expansion_stops_once_led_count_is_filled() {
        let payload = [10, 0, 0, 0, 20, 0, 0, 0, 30, 0, 0, 0];
        let mut temporal = TemporalFilter::new(2, 1);
        let frame = expand_and_filter(&payload, &settings(1), 4, 2, &mut temporal);
        assert_eq!(frame, vec![(10, 0, 0, 0), (20, 0, 0, 0)]);
    }

    #[test]
    fn end_to_end_packet_writes_wire_bytes_via_strip() {
        let led_count = 3;
        let s = strip(led_count, ChannelOrder::Rgbw);
        let payload = [255, 0, 0, 128, 0, 255, 0, 64, 0, 0, 255, 32];
        let mut temporal = TemporalFilter::new(led_count, 1);
        let frame = expand_and_filter(&payload, &settings(1), 4, led_count, &mut temporal);
        let bytes = flatten(&frame, 4);
        s.lock().unwrap().set_bulk_bytes(&bytes, 0);
        assert_eq!(&s.lock().unwrap().wire_bytes()[0..4], &[255, 0, 0, 128]);
    }
}
