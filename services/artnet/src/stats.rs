use std::time::{Duration, Instant};

/// Received/dropped/malformed packet counters plus the packet-interval
/// histogram spec 4.E calls "Operational metrics", reported at
/// `report_interval` (spec.md default 10s). Modeled on
/// `artnet_server.py`'s `_debug_interval_report`/`_fps_report_interval`.
pub struct ArtnetStats {
    received: u64,
    dropped: u64,
    malformed: u64,
    last_packet_at: Option<Instant>,
    intervals: Vec<Duration>,
    last_report_at: Instant,
    report_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalSummary {
    pub count: usize,
    pub avg: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl ArtnetStats {
    pub fn new(report_interval: Duration) -> ArtnetStats {
        ArtnetStats {
            received: 0,
            dropped: 0,
            malformed: 0,
            last_packet_at: None,
            intervals: Vec::new(),
            last_report_at: Instant::now(),
            report_interval,
        }
    }

    pub fn record_received(&mut self) {
        self.received += 1;
        let now = Instant::now();
        if let Some(last) = self.last_packet_at {
            self.intervals.push(now - last);
        }
        self.last_packet_at = Some(now);
    }

    pub fn record_dropped(&mut self) {
        self.dropped += 1;
    }

    pub fn record_malformed(&mut self) {
        self.malformed += 1;
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn malformed(&self) -> u64 {
        self.malformed
    }

    /// Drains the interval histogram for this reporting period if
    /// `report_interval` has elapsed since the last report, returning
    /// `None` otherwise.
    pub fn maybe_drain_summary(&mut self) -> Option<IntervalSummary> {
        let now = Instant::now();
        if now - self.last_report_at < self.report_interval {
            return None;
        }
        self.last_report_at = now;
        if self.intervals.is_empty() {
            return None;
        }
        let count = self.intervals.len();
        let total: Duration = self.intervals.iter().sum();
        let avg = total / count as u32;
        let min = *self.intervals.iter().min().unwrap();
        let max = *self.intervals.iter().max().unwrap();
        self.intervals.clear();
        Some(IntervalSummary { count, avg, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn counters_track_each_kind_independently() {
        let mut stats = ArtnetStats::new(Duration::from_secs(10));
        stats.record_received();
        stats.record_received();
        stats.record_dropped();
        stats.record_malformed();
        assert_eq!(stats.received(), 2);
        assert_eq!(stats.dropped(), 1);
        assert_eq!(stats.malformed(), 1);
    }

    #[test]
    fn summary_is_none_before_report_interval_elapses() {
        let mut stats = ArtnetStats::new(Duration::from_secs(60));
        stats.record_received();
        stats.record_received();
        assert!(stats.maybe_drain_summary().is_none());
    }

    #[test]
    fn summary_reports_and_clears_after_interval() {
        let mut stats = ArtnetStats::new(Duration::from_millis(5));
        stats.record_received();
        thread::sleep(Duration::from_millis(2));
        stats.record_received();
        thread::sleep(Duration::from_millis(10));
        let summary = stats.maybe_drain_summary().expect("interval elapsed");
        assert_eq!(summary.count, 1);
        assert!(stats.maybe_drain_summary().is_none());
    }
}
