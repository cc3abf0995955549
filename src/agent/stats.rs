//! Throughput statistics for agent runs.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Counters collected over an agent run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Episodes finished (terminal or cut short by the frame budget).
    pub episodes: u64,

    /// Controller steps taken.
    pub steps: u64,

    /// Frames stepped, frame-skip sub-frames included. Start procedures excluded.
    pub frames: u64,

    /// Wall-clock time spent in the loop (microseconds).
    pub time_us: u64,
}

impl RunStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Frames per second of wall-clock time.
    #[must_use]
    pub fn frames_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.frames as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average frames per finished episode.
    #[must_use]
    pub fn avg_episode_frames(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.frames as f64 / self.episodes as f64
        }
    }
}

/// Reports frames per second once every `interval` frames.
#[derive(Clone, Debug)]
pub struct ThroughputMeter {
    interval: u64,
    next_report: u64,
    window_start: Instant,
    window_frames: u64,
}

impl ThroughputMeter {
    /// `interval` of zero disables reporting.
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            next_report: interval,
            window_start: Instant::now(),
            window_frames: 0,
        }
    }

    /// Record that the run has reached `frames` frames.
    ///
    /// Returns the rate over the window just closed when a boundary is crossed.
    pub fn tick(&mut self, frames: u64) -> Option<f64> {
        if self.interval == 0 || frames < self.next_report {
            return None;
        }

        let elapsed = self.window_start.elapsed().as_secs_f64();
        let window = frames - self.window_frames;
        self.window_start = Instant::now();
        self.window_frames = frames;
        while self.next_report <= frames {
            self.next_report += self.interval;
        }

        Some(if elapsed > 0.0 { window as f64 / elapsed } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = RunStats::new();
        assert_eq!(stats.frames, 0);
        assert_eq!(stats.frames_per_second(), 0.0);
        assert_eq!(stats.avg_episode_frames(), 0.0);
    }

    #[test]
    fn test_frames_per_second() {
        let mut stats = RunStats::new();
        stats.frames = 6000;
        stats.time_us = 2_000_000;
        assert_eq!(stats.frames_per_second(), 3000.0);

        stats.episodes = 3;
        assert_eq!(stats.avg_episode_frames(), 2000.0);

        stats.reset();
        assert_eq!(stats, RunStats::default());
    }

    #[test]
    fn test_meter_reports_on_boundaries() {
        let mut meter = ThroughputMeter::new(1000);
        assert!(meter.tick(999).is_none());
        assert!(meter.tick(1000).is_some());
        assert!(meter.tick(1500).is_none());
        // A big jump crosses one boundary report, not several.
        assert!(meter.tick(3200).is_some());
        assert!(meter.tick(3999).is_none());
        assert!(meter.tick(4000).is_some());
    }

    #[test]
    fn test_meter_disabled() {
        let mut meter = ThroughputMeter::new(0);
        assert!(meter.tick(1_000_000).is_none());
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = RunStats::new();
        stats.frames = 42;

        let json = serde_json::to_string(&stats).unwrap();
        let back: RunStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.frames, 42);
    }
}
