//! Rolling frame statistics for the debug log.

use std::time::{Duration, Instant};

/// How often a [`FrameReport`] is produced.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Aggregates over one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frames: u32,
    pub fps: f32,
    pub mean_points: usize,
}

/// Counts frames and emitted points until the interval elapses.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval_start: Instant,
    frames: u32,
    points: usize,
}

impl FrameStats {
    pub fn new(start: Instant) -> Self {
        Self {
            interval_start: start,
            frames: 0,
            points: 0,
        }
    }

    /// Records a frame that emitted `points` points.
    ///
    /// Returns a report and starts a new interval once [`REPORT_INTERVAL`]
    /// has passed since the current one began.
    pub fn record(&mut self, now: Instant, points: usize) -> Option<FrameReport> {
        self.frames += 1;
        self.points += points;

        let elapsed = now.saturating_duration_since(self.interval_start);
        if elapsed < REPORT_INTERVAL {
            return None;
        }

        let report = FrameReport {
            frames: self.frames,
            fps: self.frames as f32 / elapsed.as_secs_f32(),
            mean_points: self.points / self.frames as usize,
        };
        *self = Self::new(now);
        Some(report)
    }
}
