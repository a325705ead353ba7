//! Variable-rate frame clock.
//!
//! The scene advances by the real elapsed time of each frame. Long stalls
//! (window drag, breakpoint) are clamped so the moons do not jump.

use std::time::Instant;
use tracing::warn;

/// Largest frame delta handed to the simulation, in seconds.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Frames between two frame-statistics reports.
pub const STATS_INTERVAL: u32 = 120;

/// Frame rate over the last reporting window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub frames: u32,
    pub fps: f32,
}

/// Measures the time between frames.
pub struct FrameClock {
    previous_time: Instant,
    frame_count: u64,
    window_frames: u32,
    window_elapsed: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            frame_count: 0,
            window_frames: 0,
            window_elapsed: 0.0,
        }
    }

    /// Restart timing from now, so time spent before the first frame is not counted.
    pub fn reset(&mut self) {
        self.previous_time = Instant::now();
    }

    /// Measure the elapsed wall time and return the clamped frame delta.
    pub fn tick(&mut self) -> f32 {
        let current_time = Instant::now();
        let frame_time = current_time
            .duration_since(self.previous_time)
            .as_secs_f32();
        self.previous_time = current_time;
        self.accept(frame_time)
    }

    /// Clamp an externally measured frame time and count the frame.
    pub fn accept(&mut self, frame_time: f32) -> f32 {
        let delta = if !(frame_time >= 0.0) {
            0.0
        } else if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            MAX_FRAME_TIME
        } else {
            frame_time
        };

        self.frame_count += 1;
        self.window_frames += 1;
        self.window_elapsed += delta;
        delta
    }

    /// Total frames measured.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Report and restart the statistics window once it holds `interval` frames.
    pub fn take_stats(&mut self, interval: u32) -> Option<FrameStats> {
        if self.window_frames < interval.max(1) {
            return None;
        }
        let stats = FrameStats {
            frames: self.window_frames,
            fps: if self.window_elapsed > 0.0 {
                self.window_frames as f32 / self.window_elapsed
            } else {
                0.0
            },
        };
        self.window_frames = 0;
        self.window_elapsed = 0.0;
        Some(stats)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
