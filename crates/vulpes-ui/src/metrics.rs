//! Per-frame counters and timings for the canvas.

use std::time::{Duration, Instant};

/// Metrics collected during the most recent frame.
#[derive(Debug, Clone, Default)]
pub struct FrameMetrics {
    /// Frames rendered since the canvas was created.
    pub frame: u64,

    /// Time spent in the recursive update pass
    pub update_time: Duration,

    /// Time spent docking and running layout hooks
    pub layout_time: Duration,

    /// Time spent walking the tree for rendering
    pub render_time: Duration,

    /// Controls visited by the layout pass
    pub controls_laid_out: usize,

    /// Layout hooks that actually ran (the rest were clean)
    pub layout_hooks_run: usize,

    /// Controls whose render hook ran
    pub controls_rendered: usize,

    /// Subtrees skipped because their clip rectangle was empty
    pub controls_culled: usize,

    /// Controls destroyed by the delete flush
    pub controls_destroyed: usize,

    /// Live controls after the flush
    pub total_controls: usize,
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of visited controls that had to rerun their layout hook, 0 to 100.
    pub fn layout_dirty_percentage(&self) -> f32 {
        if self.controls_laid_out == 0 {
            0.0
        } else {
            (self.layout_hooks_run as f32 / self.controls_laid_out as f32) * 100.0
        }
    }

    pub(crate) fn begin_frame(&mut self) {
        *self = FrameMetrics {
            frame: self.frame + 1,
            ..FrameMetrics::default()
        };
    }
}

/// Times a scope and hands the duration back on [`MetricsTimer::stop`].
pub(crate) struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    pub(crate) fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub(crate) fn stop(self) -> Duration {
        self.start.elapsed()
    }
}
