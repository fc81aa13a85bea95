//! Window-less presenter for batch renders.

use std::time::{Duration, Instant};

use glint_renderer::Presenter;
use log::info;

/// Stops a session after a number of passes or a time budget, logging
/// progress every few seconds.
pub struct HeadlessDisplay {
    max_passes: u64,
    deadline: Option<Instant>,
    frames: u64,
    last_report: Instant,
}

impl HeadlessDisplay {
    const REPORT_INTERVAL: Duration = Duration::from_secs(2);

    pub fn new(max_passes: u64, budget: Option<Duration>) -> Self {
        let now = Instant::now();
        Self {
            max_passes,
            deadline: budget.map(|budget| now + budget),
            frames: 0,
            last_report: now,
        }
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Presenter for HeadlessDisplay {
    fn should_stop(&self) -> bool {
        self.frames >= self.max_passes
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn present(&mut self, _rgba: &[u8], width: u32, height: u32) {
        self.frames += 1;
        if self.last_report.elapsed() >= Self::REPORT_INTERVAL {
            info!(
                "{}/{} passes presented ({}x{})",
                self.frames, self.max_passes, width, height
            );
            self.last_report = Instant::now();
        }
    }
}
