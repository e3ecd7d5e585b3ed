//! Two-phase progress estimation.
//!
//! Purely tick-driven: the estimator never reads the clock, so a run is
//! fully determined by the batch size and the number of ticks delivered.
//! While the real classification call is outstanding the curve is linear
//! up to 85% of the estimate, then decays exponentially toward 99%; once
//! the result is in, progress sprints to 100 by fixed steps.

use std::time::Duration;

/// Wall-clock interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// How long the 100% state stays visible before resetting.
pub const DONE_DISPLAY_DELAY: Duration = Duration::from_millis(800);

const BASE_SECONDS: f64 = 8.0;
const PER_ITEM_SECONDS: f64 = 0.35;
const ESTIMATE_BATCH_CAP: usize = 300;
const LINEAR_CUTOFF: f64 = 0.85;
const SPRINT_STEP: f64 = 5.0;

/// Estimator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// The classification call is still outstanding; progress follows the
    /// estimate curve and never reaches 100.
    Estimating,
    /// The result has arrived; progress advances by a fixed step per tick.
    Sprinting,
    Done,
}

/// Deterministic progress state machine.
#[derive(Debug)]
pub struct ProgressEstimator {
    phase: Phase,
    step: u64,
    total_steps: f64,
    progress: f64,
}

impl ProgressEstimator {
    /// Start an estimating run for a batch of the given size.
    pub fn start(batch_size: usize) -> Self {
        let capped = batch_size.min(ESTIMATE_BATCH_CAP);
        let estimated_seconds = BASE_SECONDS + capped as f64 * PER_ITEM_SECONDS;
        let total_steps =
            estimated_seconds * 1000.0 / TICK_INTERVAL.as_millis() as f64;
        Self {
            phase: Phase::Estimating,
            step: 0,
            total_steps,
            progress: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current percent, truncated. Non-decreasing within a run.
    pub fn percent(&self) -> u8 {
        self.progress.min(100.0) as u8
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// The real result has arrived: switch to the sprint segment.
    pub fn mark_ready(&mut self) {
        if self.phase == Phase::Estimating {
            self.phase = Phase::Sprinting;
        }
    }

    /// Abort without completing; progress resets and nothing further
    /// happens until the next [`ProgressEstimator::start`].
    pub fn abort(&mut self) {
        self.phase = Phase::Idle;
        self.progress = 0.0;
    }

    /// Return to idle after the done state has been displayed.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.progress = 0.0;
        self.step = 0;
    }

    /// Advance one tick and return the new percent.
    pub fn tick(&mut self) -> u8 {
        match self.phase {
            Phase::Idle | Phase::Done => {}
            Phase::Estimating => {
                self.step += 1;
                let normalized = self.step as f64 / self.total_steps;
                if normalized < LINEAR_CUTOFF {
                    self.progress = normalized * 85.0;
                } else {
                    // Overrun: crawl toward 99 but never reach 100 while
                    // the real call is pending.
                    let overrun = (self.step as f64 - self.total_steps * LINEAR_CUTOFF)
                        / (self.total_steps * 3.0);
                    self.progress = 85.0 + 14.0 * (1.0 - (-overrun * 5.0).exp());
                }
            }
            Phase::Sprinting => {
                self.progress += SPRINT_STEP;
                if self.progress >= 100.0 {
                    self.progress = 100.0;
                    self.phase = Phase::Done;
                }
            }
        }
        self.percent()
    }
}

/// Human-readable phase label for a progress percentage.
pub fn phase_label(percent: u8) -> &'static str {
    match percent {
        0..=14 => "Scanning bookmark structure and index...",
        15..=39 => "Extracting page semantics...",
        40..=69 => "Drafting a categorization plan...",
        70..=89 => "Refining the category hierarchy...",
        90..=99 => "Composing the final report...",
        _ => "Done!",
    }
}

#[cfg(test)]
#[path = "estimator_tests.rs"]
mod tests;
