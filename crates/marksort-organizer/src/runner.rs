//! The organize run loop.
//!
//! One single-threaded loop consumes two event sources: timer ticks and
//! the single completion of the classification future. The store is
//! mutated in exactly one place, on the estimator's 100% edge, so at most
//! one categorization result is ever applied per invocation.

use std::future::Future;
use std::time::Duration;

use tokio::pin;
use tracing::{error, info};

use marksort_classify::{CategoryMapping, ClassifyError};
use marksort_core::BookmarkStore;

use crate::estimator::{phase_label, ProgressEstimator, DONE_DISPLAY_DELAY, TICK_INTERVAL};

/// Timing knobs, defaulting to the user-facing cadence. Tests shrink them.
#[derive(Debug, Clone)]
pub struct OrganizeOptions {
    pub tick_interval: Duration,
    pub done_display_delay: Duration,
}

impl Default for OrganizeOptions {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            done_display_delay: DONE_DISPLAY_DELAY,
        }
    }
}

/// User-facing events emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeEvent {
    Progress { percent: u8, label: &'static str },
    Completed { applied: usize, unmatched: usize, batch: usize },
    Failed { message: String },
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeOutcome {
    /// The mapping was applied to the store.
    Applied { applied: usize, unmatched: usize },
    /// The classification failed; the store was not touched.
    Failed { message: String },
    /// Nothing to organize.
    EmptyStore,
}

/// Run a categorization with simulated progress.
///
/// `classification` is the outstanding call (typically
/// `Classifier::categorize`); it resolves exactly once and its completion
/// and the progress ticks are consumed by the same loop. On success the
/// estimator sprints to 100 and the mapping is applied on that single
/// edge; on failure the run aborts immediately without mutating the store.
pub async fn run_organize<F>(
    store: &mut BookmarkStore,
    classification: F,
    options: OrganizeOptions,
    mut on_event: impl FnMut(OrganizeEvent),
) -> OrganizeOutcome
where
    F: Future<Output = Result<CategoryMapping, ClassifyError>>,
{
    let batch = store.len();
    if batch == 0 {
        return OrganizeOutcome::EmptyStore;
    }

    let mut estimator = ProgressEstimator::start(batch);
    let mut interval = tokio::time::interval(options.tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut ready: Option<CategoryMapping> = None;
    let mut pending = true;
    pin!(classification);

    loop {
        tokio::select! {
            result = &mut classification, if pending => {
                pending = false;
                match result {
                    Ok(mapping) => {
                        estimator.mark_ready();
                        ready = Some(mapping);
                    }
                    Err(e) => {
                        error!("Categorization failed: {}", e);
                        estimator.abort();
                        let message = failure_message(&e);
                        on_event(OrganizeEvent::Failed { message: message.clone() });
                        return OrganizeOutcome::Failed { message };
                    }
                }
            }
            _ = interval.tick() => {
                let percent = estimator.tick();
                on_event(OrganizeEvent::Progress { percent, label: phase_label(percent) });

                if estimator.is_done() {
                    if let Some(mapping) = ready.take() {
                        let applied = store.apply_categorization(&mapping.assignments);
                        info!("Organize complete: {} of {} bookmarks categorized", applied, batch);
                        on_event(OrganizeEvent::Completed {
                            applied,
                            unmatched: mapping.unmatched_tokens,
                            batch,
                        });

                        tokio::time::sleep(options.done_display_delay).await;
                        estimator.reset();
                        return OrganizeOutcome::Applied {
                            applied,
                            unmatched: mapping.unmatched_tokens,
                        };
                    }
                }
            }
        }
    }
}

/// Map a pipeline failure to the single user-facing message.
fn failure_message(err: &ClassifyError) -> String {
    match err {
        ClassifyError::MissingCredential => {
            "No API key configured. Set classifier.api_key before organizing.".to_string()
        }
        ClassifyError::MalformedResponse(_) => {
            "The AI response was too large and got truncated. Try organizing in smaller batches."
                .to_string()
        }
        ClassifyError::EmptyResponse | ClassifyError::Network(_) | ClassifyError::Api { .. } => {
            "AI organization failed: connection problem or API quota exhausted.".to_string()
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
