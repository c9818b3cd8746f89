use crate::parameters::PulseKind;
use cold_pulses_common::metrics::stage::FilterStage;
use tracing::info;

/// A snapshot of how far a filter stage has progressed.
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub stage: FilterStage,
    pub step_number: usize,
    pub total_steps: usize,
    pub kind: PulseKind,
}

/// Receives progress snapshots. Reporting never influences the filter results.
pub trait ProgressReporter {
    fn report(&self, progress: &Progress);
}

/// Ignores all progress.
impl ProgressReporter for () {
    fn report(&self, _: &Progress) {}
}

/// Emits each progress snapshot as a tracing event.
#[derive(Default, Clone, Copy, Debug)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&self, progress: &Progress) {
        info!(
            kind = %progress.kind,
            "[{}/{}] {}: {}/{}",
            progress.step_number,
            progress.total_steps,
            progress.stage.description(),
            progress.current,
            progress.total
        );
    }
}
