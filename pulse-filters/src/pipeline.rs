use crate::{
    collaborators::{Interpolator, StratificationIndex},
    error::FilterResult,
    field::TemperatureField,
    filters::{filter_duration, filter_max_drop, filter_specific_index, merge_overlaps},
    interval::IntervalSet,
    parameters::{DurationKind, FilterParameters},
    progress::{Progress, ProgressReporter},
};
use cold_pulses_common::{Real, metrics::stage::FilterStage};
use ndarray::ArrayView1;
use tracing::{Span, debug, info};

const TOTAL_STEPS: usize = 5;

/// Runs the filter stages in order:
/// 1. minimum duration,
/// 2. maximum drop at the target depth,
/// 3. specific stratification index,
/// 4. merging of overlapping pulses,
/// 5. maximum duration of the merged pulses.
pub struct PulsePipeline<I, P, R = ()> {
    parameters: FilterParameters,
    index: I,
    interpolator: P,
    reporter: R,
}

impl<I, P> PulsePipeline<I, P>
where
    I: StratificationIndex,
    P: Interpolator,
{
    /// Creates a pipeline which does not report progress. Fails if the parameters are invalid.
    pub fn new(parameters: FilterParameters, index: I, interpolator: P) -> FilterResult<Self> {
        parameters.validate()?;
        Ok(Self {
            parameters,
            index,
            interpolator,
            reporter: (),
        })
    }
}

impl<I, P, R> PulsePipeline<I, P, R>
where
    I: StratificationIndex,
    P: Interpolator,
    R: ProgressReporter,
{
    pub fn with_reporter<S: ProgressReporter>(self, reporter: S) -> PulsePipeline<I, P, S> {
        PulsePipeline {
            parameters: self.parameters,
            index: self.index,
            interpolator: self.interpolator,
            reporter,
        }
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.parameters
    }

    fn report(&self, stage: FilterStage, step_number: usize, current: usize, total: usize) {
        self.reporter.report(&Progress {
            current,
            total,
            stage,
            step_number,
            total_steps: TOTAL_STEPS,
            kind: self.parameters.kind,
        });
    }

    fn run_stage<F>(
        &self,
        step_number: usize,
        stage: FilterStage,
        candidates: IntervalSet,
        apply: F,
    ) -> FilterResult<IntervalSet>
    where
        F: FnOnce(&IntervalSet) -> FilterResult<IntervalSet>,
    {
        let total = candidates.len();
        self.report(stage, step_number, 0, total);
        let kept = apply(&candidates)?;
        self.report(stage, step_number, total, total);
        debug!("{}: kept {} of {total}", stage.description(), kept.len());
        Ok(kept)
    }

    /// Filters `candidates` down to the accepted pulses.
    ///
    /// `reference_index` holds one reference stratification index value per time sample.
    #[tracing::instrument(skip_all, fields(
        kind = %self.parameters.kind,
        depth = self.parameters.depth,
        num_candidates = candidates.len(),
        num_pulses
    ))]
    pub fn run(
        &self,
        field: &TemperatureField,
        candidates: IntervalSet,
        reference_index: ArrayView1<'_, Real>,
    ) -> FilterResult<IntervalSet> {
        let parameters = &self.parameters;
        let sample_interval = field.sample_interval();

        let candidates = self.run_stage(1, FilterStage::MinDuration, candidates, |c| {
            filter_duration(c, sample_interval, DurationKind::Min, parameters.min_duration)
        })?;
        let candidates = self.run_stage(2, FilterStage::MaxDrop, candidates, |c| {
            filter_max_drop(field, c, parameters.depth, parameters.drop_cut_off)
        })?;
        let candidates = self.run_stage(3, FilterStage::SpecificIndex, candidates, |c| {
            filter_specific_index(
                field,
                c,
                reference_index,
                parameters.depth,
                parameters.min_stsi,
                parameters.kind,
                &self.index,
                &self.interpolator,
            )
        })?;
        let candidates = self.run_stage(4, FilterStage::MergeOverlaps, candidates, |c| {
            Ok(merge_overlaps(c))
        })?;
        let pulses = self.run_stage(5, FilterStage::MaxDuration, candidates, |c| {
            filter_duration(c, sample_interval, DurationKind::Max, parameters.max_duration)
        })?;

        Span::current().record("num_pulses", pulses.len());
        info!("Accepted {} {} pulses", pulses.len(), parameters.kind);
        Ok(pulses)
    }
}
