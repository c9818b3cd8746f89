use super::record_stage_metrics;
use crate::{
    error::FilterResult,
    field::check_sample_interval,
    interval::IntervalSet,
    parameters::{DurationKind, check_duration},
};
use cold_pulses_common::{Real, SECONDS_PER_MINUTE, metrics::stage::FilterStage};
use tracing::{Span, trace};

/// Converts a duration in minutes to a (fractional) number of samples.
pub fn duration_in_samples(minutes: Real, sample_interval: Real) -> Real {
    SECONDS_PER_MINUTE * minutes / sample_interval
}

/// Keeps the candidates whose duration, in samples, is at least (`Min`) or at
/// most (`Max`) `threshold_minutes` converted at `sample_interval` seconds per sample.
///
/// Both bounds are inclusive.
#[tracing::instrument(skip_all, fields(
    kind = %kind,
    threshold_minutes = threshold_minutes,
    num_candidates = candidates.len(),
    num_kept
))]
pub fn filter_duration(
    candidates: &IntervalSet,
    sample_interval: Real,
    kind: DurationKind,
    threshold_minutes: Real,
) -> FilterResult<IntervalSet> {
    check_sample_interval(sample_interval)?;
    check_duration(threshold_minutes)?;

    let threshold = duration_in_samples(threshold_minutes, sample_interval);
    trace!("Threshold of {threshold} samples");

    let kept = candidates.retain_where(|interval| {
        let duration = interval.duration() as Real;
        match kind {
            DurationKind::Min => duration >= threshold,
            DurationKind::Max => duration <= threshold,
        }
    });

    Span::current().record("num_kept", kept.len());
    record_stage_metrics(
        match kind {
            DurationKind::Min => FilterStage::MinDuration,
            DurationKind::Max => FilterStage::MaxDuration,
        },
        candidates.len(),
        kept.len(),
    );
    Ok(kept)
}
