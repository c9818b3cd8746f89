//! Tests whether a candidate's stratification signal can be attributed to the
//! target depth alone.
//!
//! A synthetic field is built in which, inside each candidate window, the target
//! depth keeps its measured temperatures while every other depth is replaced by a
//! smoothed background of the target depth. The stratification index recomputed on
//! this field (the specific index) is then compared against a reference index.
use super::record_stage_metrics;
use crate::{
    collaborators::{Interpolator, StratificationIndex},
    error::{Collaborator, FilterError, FilterResult, SeriesContext},
    field::TemperatureField,
    interval::{Interval, IntervalSet},
    parameters::{PulseKind, check_cut_off},
};
use cold_pulses_common::{Depth, Real, metrics::stage::FilterStage};
use ndarray::{ArrayView1, Axis, s};
use rayon::prelude::*;
use tracing::{Span, debug};

/// Builds the field from which the specific index is computed.
///
/// Samples outside every candidate window are NaN. Inside a window, the row at
/// `depth_index` is copied from `field` and every other row is copied from `background`.
///
/// # Panics
/// Panics if `depth_index` is not a row of `field`, or if a candidate or `background`
/// is shorter than the time axis requires. [`filter_specific_index`] checks all three.
pub fn synthetic_field<'a>(
    field: &'a TemperatureField,
    candidates: &IntervalSet,
    depth_index: usize,
    background: ArrayView1<'a, Real>,
) -> TemperatureField {
    let mut synthetic = field.nan_like();
    let values = synthetic.values_mut();
    for interval in candidates {
        let window = interval.window();
        for (row, mut series) in values.axis_iter_mut(Axis(0)).enumerate() {
            let source = if row == depth_index {
                field.row(depth_index)
            } else {
                background
            };
            series
                .slice_mut(s![window.clone()])
                .assign(&source.slice(s![window.clone()]));
        }
    }
    synthetic
}

/// Returns true if at some sample of `interval` the specific index moves past the
/// reference index in the direction of `kind`, and has the sign of that direction.
fn shows_excursion(
    kind: PulseKind,
    reference: ArrayView1<'_, Real>,
    specific: ArrayView1<'_, Real>,
    interval: &Interval,
) -> bool {
    interval.window().any(|t| {
        let (reference, specific) = (reference[t], specific[t]);
        match kind {
            PulseKind::Top => reference - specific < 0.0 && specific > 0.0,
            PulseKind::Bot => reference - specific > 0.0 && specific < 0.0,
        }
    })
}

/// Keeps the candidates whose specific index shows a `kind` excursion relative to
/// `reference_index`.
///
/// `min_stsi` is validated and recorded but does not take part in the test.
/// Errors from `index` or `interpolator` abort the whole call.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip_all, fields(
    kind = %kind,
    depth = depth,
    min_stsi = min_stsi,
    num_candidates = candidates.len(),
    num_kept
))]
pub fn filter_specific_index<I, P>(
    field: &TemperatureField,
    candidates: &IntervalSet,
    reference_index: ArrayView1<'_, Real>,
    depth: Depth,
    min_stsi: Real,
    kind: PulseKind,
    index: &I,
    interpolator: &P,
) -> FilterResult<IntervalSet>
where
    I: StratificationIndex + ?Sized,
    P: Interpolator + ?Sized,
{
    check_cut_off(min_stsi)?;
    let depth_index = field.depth_index(depth)?;
    candidates.check_bounds(field.time_len())?;
    field.check_series_len(SeriesContext::ReferenceIndex, reference_index.len())?;

    if candidates.is_empty() {
        Span::current().record("num_kept", 0);
        record_stage_metrics(FilterStage::SpecificIndex, 0, 0);
        return Ok(IntervalSet::new());
    }

    // The background depends only on the target depth's series, not on the window.
    let background = interpolator
        .interpolate(field.row(depth_index))
        .map_err(|source| FilterError::Collaborator {
            collaborator: Collaborator::Interpolator,
            source,
        })?;
    field.check_series_len(SeriesContext::Interpolation, background.len())?;

    let synthetic = synthetic_field(field, candidates, depth_index, background.view());
    let specific_index = index
        .index(&synthetic)
        .map_err(|source| FilterError::Collaborator {
            collaborator: Collaborator::StratificationIndex,
            source,
        })?;
    field.check_series_len(SeriesContext::SpecificIndex, specific_index.len())?;
    debug!("Computed specific index over {} samples", specific_index.len());

    let specific_index = specific_index.view();
    let keep = candidates
        .par_iter()
        .map(|interval| shows_excursion(kind, reference_index, specific_index, interval))
        .collect::<Vec<_>>();

    let kept = candidates
        .iter()
        .zip(keep)
        .filter_map(|(interval, keep)| keep.then_some(*interval))
        .collect::<IntervalSet>();

    Span::current().record("num_kept", kept.len());
    record_stage_metrics(FilterStage::SpecificIndex, candidates.len(), kept.len());
    Ok(kept)
}
