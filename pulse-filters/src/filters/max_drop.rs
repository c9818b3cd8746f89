use super::record_stage_metrics;
use crate::{
    error::FilterResult,
    field::TemperatureField,
    interval::{Interval, IntervalSet},
    parameters::check_cut_off,
};
use cold_pulses_common::{Depth, Real, metrics::stage::FilterStage};
use ndarray::ArrayView1;
use rayon::prelude::*;
use tracing::{Span, trace};

/// The largest fall in temperature from the first sample of `interval` to any
/// sample inside it.
///
/// NaN samples are skipped. If the first sample is NaN the result is NaN.
///
/// # Panics
/// Panics if `interval` reaches beyond `series`. [`filter_max_drop`] checks bounds first.
pub fn max_drop(series: ArrayView1<'_, Real>, interval: &Interval) -> Real {
    let initial = series[interval.start];
    series
        .slice(ndarray::s![interval.window()])
        .iter()
        .map(|value| initial - value)
        .fold(Real::NAN, Real::max)
}

/// Keeps the candidates whose maximum drop at `depth` strictly exceeds `cut_off`.
#[tracing::instrument(skip_all, fields(
    depth = depth,
    cut_off = cut_off,
    num_candidates = candidates.len(),
    num_kept
))]
pub fn filter_max_drop(
    field: &TemperatureField,
    candidates: &IntervalSet,
    depth: Depth,
    cut_off: Real,
) -> FilterResult<IntervalSet> {
    check_cut_off(cut_off)?;
    let depth_index = field.depth_index(depth)?;
    candidates.check_bounds(field.time_len())?;

    let series = field.row(depth_index);
    let keep = candidates
        .par_iter()
        .map(|interval| {
            let drop = max_drop(series, interval);
            trace!("Candidate {interval} has maximum drop {drop}");
            drop > cut_off
        })
        .collect::<Vec<_>>();

    let kept = candidates
        .iter()
        .zip(keep)
        .filter_map(|(interval, keep)| keep.then_some(*interval))
        .collect::<IntervalSet>();

    Span::current().record("num_kept", kept.len());
    record_stage_metrics(FilterStage::MaxDrop, candidates.len(), kept.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FilterError, field::tests::three_depth_field};
    use assert_approx_eq::assert_approx_eq;
    use ndarray::array;

    fn interval(start: usize, end: usize) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn drop_is_measured_from_interval_start() {
        let field = three_depth_field();
        assert_approx_eq!(max_drop(field.row(2), &interval(0, 6)), 1.2, 1e-9);
        assert_approx_eq!(max_drop(field.row(2), &interval(2, 6)), 0.0, 1e-9);
        assert_approx_eq!(max_drop(field.row(0), &interval(0, 6)), 0.1, 1e-9);
    }

    #[test]
    fn single_sample_interval_has_no_drop() {
        let field = three_depth_field();
        assert_eq!(max_drop(field.row(1), &interval(3, 4)), 0.0);
    }

    #[test]
    fn nan_samples_are_skipped() {
        let series = array![20.0, Real::NAN, 19.5, Real::NAN];
        assert_approx_eq!(max_drop(series.view(), &interval(0, 4)), 0.5, 1e-9);
        assert!(max_drop(series.view(), &interval(1, 2)).is_nan());
    }

    #[test]
    #[should_panic]
    fn unchecked_drop_panics_beyond_series() {
        max_drop(array![20.0, 19.0].view(), &interval(1, 3));
    }

    #[test]
    fn keeps_only_drops_at_target_depth() {
        let field = three_depth_field();
        let candidates = IntervalSet::from_parallel(&[0, 2, 3], &[4, 5, 6]).unwrap();
        // Drops at 25 m: 1.2, 0.0, 0.0. At 5 m: 0.1, 0.0, 0.0.
        let kept = filter_max_drop(&field, &candidates, 25.0, 0.5).unwrap();
        assert_eq!(kept.into_parallel(), (vec![0], vec![4]));

        let kept = filter_max_drop(&field, &candidates, 5.0, 0.5).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn cut_off_is_strict() {
        let field = TemperatureField::new(
            vec![10.0],
            array![[20.0, 19.75, 19.5, 20.0]],
            60.0,
        )
        .unwrap();
        let candidates = IntervalSet::from_parallel(&[0], &[4]).unwrap();

        let kept = filter_max_drop(&field, &candidates, 10.0, 0.5).unwrap();
        assert!(kept.is_empty());

        let kept = filter_max_drop(&field, &candidates, 10.0, 0.5 - 1e-9).unwrap();
        assert_eq!(kept, candidates);
    }

    #[test]
    fn preserves_input_order() {
        let field = three_depth_field();
        let candidates = IntervalSet::from_parallel(&[1, 0], &[3, 3]).unwrap();
        let kept = filter_max_drop(&field, &candidates, 25.0, 0.1).unwrap();
        assert_eq!(kept, candidates);
    }

    #[test]
    fn empty_input() {
        let kept = filter_max_drop(&three_depth_field(), &IntervalSet::new(), 25.0, 0.01).unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn configuration_errors() {
        let field = three_depth_field();
        let candidates = IntervalSet::from_parallel(&[0], &[4]).unwrap();
        assert!(matches!(
            filter_max_drop(&field, &candidates, 30.0, 0.01),
            Err(FilterError::DepthNotFound(_))
        ));
        assert!(matches!(
            filter_max_drop(&field, &candidates, 25.0, -0.01),
            Err(FilterError::InvalidCutOff(_))
        ));
        let candidates = IntervalSet::from_parallel(&[0], &[7]).unwrap();
        assert!(matches!(
            filter_max_drop(&field, &candidates, 25.0, 0.01),
            Err(FilterError::IntervalOutOfBounds { .. })
        ));
    }
}
