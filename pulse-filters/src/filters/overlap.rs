use super::record_stage_metrics;
use crate::interval::{Interval, IntervalSet};
use cold_pulses_common::metrics::stage::FilterStage;
use itertools::Itertools;
use tracing::Span;

/// Merges overlapping or touching intervals into maximal contiguous spans.
///
/// The output is sorted by start, its intervals are pairwise disjoint and
/// non-adjacent, and it covers exactly the samples covered by the input.
#[tracing::instrument(skip_all, fields(num_candidates = candidates.len(), num_kept))]
pub fn merge_overlaps(candidates: &IntervalSet) -> IntervalSet {
    let merged = candidates
        .iter()
        .copied()
        .sorted_unstable()
        .coalesce(|previous, next| {
            if next.start <= previous.end {
                Ok(Interval {
                    start: previous.start,
                    end: previous.end.max(next.end),
                })
            } else {
                Err((previous, next))
            }
        })
        .collect::<IntervalSet>();

    Span::current().record("num_kept", merged.len());
    record_stage_metrics(FilterStage::MergeOverlaps, candidates.len(), merged.len());
    merged
}
