//! Candidate and accepted pulses, expressed as half-open ranges of sample indices.
use crate::error::{FilterError, FilterResult};
use cold_pulses_common::SampleIndex;
use std::{
    collections::BTreeSet,
    fmt::Display,
    ops::{Deref, Range},
};

/// A half-open interval `[start, end)` on the time axis of a profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub(crate) start: SampleIndex,
    pub(crate) end: SampleIndex,
}

impl Interval {
    /// Creates an interval, returning `None` unless `start < end`.
    pub fn new(start: SampleIndex, end: SampleIndex) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> SampleIndex {
        self.start
    }

    pub fn end(&self) -> SampleIndex {
        self.end
    }

    /// Number of samples covered by the interval.
    pub fn duration(&self) -> usize {
        self.end - self.start
    }

    pub fn contains(&self, index: SampleIndex) -> bool {
        (self.start..self.end).contains(&index)
    }

    /// The interval as a range, suitable for slicing a time series.
    pub fn window(&self) -> Range<SampleIndex> {
        self.start..self.end
    }

    pub(crate) fn check_bounds(&self, len: usize) -> FilterResult<()> {
        if self.end > len {
            Err(FilterError::IntervalOutOfBounds {
                start: self.start,
                end: self.end,
                len,
            })
        } else {
            Ok(())
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An ordered collection of intervals.
///
/// Filters consume a set by reference and return a new set containing the
/// surviving intervals in their original relative order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from aligned arrays of start and end indices.
    ///
    /// Fails if the arrays differ in length, or if any pair has `start >= end`.
    pub fn from_parallel(starts: &[SampleIndex], ends: &[SampleIndex]) -> FilterResult<Self> {
        if starts.len() != ends.len() {
            return Err(FilterError::MismatchedBoundaries {
                starts: starts.len(),
                ends: ends.len(),
            });
        }
        starts
            .iter()
            .zip(ends)
            .enumerate()
            .map(|(position, (&start, &end))| {
                Interval::new(start, end).ok_or(FilterError::InvalidInterval {
                    position,
                    start,
                    end,
                })
            })
            .collect::<FilterResult<Vec<_>>>()
            .map(|intervals| Self { intervals })
    }

    /// Splits the set back into aligned arrays of start and end indices.
    pub fn into_parallel(self) -> (Vec<SampleIndex>, Vec<SampleIndex>) {
        self.intervals
            .into_iter()
            .map(|interval| (interval.start, interval.end))
            .unzip()
    }

    pub fn push(&mut self, interval: Interval) {
        self.intervals.push(interval);
    }

    /// Returns the set of sample indices covered by at least one interval.
    pub fn covered_samples(&self) -> BTreeSet<SampleIndex> {
        self.intervals
            .iter()
            .flat_map(Interval::window)
            .collect()
    }

    /// Fails if any interval reaches beyond a time axis of length `len`.
    pub(crate) fn check_bounds(&self, len: usize) -> FilterResult<()> {
        self.intervals
            .iter()
            .try_for_each(|interval| interval.check_bounds(len))
    }

    pub(crate) fn retain_where<F>(&self, keep: F) -> Self
    where
        F: FnMut(&&Interval) -> bool,
    {
        self.intervals.iter().filter(keep).copied().collect()
    }
}

impl Deref for IntervalSet {
    type Target = [Interval];

    fn deref(&self) -> &Self::Target {
        &self.intervals
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self {
            intervals: iter.into_iter().collect(),
        }
    }
}

impl Extend<Interval> for IntervalSet {
    fn extend<T: IntoIterator<Item = Interval>>(&mut self, iter: T) {
        self.intervals.extend(iter);
    }
}

impl IntoIterator for IntervalSet {
    type Item = Interval;
    type IntoIter = std::vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_interval_is_rejected() {
        assert_eq!(Interval::new(4, 4), None);
        assert_eq!(Interval::new(5, 4), None);
        assert_eq!(Interval::new(4, 5).map(|i| i.duration()), Some(1));
    }

    #[test]
    fn parallel_arrays_must_align() {
        let result = IntervalSet::from_parallel(&[0, 5], &[3]);
        assert!(matches!(
            result,
            Err(FilterError::MismatchedBoundaries { starts: 2, ends: 1 })
        ));
    }

    #[test]
    fn parallel_arrays_must_be_ordered() {
        let result = IntervalSet::from_parallel(&[0, 9], &[3, 9]);
        assert!(matches!(
            result,
            Err(FilterError::InvalidInterval {
                position: 1,
                start: 9,
                end: 9
            })
        ));
    }

    #[test]
    fn parallel_round_trip_preserves_order() {
        let set = IntervalSet::from_parallel(&[12, 0, 5], &[20, 3, 9]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set[0], Interval { start: 12, end: 20 });
        assert_eq!(set.into_parallel(), (vec![12, 0, 5], vec![20, 3, 9]));
    }

    #[test]
    fn covered_samples_is_union() {
        let set = IntervalSet::from_parallel(&[0, 2, 7], &[3, 4, 8]).unwrap();
        assert_eq!(
            set.covered_samples().into_iter().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 7]
        );
    }

    #[test]
    fn bounds_are_checked_against_time_axis() {
        let set = IntervalSet::from_parallel(&[0, 5], &[3, 11]).unwrap();
        assert!(set.check_bounds(11).is_ok());
        assert!(matches!(
            set.check_bounds(10),
            Err(FilterError::IntervalOutOfBounds {
                start: 5,
                end: 11,
                len: 10
            })
        ));
    }
}
