use crate::error::{FilterError, FilterResult, SeriesContext};
use cold_pulses_common::{Depth, Real};
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Temperatures recorded at a fixed set of depths, indexed by `(depth, time)`.
///
/// NaN marks samples with no data.
#[derive(Clone, Debug)]
pub struct TemperatureField {
    depths: Vec<Depth>,
    values: Array2<Real>,
    /// Seconds between consecutive samples.
    sample_interval: Real,
}

impl TemperatureField {
    pub fn new(depths: Vec<Depth>, values: Array2<Real>, sample_interval: Real) -> FilterResult<Self> {
        if depths.is_empty() {
            return Err(FilterError::EmptyDepthAxis);
        }
        if depths.len() != values.nrows() {
            return Err(FilterError::FieldShape {
                depths: depths.len(),
                rows: values.nrows(),
            });
        }
        check_sample_interval(sample_interval)?;
        Ok(Self {
            depths,
            values,
            sample_interval,
        })
    }

    /// A field of the same shape and axes with every sample set to NaN.
    pub fn nan_like(&self) -> Self {
        Self {
            depths: self.depths.clone(),
            values: Array2::from_elem(self.values.raw_dim(), Real::NAN),
            sample_interval: self.sample_interval,
        }
    }

    pub fn depths(&self) -> &[Depth] {
        &self.depths
    }

    pub fn values(&self) -> ArrayView2<'_, Real> {
        self.values.view()
    }

    pub(crate) fn values_mut(&mut self) -> &mut Array2<Real> {
        &mut self.values
    }

    /// The time series recorded at the depth with the given row index.
    pub fn row(&self, depth_index: usize) -> ArrayView1<'_, Real> {
        self.values.row(depth_index)
    }

    pub fn sample_interval(&self) -> Real {
        self.sample_interval
    }

    /// Number of samples on the time axis.
    pub fn time_len(&self) -> usize {
        self.values.ncols()
    }

    /// Finds the row holding `depth`, which must appear exactly once.
    pub fn depth_index(&self, depth: Depth) -> FilterResult<usize> {
        let mut matches = self
            .depths
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == depth)
            .map(|(index, _)| index);

        let index = matches.next().ok_or(FilterError::DepthNotFound(depth))?;
        if matches.next().is_some() {
            return Err(FilterError::DuplicateDepth(depth));
        }
        Ok(index)
    }

    /// Fails unless `len` matches the length of the time axis.
    pub(crate) fn check_series_len(&self, context: SeriesContext, len: usize) -> FilterResult<()> {
        if len == self.time_len() {
            Ok(())
        } else {
            Err(FilterError::SeriesLength {
                context,
                len,
                expected: self.time_len(),
            })
        }
    }
}

pub(crate) fn check_sample_interval(sample_interval: Real) -> FilterResult<()> {
    if sample_interval.is_finite() && sample_interval > 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidSamplingInterval(sample_interval))
    }
}
