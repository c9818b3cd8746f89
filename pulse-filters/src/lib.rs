//! This crate provides the filters which narrow candidate cold pulses, found in
//! multi-depth temperature profiles, down to accepted pulses.
//!
//! Candidates are half-open ranges of sample indices. Each filter borrows an
//! [`IntervalSet`] and returns the survivors; [`PulsePipeline`] chains them.
//! Typical usage may look like:
//! ```rust
//! use cold_pulses_filters::{
//!     CollaboratorError, FilterParameters, IntervalSet, PulsePipeline, TemperatureField,
//! };
//! use ndarray::{Array1, Array2, ArrayView1};
//!
//! fn bottom_minus_top(field: &TemperatureField) -> Result<Array1<f64>, CollaboratorError> {
//!     let values = field.values();
//!     Ok(&values.row(values.nrows() - 1) - &values.row(0))
//! }
//!
//! fn background(series: ArrayView1<'_, f64>) -> Result<Array1<f64>, CollaboratorError> {
//!     Ok(Array1::from_elem(series.len(), 20.0))
//! }
//!
//! let mut values = Array2::from_elem((2, 60), 20.0);
//! values.row_mut(1).slice_mut(ndarray::s![20..40]).fill(18.0);
//! let field = TemperatureField::new(vec![5.0, 25.0], values, 60.0)?;
//!
//! let candidates = IntervalSet::from_parallel(&[19], &[40])?;
//! let pipeline = PulsePipeline::new(FilterParameters::default(), bottom_minus_top, background)?;
//! let pulses = pipeline.run(&field, candidates, Array1::zeros(60).view())?;
//! assert_eq!(pulses.into_parallel(), (vec![19], vec![40]));
//! # Ok::<(), cold_pulses_filters::FilterError>(())
//! ```

pub mod collaborators;
pub mod error;
pub mod field;
pub mod filters;
pub mod interval;
pub mod parameters;
pub mod pipeline;
pub mod progress;

pub use collaborators::{CollaboratorError, Interpolator, StratificationIndex};
pub use error::{FilterError, FilterResult};
pub use field::TemperatureField;
pub use filters::{
    filter_duration, filter_max_drop, filter_specific_index, merge_overlaps, synthetic_field,
};
pub use interval::{Interval, IntervalSet};
pub use parameters::{DurationKind, FilterParameters, PulseKind};
pub use pipeline::PulsePipeline;
pub use progress::{Progress, ProgressReporter, TracingProgress};
