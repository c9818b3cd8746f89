use crate::collaborators::CollaboratorError;
use cold_pulses_common::{Depth, Real, SampleIndex};
use thiserror::Error;

pub type FilterResult<T> = Result<T, FilterError>;

/// Names the series whose length is checked against the time axis.
#[derive(Debug, strum::Display)]
pub enum SeriesContext {
    #[strum(to_string = "reference index")]
    ReferenceIndex,
    #[strum(to_string = "specific index")]
    SpecificIndex,
    #[strum(to_string = "interpolated series")]
    Interpolation,
}

/// Identifies which injected collaborator failed.
#[derive(Debug, strum::Display)]
pub enum Collaborator {
    #[strum(to_string = "stratification index")]
    StratificationIndex,
    #[strum(to_string = "interpolator")]
    Interpolator,
}

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Mismatched interval boundaries: {starts} starts but {ends} ends")]
    MismatchedBoundaries { starts: usize, ends: usize },
    #[error("Interval {position} is empty or reversed: start {start}, end {end}")]
    InvalidInterval {
        position: usize,
        start: SampleIndex,
        end: SampleIndex,
    },
    #[error("Interval [{start}, {end}) exceeds time axis of length {len}")]
    IntervalOutOfBounds {
        start: SampleIndex,
        end: SampleIndex,
        len: usize,
    },
    #[error("Sampling interval must be positive and finite, got {0}")]
    InvalidSamplingInterval(Real),
    #[error("Duration must be non-negative and finite, got {0} minutes")]
    InvalidDuration(Real),
    #[error("Unknown duration kind '{0}', expected 'min' or 'max'")]
    UnknownDurationKind(String),
    #[error("Unknown pulse kind '{0}', expected 'top' or 'bot'")]
    UnknownPulseKind(String),
    #[error("Depth {0} not found in depth axis")]
    DepthNotFound(Depth),
    #[error("Depth {0} appears more than once in depth axis")]
    DuplicateDepth(Depth),
    #[error("Cut-off must be non-negative and finite, got {0}")]
    InvalidCutOff(Real),
    #[error("Temperature field has {depths} depth labels but {rows} rows")]
    FieldShape { depths: usize, rows: usize },
    #[error("Temperature field has no depths")]
    EmptyDepthAxis,
    #[error("{context} has length {len}, expected {expected}")]
    SeriesLength {
        context: SeriesContext,
        len: usize,
        expected: usize,
    },
    #[error("{collaborator} failed: {source}")]
    Collaborator {
        collaborator: Collaborator,
        #[source]
        source: CollaboratorError,
    },
}
