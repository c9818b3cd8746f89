//! Capabilities the specific index filter depends on but does not implement.
use crate::field::TemperatureField;
use cold_pulses_common::Real;
use ndarray::{Array1, ArrayView1};

/// Error raised by an injected collaborator. It is passed to the caller unchanged.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Computes a stratification index for every time sample of a temperature field.
///
/// Implementations must accept NaN samples and return NaN where no index can be computed.
pub trait StratificationIndex {
    fn index(&self, field: &TemperatureField) -> Result<Array1<Real>, CollaboratorError>;
}

impl<F> StratificationIndex for F
where
    F: Fn(&TemperatureField) -> Result<Array1<Real>, CollaboratorError>,
{
    fn index(&self, field: &TemperatureField) -> Result<Array1<Real>, CollaboratorError> {
        self(field)
    }
}

/// Builds a smoothed background estimate of a single depth's time series.
///
/// The output has the same length as the input.
pub trait Interpolator {
    fn interpolate(&self, series: ArrayView1<'_, Real>) -> Result<Array1<Real>, CollaboratorError>;
}

impl<F> Interpolator for F
where
    F: Fn(ArrayView1<'_, Real>) -> Result<Array1<Real>, CollaboratorError>,
{
    fn interpolate(&self, series: ArrayView1<'_, Real>) -> Result<Array1<Real>, CollaboratorError> {
        self(series)
    }
}
