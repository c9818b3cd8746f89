//! Concrete stratification index and background interpolation used by the simulator.
use cold_pulses_common::Real;
use cold_pulses_filters::{CollaboratorError, Interpolator, StratificationIndex, TemperatureField};
use itertools::Itertools;
use ndarray::{Array1, ArrayView1, Axis};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum IndexError {
    #[error("At least two depths are needed for a vertical gradient, got {0}")]
    TooFewDepths(usize),
}

/// Mean vertical temperature gradient, in degrees per metre with depth increasing downwards.
///
/// Warm water over cold water gives a negative index. Any NaN in a time sample makes
/// the index of that sample NaN.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct VerticalGradientIndex;

impl StratificationIndex for VerticalGradientIndex {
    fn index(&self, field: &TemperatureField) -> Result<Array1<Real>, CollaboratorError> {
        let depths = field.depths();
        if depths.len() < 2 {
            return Err(IndexError::TooFewDepths(depths.len()).into());
        }
        let pairs = (depths.len() - 1) as Real;
        let index = field
            .values()
            .axis_iter(Axis(1))
            .map(|column| {
                column
                    .iter()
                    .zip(depths)
                    .tuple_windows()
                    .map(|((upper, z_upper), (lower, z_lower))| {
                        (lower - upper) / (z_lower - z_upper)
                    })
                    .sum::<Real>()
                    / pairs
            })
            .collect();
        Ok(index)
    }
}

/// Upper convex hull of the finite samples, linearly interpolated between hull vertices.
///
/// The result equals the input at every hull vertex, which always includes the first and
/// last finite samples, and is at least the input everywhere in between. Samples before
/// the first or after the last finite sample are NaN.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct UpperHullInterpolator;

impl UpperHullInterpolator {
    fn hull(series: ArrayView1<'_, Real>) -> Vec<(usize, Real)> {
        let mut hull = Vec::<(usize, Real)>::new();
        for (x, &y) in series.iter().enumerate().filter(|(_, y)| y.is_finite()) {
            while hull.len() >= 2 {
                let (x0, y0) = hull[hull.len() - 2];
                let (x1, y1) = hull[hull.len() - 1];
                // Drop the last vertex while it lies on or below the chord to the new point.
                let cross = (x1 - x0) as Real * (y - y0) - (y1 - y0) * (x - x0) as Real;
                if cross >= 0.0 {
                    hull.pop();
                } else {
                    break;
                }
            }
            hull.push((x, y));
        }
        hull
    }
}

impl Interpolator for UpperHullInterpolator {
    fn interpolate(&self, series: ArrayView1<'_, Real>) -> Result<Array1<Real>, CollaboratorError> {
        let mut output = Array1::from_elem(series.len(), Real::NAN);
        let hull = Self::hull(series);
        if let [(x, y)] = hull[..] {
            output[x] = y;
        }
        for ((x0, y0), (x1, y1)) in hull.into_iter().tuple_windows() {
            let slope = (y1 - y0) / (x1 - x0) as Real;
            for x in x0..=x1 {
                output[x] = y0 + slope * (x - x0) as Real;
            }
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use ndarray::array;

    #[test]
    fn gradient_of_linear_profile() {
        let field = TemperatureField::new(
            vec![5.0, 10.0, 20.0],
            array![[28.0, 28.0], [27.5, 28.0], [26.5, 28.0]],
            60.0,
        )
        .unwrap();
        let index = VerticalGradientIndex.index(&field).unwrap();
        assert_approx_eq!(index[0], -0.1, 1e-12);
        assert_approx_eq!(index[1], 0.0, 1e-12);
    }

    #[test]
    fn gradient_propagates_missing_data() {
        let field = TemperatureField::new(
            vec![5.0, 10.0],
            array![[28.0, Real::NAN], [27.0, 27.0]],
            60.0,
        )
        .unwrap();
        let index = VerticalGradientIndex.index(&field).unwrap();
        assert_approx_eq!(index[0], -0.2, 1e-12);
        assert!(index[1].is_nan());
    }

    #[test]
    fn gradient_needs_two_depths() {
        let field = TemperatureField::new(vec![5.0], array![[28.0, 28.0]], 60.0).unwrap();
        let error = VerticalGradientIndex.index(&field).unwrap_err();
        assert_eq!(
            error.to_string(),
            "At least two depths are needed for a vertical gradient, got 1"
        );
    }

    #[test]
    fn hull_bridges_a_dip() {
        let series = array![20.0, 20.0, 18.0, 17.0, 19.0, 20.0];
        let hull = UpperHullInterpolator.interpolate(series.view()).unwrap();
        for value in hull.iter() {
            assert_approx_eq!(*value, 20.0, 1e-12);
        }
    }

    #[test]
    fn hull_passes_through_window_boundaries() {
        // The first and last samples are always hull vertices, so a pulse window that
        // touches either end of the series sees the measured value there.
        let series = array![17.0, 19.0, 20.0, 19.5, 21.0, 18.0];
        let hull = UpperHullInterpolator.interpolate(series.view()).unwrap();
        assert_eq!(hull[0], 17.0);
        assert_eq!(hull[5], 18.0);
        assert_eq!(hull[4], 21.0);
        assert_approx_eq!(hull[2], 20.0, 1e-12);
        assert_approx_eq!(hull[3], 20.5, 1e-12);
        for (value, original) in hull.iter().zip(series.iter()) {
            assert!(value >= original);
        }
    }

    #[test]
    fn hull_skips_missing_samples() {
        let series = array![Real::NAN, 20.0, Real::NAN, 18.0, 22.0, Real::NAN];
        let hull = UpperHullInterpolator.interpolate(series.view()).unwrap();
        assert!(hull[0].is_nan());
        assert_approx_eq!(hull[1], 20.0, 1e-12);
        assert_approx_eq!(hull[2], 20.0 + 2.0 / 3.0, 1e-12);
        assert_approx_eq!(hull[3], 20.0 + 4.0 / 3.0, 1e-12);
        assert_approx_eq!(hull[4], 22.0, 1e-12);
        assert!(hull[5].is_nan());
    }

    #[test]
    fn hull_of_single_or_no_samples() {
        let hull = UpperHullInterpolator
            .interpolate(array![Real::NAN, 19.0, Real::NAN].view())
            .unwrap();
        assert!(hull[0].is_nan());
        assert_eq!(hull[1], 19.0);
        assert!(hull[2].is_nan());

        let hull = UpperHullInterpolator
            .interpolate(array![Real::NAN, Real::NAN].view())
            .unwrap();
        assert!(hull.iter().all(|v| v.is_nan()));
    }
}
