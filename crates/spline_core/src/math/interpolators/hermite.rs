//! Cubic Hermite assembly from node values and derivatives.

use ndarray::{Array2, Array3, ArrayBase, Data, Dimension};
use tracing::debug;

use super::config::{Extrapolate, SplineConfig};
use super::ppoly::PiecewisePolynomial;
use super::traits::DerivativeEstimator;
use super::validation::SampleSet;
use crate::types::{real_const, InterpolationError, Result, SampleValue};

/// Uses the derivatives stored in the [`SampleSet`] as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppliedDerivatives;

impl<T: SampleValue> DerivativeEstimator<T> for SuppliedDerivatives {
    fn node_derivatives(&self, samples: &SampleSet<T>) -> Result<Array2<T>> {
        samples.dydx().cloned().ok_or_else(|| {
            InterpolationError::invalid_shape("node derivatives were not supplied")
        })
    }
}

/// Cubic coefficients for every interval and column.
///
/// With `h = dx[i]`, secant slope `m`, and end derivatives `d0`, `d1`, the
/// interval polynomial in `s = x - x[i]` is
///
/// ```text
/// t  = (d0 + d1 - 2m) / h
/// c0 = t / h
/// c1 = (m - d0) / h - t
/// c2 = d0
/// c3 = y[i]
/// ```
///
/// which matches the values and derivatives at both ends of the interval.
/// The result has shape `(4, n-1, m)`.
pub fn assemble_coefficients<T: SampleValue>(
    samples: &SampleSet<T>,
    dydx: &Array2<T>,
) -> Array3<T> {
    let y = samples.y();
    let dx = samples.dx();
    let slopes = samples.slopes();
    let two: T::Real = real_const(2.0);
    let (intervals, m) = slopes.dim();

    let mut c = Array3::from_elem((4, intervals, m), T::zero());
    for i in 0..intervals {
        let h = dx[i];
        for j in 0..m {
            let slope = slopes[[i, j]];
            let d0 = dydx[[i, j]];
            let d1 = dydx[[i + 1, j]];
            let t = (d0 + d1 - slope.scale(two)).unscale(h);
            c[[0, i, j]] = t.unscale(h);
            c[[1, i, j]] = (slope - d0).unscale(h) - t;
            c[[2, i, j]] = d0;
            c[[3, i, j]] = y[[i, j]];
        }
    }
    c
}

/// Build the Hermite interpolant of `samples` with derivatives from `estimator`.
///
/// The result carries the batch shape and axis of the samples.
///
/// # Errors
///
/// Propagates the estimator's error, or `InvalidShape` if it returns an
/// array of the wrong shape.
pub fn build_with<T, E>(
    estimator: &E,
    samples: &SampleSet<T>,
    extrapolate: Extrapolate,
) -> Result<PiecewisePolynomial<T>>
where
    T: SampleValue,
    E: DerivativeEstimator<T> + ?Sized,
{
    let dydx = estimator.node_derivatives(samples)?;
    if dydx.dim() != samples.y().dim() {
        return Err(InterpolationError::invalid_shape(format!(
            "estimated derivatives have shape {:?}, expected {:?}",
            dydx.shape(),
            samples.y().shape()
        )));
    }
    let c = assemble_coefficients(samples, &dydx);
    debug!(
        nodes = samples.len(),
        columns = samples.batch_len(),
        %extrapolate,
        "assembled cubic Hermite coefficients"
    );
    PiecewisePolynomial::with_batch(
        c,
        samples.x().to_vec(),
        extrapolate,
        samples.batch_shape().to_vec(),
        samples.axis(),
    )
}

/// Piecewise-cubic Hermite interpolant with caller-supplied derivatives.
///
/// Validates `x`, `y` and `dydx` (identical shapes required) and assembles
/// one cubic per interval that matches values and first derivatives at both
/// ends. Extrapolation defaults to `Extend`.
///
/// # Errors
///
/// Any validation error from [`SampleSet::with_derivatives`].
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use spline_core::math::interpolators::{build_hermite, SplineConfig};
///
/// // y = x^2 with exact derivatives is reproduced exactly
/// let x = array![0.0, 1.0, 2.0];
/// let pp = build_hermite(&x, &array![0.0_f64, 1.0, 4.0], &array![0.0, 2.0, 4.0], &SplineConfig::default())
///     .unwrap();
/// assert!((pp.value_at(1.5).unwrap() - 2.25).abs() < 1e-12);
/// ```
pub fn build_hermite<T, Sx, Sy, Sd, Dx, Dy>(
    x: &ArrayBase<Sx, Dx>,
    y: &ArrayBase<Sy, Dy>,
    dydx: &ArrayBase<Sd, Dy>,
    config: &SplineConfig,
) -> Result<PiecewisePolynomial<T>>
where
    T: SampleValue,
    Sx: Data<Elem = T::Real>,
    Sy: Data<Elem = T>,
    Sd: Data<Elem = T>,
    Dx: Dimension,
    Dy: Dimension,
{
    let samples = SampleSet::with_derivatives(x, y, dydx, config.axis)?;
    build_with(
        &SuppliedDerivatives,
        &samples,
        config.extrapolate_or(Extrapolate::Extend),
    )
}
