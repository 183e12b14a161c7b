//! Shape-preserving (PCHIP) derivative estimation.
//!
//! Derivatives are chosen so that the Hermite cubic never overshoots the
//! data: on every interval where the samples are monotone the interpolant
//! is monotone too, and local extrema of the data stay local extrema.
//!
//! # Algorithm
//!
//! With spacings `h[k]` and secant slopes `m[k]`:
//!
//! - Interior node `k`: zero if `m[k-1]` and `m[k]` differ in sign or either
//!   is zero, otherwise the weighted harmonic mean
//!   `(w1 + w2) / (w1 / m[k-1] + w2 / m[k])` with `w1 = 2h[k] + h[k-1]` and
//!   `w2 = h[k] + 2h[k-1]`
//! - End nodes: the non-centred three-point estimate
//!   `((2h0 + h1) m0 - h0 m1) / (h0 + h1)`, set to zero when its sign differs
//!   from `m0`, and clamped to `3 m0` when `m0` and `m1` differ in sign and
//!   the estimate exceeds `3|m0|`
//! - Two nodes: both derivatives equal the single slope

use ndarray::{Array2, ArrayBase, ArrayD, Data, Dimension};
use num_traits::Float;
use tracing::debug;

use super::batch::try_map_columns;
use super::config::{Extrapolate, SplineConfig};
use super::hermite::build_with;
use super::ppoly::PiecewisePolynomial;
use super::traits::DerivativeEstimator;
use super::validation::SampleSet;
use crate::types::{real_const, sign, InterpolationError, Result, SampleValue};

/// Monotonicity-preserving node derivatives (Fritsch-Butland weighting).
///
/// Only real values are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotoneSlopes;

impl<T: SampleValue> DerivativeEstimator<T> for MonotoneSlopes {
    fn node_derivatives(&self, samples: &SampleSet<T>) -> Result<Array2<T>> {
        if T::IS_COMPLEX {
            return Err(InterpolationError::UnsupportedDataType(
                "`y` must contain only real values for monotone interpolation".to_string(),
            ));
        }

        let h = samples.dx();
        let slopes = samples.slopes();
        let n = samples.len();

        try_map_columns(n, samples.batch_len(), |j| {
            let m: Vec<T::Real> = slopes.column(j).iter().map(|s| s.real_part()).collect();
            Ok(column_derivatives(h, &m)
                .into_iter()
                .map(T::from_real)
                .collect())
        })
    }
}

/// Node derivatives for one series with spacings `h` and slopes `m`.
fn column_derivatives<F: Float>(h: &[F], m: &[F]) -> Vec<F> {
    let n = h.len() + 1;
    if n == 2 {
        return vec![m[0], m[0]];
    }

    let two: F = real_const(2.0);
    let mut d = vec![F::zero(); n];
    for k in 1..n - 1 {
        if sign(m[k - 1]) * sign(m[k]) <= F::zero() {
            continue;
        }
        let w1 = two * h[k] + h[k - 1];
        let w2 = h[k] + two * h[k - 1];
        d[k] = (w1 + w2) / (w1 / m[k - 1] + w2 / m[k]);
    }

    d[0] = edge_derivative(h[0], h[1], m[0], m[1]);
    d[n - 1] = edge_derivative(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
    d
}

/// One-sided three-point estimate at an end node.
///
/// `h0`, `m0` belong to the interval touching the end, `h1`, `m1` to its
/// neighbour.
fn edge_derivative<F: Float>(h0: F, h1: F, m0: F, m1: F) -> F {
    let two: F = real_const(2.0);
    let three: F = real_const(3.0);

    let d = ((two * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if sign(d) != sign(m0) {
        F::zero()
    } else if sign(m0) != sign(m1) && d.abs() > three * m0.abs() {
        three * m0
    } else {
        d
    }
}

/// Monotone piecewise-cubic interpolant of `y` sampled at `x`.
///
/// # Errors
///
/// * Validation errors from [`SampleSet::new`]
/// * `UnsupportedDataType` - `y` is complex
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use spline_core::math::interpolators::{build_monotone, SplineConfig};
///
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let y = array![0.0, 0.0, 1.0, 1.0];
/// let pp = build_monotone(&x, &y, &SplineConfig::default()).unwrap();
///
/// // Flat sections stay flat
/// assert_eq!(pp.value_at(0.5).unwrap(), 0.0);
/// assert_eq!(pp.value_at(2.5).unwrap(), 1.0);
/// ```
pub fn build_monotone<T, Sx, Sy, Dx, Dy>(
    x: &ArrayBase<Sx, Dx>,
    y: &ArrayBase<Sy, Dy>,
    config: &SplineConfig,
) -> Result<PiecewisePolynomial<T>>
where
    T: SampleValue,
    Sx: Data<Elem = T::Real>,
    Sy: Data<Elem = T>,
    Dx: Dimension,
    Dy: Dimension,
{
    let samples = SampleSet::new(x, y, config.axis)?;
    debug!(
        nodes = samples.len(),
        columns = samples.batch_len(),
        "building monotone interpolant"
    );
    build_with(
        &MonotoneSlopes,
        &samples,
        config.extrapolate_or(Extrapolate::Extend),
    )
}

/// Build a monotone interpolant and evaluate its `order`-th derivative at `xq`.
///
/// Output shape follows [`PiecewisePolynomial::call`].
pub fn evaluate_monotone<T, Sx, Sy, Sq, Dx, Dy, Dq>(
    xk: &ArrayBase<Sx, Dx>,
    yk: &ArrayBase<Sy, Dy>,
    xq: &ArrayBase<Sq, Dq>,
    order: usize,
    config: &SplineConfig,
) -> Result<ArrayD<T>>
where
    T: SampleValue,
    Sx: Data<Elem = T::Real>,
    Sy: Data<Elem = T>,
    Sq: Data<Elem = T::Real>,
    Dx: Dimension,
    Dy: Dimension,
    Dq: Dimension,
{
    build_monotone(xk, yk, config)?.call(xq, order)
}

/// Build a monotone interpolant once and evaluate several derivative orders.
///
/// Results come back in the order of `orders`.
pub fn evaluate_monotone_orders<T, Sx, Sy, Sq, Dx, Dy, Dq>(
    xk: &ArrayBase<Sx, Dx>,
    yk: &ArrayBase<Sy, Dy>,
    xq: &ArrayBase<Sq, Dq>,
    orders: &[usize],
    config: &SplineConfig,
) -> Result<Vec<ArrayD<T>>>
where
    T: SampleValue,
    Sx: Data<Elem = T::Real>,
    Sy: Data<Elem = T>,
    Sq: Data<Elem = T::Real>,
    Dx: Dimension,
    Dy: Dimension,
    Dq: Dimension,
{
    let pp = build_monotone(xk, yk, config)?;
    orders.iter().map(|&nu| pp.call(xq, nu)).collect()
}
