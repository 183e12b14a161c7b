//! C² cubic splines with configurable boundary conditions.
//!
//! Node derivatives `s` solve a tridiagonal system whose interior rows
//! enforce continuity of the second derivative:
//!
//! ```text
//! dx[i] s[i-1] + 2 (dx[i-1] + dx[i]) s[i] + dx[i-1] s[i+1]
//!     = 3 (dx[i] slope[i-1] + dx[i-1] slope[i])
//! ```
//!
//! The first and last rows come from the boundary conditions. Periodic
//! splines close the system into a cyclic one, solved with a rank-one
//! correction of the open band.

use ndarray::{Array2, ArrayBase, Data, Dimension};
use num_traits::{Float, One, Zero};
use tracing::{debug, trace};

use super::batch::try_map_columns;
use super::boundary::{BoundaryConditions, EndCondition};
use super::config::{Extrapolate, SplineConfig};
use super::hermite::build_with;
use super::ppoly::PiecewisePolynomial;
use super::traits::DerivativeEstimator;
use super::validation::SampleSet;
use crate::math::linalg::{DenseLu, TridiagonalLu};
use crate::types::{real_const, Result, SampleValue};

/// Node derivatives of the C² cubic spline for a pair of boundary conditions.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use spline_core::math::interpolators::{
///     build_with, BoundaryConditions, DerivativeEstimator, Extrapolate, SampleSet, SplineSlopes,
/// };
///
/// let samples = SampleSet::new(&array![0.0, 1.0, 2.0, 3.0], &array![0.0_f64, 1.0, 8.0, 27.0], 0).unwrap();
/// let estimator = SplineSlopes::new(BoundaryConditions::default());
///
/// // Not-a-knot reproduces x^3 exactly
/// let s = estimator.node_derivatives(&samples).unwrap();
/// assert!((s[[2, 0]] - 12.0).abs() < 1e-12);
///
/// let pp = build_with(&estimator, &samples, Extrapolate::Extend).unwrap();
/// assert!((pp.value_at(1.5).unwrap() - 3.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SplineSlopes<T: SampleValue> {
    conditions: BoundaryConditions<T>,
    periodic_rtol: f64,
    periodic_atol: f64,
}

impl<T: SampleValue> SplineSlopes<T> {
    /// Estimator for `conditions` with the default periodic tolerances.
    pub fn new(conditions: BoundaryConditions<T>) -> Self {
        let defaults = SplineConfig::default();
        Self {
            conditions,
            periodic_rtol: defaults.periodic_rtol,
            periodic_atol: defaults.periodic_atol,
        }
    }

    /// Set the tolerances for the periodic end-value check.
    pub fn with_periodic_tolerance(mut self, rtol: f64, atol: f64) -> Self {
        self.periodic_rtol = rtol;
        self.periodic_atol = atol;
        self
    }

    /// Boundary conditions in use.
    pub fn conditions(&self) -> &BoundaryConditions<T> {
        &self.conditions
    }
}

impl<T: SampleValue> DerivativeEstimator<T> for SplineSlopes<T> {
    fn node_derivatives(&self, samples: &SampleSet<T>) -> Result<Array2<T>> {
        let (start, end) =
            self.conditions
                .resolve(samples, self.periodic_rtol, self.periodic_atol)?;
        solve_node_derivatives(samples, start, end)
    }
}

fn solve_node_derivatives<T: SampleValue>(
    samples: &SampleSet<T>,
    start: EndCondition<T>,
    end: EndCondition<T>,
) -> Result<Array2<T>> {
    let n = samples.len();
    let m = samples.batch_len();
    let slopes = samples.slopes();

    // Two nodes: only the chord is available.
    let (start, end) = if n == 2 {
        let chord = || EndCondition::Derivative {
            order: 1,
            values: slopes.row(0).to_vec(),
        };
        let lift = |c: EndCondition<T>| match c {
            EndCondition::NotAKnot | EndCondition::Periodic => chord(),
            other => other,
        };
        (lift(start), lift(end))
    } else {
        (start, end)
    };

    match (&start, &end) {
        (EndCondition::NotAKnot, EndCondition::NotAKnot) if n == 3 => {
            trace!("three-node not-a-knot: dense solve");
            three_node_not_a_knot(samples, &slopes)
        }
        (EndCondition::Periodic, _) if n == 3 => {
            trace!("three-node periodic: constant derivative");
            Ok(three_node_periodic(samples, &slopes))
        }
        (EndCondition::Periodic, _) => {
            trace!(nodes = n, columns = m, "periodic: cyclic tridiagonal solve");
            periodic(samples, &slopes)
        }
        _ => {
            trace!(nodes = n, columns = m, "tridiagonal solve");
            banded(samples, &slopes, &start, &end)
        }
    }
}

/// Every node derivative of the single parabola through three points.
fn three_node_not_a_knot<T: SampleValue>(
    samples: &SampleSet<T>,
    slopes: &Array2<T>,
) -> Result<Array2<T>> {
    let dx = samples.dx();
    let one = T::Real::one();
    let zero = T::Real::zero();
    let two: T::Real = real_const(2.0);
    let three: T::Real = real_const(3.0);

    #[rustfmt::skip]
    let a = vec![
        one,   one,                    zero,
        dx[1], two * (dx[0] + dx[1]), dx[0],
        zero,  one,                    one,
    ];
    let lu = DenseLu::factor(3, a)?;

    try_map_columns(3, samples.batch_len(), |j| {
        let (m0, m1) = (slopes[[0, j]], slopes[[1, j]]);
        let b = [
            m0.scale(two),
            (m1.scale(dx[0]) + m0.scale(dx[1])).scale(three),
            m1.scale(two),
        ];
        Ok(lu.solve(&b))
    })
}

/// Periodic spline through three points: one shared derivative per column.
fn three_node_periodic<T: SampleValue>(samples: &SampleSet<T>, slopes: &Array2<T>) -> Array2<T> {
    let dx = samples.dx();
    let weight: T::Real = dx.iter().fold(T::Real::zero(), |acc, &h| acc + h.recip());
    Array2::from_shape_fn((3, samples.batch_len()), |(_, j)| {
        let total = slopes
            .column(j)
            .iter()
            .zip(dx)
            .fold(T::zero(), |acc, (&s, &h)| acc + s.unscale(h));
        total.unscale(weight)
    })
}

/// Right-hand side of interior row `i`.
#[inline]
fn interior_rhs<T: SampleValue>(dx: &[T::Real], slopes: &Array2<T>, i: usize, j: usize) -> T {
    let three: T::Real = real_const(3.0);
    (slopes[[i - 1, j]].scale(dx[i]) + slopes[[i, j]].scale(dx[i - 1])).scale(three)
}

/// Open tridiagonal system for not-a-knot and derivative conditions.
fn banded<T: SampleValue>(
    samples: &SampleSet<T>,
    slopes: &Array2<T>,
    start: &EndCondition<T>,
    end: &EndCondition<T>,
) -> Result<Array2<T>> {
    let n = samples.len();
    let x = samples.x();
    let dx = samples.dx();
    let y = samples.y();
    let two: T::Real = real_const(2.0);
    let three: T::Real = real_const(3.0);
    let half: T::Real = real_const(0.5);

    // Row i is sub[i-1], diag[i], sup[i].
    let mut sub = vec![T::Real::zero(); n - 1];
    let mut diag = vec![T::Real::zero(); n];
    let mut sup = vec![T::Real::zero(); n - 1];
    for i in 1..n - 1 {
        sub[i - 1] = dx[i];
        diag[i] = two * (dx[i - 1] + dx[i]);
        sup[i] = dx[i - 1];
    }

    match start {
        EndCondition::NotAKnot => {
            diag[0] = dx[1];
            sup[0] = x[2] - x[0];
        }
        EndCondition::Derivative { order: 1, .. } => {
            diag[0] = T::Real::one();
            sup[0] = T::Real::zero();
        }
        _ => {
            diag[0] = two * dx[0];
            sup[0] = dx[0];
        }
    }
    match end {
        EndCondition::NotAKnot => {
            diag[n - 1] = dx[n - 3];
            sub[n - 2] = x[n - 1] - x[n - 3];
        }
        EndCondition::Derivative { order: 1, .. } => {
            diag[n - 1] = T::Real::one();
            sub[n - 2] = T::Real::zero();
        }
        _ => {
            diag[n - 1] = two * dx[n - 2];
            sub[n - 2] = dx[n - 2];
        }
    }

    let lu = TridiagonalLu::factor(sub, diag, sup)?;

    try_map_columns(n, samples.batch_len(), |j| {
        let mut b: Vec<T> = Vec::with_capacity(n);

        b.push(match start {
            EndCondition::NotAKnot => {
                let d = x[2] - x[0];
                (slopes[[0, j]].scale((dx[0] + two * d) * dx[1])
                    + slopes[[1, j]].scale(dx[0] * dx[0]))
                .unscale(d)
            }
            EndCondition::Derivative { order: 1, values } => values[j],
            EndCondition::Derivative { values, .. } => {
                (y[[1, j]] - y[[0, j]]).scale(three) - values[j].scale(half * dx[0] * dx[0])
            }
            EndCondition::Periodic => T::zero(),
        });
        for i in 1..n - 1 {
            b.push(interior_rhs(dx, slopes, i, j));
        }
        b.push(match end {
            EndCondition::NotAKnot => {
                let d = x[n - 1] - x[n - 3];
                let h = dx[n - 2];
                (slopes[[n - 3, j]].scale(h * h) + slopes[[n - 2, j]].scale((two * d + h) * dx[n - 3]))
                    .unscale(d)
            }
            EndCondition::Derivative { order: 1, values } => values[j],
            EndCondition::Derivative { values, .. } => {
                let h = dx[n - 2];
                (y[[n - 1, j]] - y[[n - 2, j]]).scale(three) + values[j].scale(half * h * h)
            }
            EndCondition::Periodic => T::zero(),
        });

        lu.solve_in_place(&mut b);
        Ok(b)
    })
}

/// Cyclic system for `n >= 4`.
///
/// Unknowns are `s[0..n-1]` (`s[n-1] = s[0]`). The leading `n-2` rows form
/// an open band `Ac`; the coupling to `s[n-2]` is handled by solving `Ac`
/// against the right-hand side and against the coupling column, then fixing
/// `s[n-2]` from the last cyclic row.
fn periodic<T: SampleValue>(samples: &SampleSet<T>, slopes: &Array2<T>) -> Result<Array2<T>> {
    let n = samples.len();
    let dx = samples.dx();
    let two: T::Real = real_const(2.0);
    let three: T::Real = real_const(3.0);
    let p = n - 2;
    let last = n - 2;

    let mut sub = vec![T::Real::zero(); p - 1];
    let mut diag = vec![T::Real::zero(); p];
    let mut sup = vec![T::Real::zero(); p - 1];
    diag[0] = two * (dx[last] + dx[0]);
    sup[0] = dx[last];
    for i in 1..p {
        sub[i - 1] = dx[i];
        diag[i] = two * (dx[i - 1] + dx[i]);
        if i < p - 1 {
            sup[i] = dx[i - 1];
        }
    }
    let lu = TridiagonalLu::factor(sub, diag, sup)?;

    // Coupling column of s[n-2] in the leading rows, moved to the right.
    let mut coupling = vec![T::zero(); p];
    coupling[0] = T::from_real(-dx[0]);
    coupling[p - 1] = T::from_real(-dx[n - 4]);
    let s2 = lu.solve(&coupling);

    let a_last_first = dx[n - 3];
    let a_last_prev = dx[n - 2];
    let a_last_last = two * (dx[n - 2] + dx[n - 3]);
    let denom =
        T::from_real(a_last_last) + s2[0].scale(a_last_first) + s2[p - 1].scale(a_last_prev);

    try_map_columns(n, samples.batch_len(), |j| {
        let mut b: Vec<T> = Vec::with_capacity(p);
        b.push((slopes[[last, j]].scale(dx[0]) + slopes[[0, j]].scale(dx[last])).scale(three));
        for i in 1..p {
            b.push(interior_rhs(dx, slopes, i, j));
        }
        let b_last =
            (slopes[[n - 3, j]].scale(dx[n - 2]) + slopes[[n - 2, j]].scale(dx[n - 3])).scale(three);

        let s1 = lu.solve(&b);
        let s_last = (b_last - s1[0].scale(a_last_first) - s1[p - 1].scale(a_last_prev)) / denom;

        let mut s: Vec<T> = s1
            .iter()
            .zip(&s2)
            .map(|(&u, &v)| u + s_last * v)
            .collect();
        s.push(s_last);
        s.push(s[0]);
        Ok(s)
    })
}

/// C² cubic spline of `y` sampled at `x` under the given boundary conditions.
///
/// With `config.extrapolate` unset, a periodic pair yields a periodic
/// polynomial and anything else extends the end polynomials.
///
/// # Errors
///
/// * Validation errors from [`SampleSet::new`]
/// * `InvalidBoundaryCondition` - bad derivative order or value shape,
///   periodic mixed with another condition, or periodic data whose first and
///   last values differ
/// * `SingularMatrix` - breakdown of the linear solve
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use spline_core::math::interpolators::{build_boundary_spline, BoundaryConditions, SplineConfig};
///
/// let x = array![0.0, 1.0, 2.0, 3.0];
/// let y = array![0.0_f64, 1.0, 0.0, -1.0];
/// let pp = build_boundary_spline(&x, &y, &BoundaryConditions::natural(), &SplineConfig::default())
///     .unwrap();
///
/// // Natural ends carry no curvature
/// assert!(pp.derivative_at(0.0, 2).unwrap().abs() < 1e-12);
/// assert!(pp.derivative_at(3.0, 2).unwrap().abs() < 1e-12);
/// ```
pub fn build_boundary_spline<T, Sx, Sy, Dx, Dy>(
    x: &ArrayBase<Sx, Dx>,
    y: &ArrayBase<Sy, Dy>,
    conditions: &BoundaryConditions<T>,
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
    let fallback = if conditions.is_periodic() {
        Extrapolate::Periodic
    } else {
        Extrapolate::Extend
    };
    debug!(
        nodes = samples.len(),
        columns = samples.batch_len(),
        start = %conditions.start,
        end = %conditions.end,
        "building cubic spline"
    );
    let estimator = SplineSlopes::new(conditions.clone())
        .with_periodic_tolerance(config.periodic_rtol, config.periodic_atol);
    build_with(&estimator, &samples, config.extrapolate_or(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::BoundaryCondition;
    use crate::types::InterpolationError;
    use approx::assert_relative_eq;
    use ndarray::{arr0, array, Array1};
    use num_complex::Complex64;

    fn spline(
        x: &Array1<f64>,
        y: &Array1<f64>,
        bc: BoundaryConditions<f64>,
    ) -> PiecewisePolynomial<f64> {
        build_boundary_spline(x, y, &bc, &SplineConfig::default()).unwrap()
    }

    // ========================================
    // Not-a-knot Tests
    // ========================================

    #[test]
    fn test_not_a_knot_reproduces_cubic() {
        let x = array![0.0, 0.7, 1.5, 2.0, 3.2, 4.0];
        let f = |t: f64| t * t * t - 2.0 * t * t + 0.5;
        let pp = spline(&x, &x.mapv(f), BoundaryConditions::default());
        for &t in &[0.1, 1.0, 1.9, 2.5, 3.9] {
            assert_relative_eq!(pp.value_at(t).unwrap(), f(t), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_three_nodes_give_parabola() {
        let x = array![0.0, 1.0, 3.0];
        let f = |t: f64| 2.0 * t * t - t + 1.0;
        let pp = spline(&x, &x.mapv(f), BoundaryConditions::default());
        for &t in &[0.5, 2.0, 2.9] {
            assert_relative_eq!(pp.value_at(t).unwrap(), f(t), epsilon = 1e-12);
        }
        assert_relative_eq!(pp.derivative_at(0.5, 3).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_two_nodes_give_line() {
        let x = array![0.0, 2.0];
        let y = array![5.0, 9.0];
        for bc in [BoundaryConditions::default(), BoundaryConditions::natural()] {
            let pp = spline(&x, &y, bc);
            assert_relative_eq!(pp.derivative_at(0.7, 1).unwrap(), 2.0, epsilon = 1e-12);
            assert_relative_eq!(pp.value_at(1.0).unwrap(), 7.0, epsilon = 1e-12);
        }

        // Explicit clamped values win over the chord
        let pp = spline(
            &x,
            &y,
            BoundaryConditions::new(BoundaryCondition::Clamped, BoundaryCondition::NotAKnot),
        );
        assert_relative_eq!(pp.derivative_at(0.0, 1).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(pp.derivative_at(2.0, 1).unwrap(), 2.0, epsilon = 1e-12);
    }

    // ========================================
    // Derivative Condition Tests
    // ========================================

    #[test]
    fn test_natural_second_derivative_zero() {
        let x = array![0.0, 1.0, 2.5, 3.0, 4.5];
        let y = array![1.0, -2.0, 0.5, 3.0, 1.0];
        let pp = spline(&x, &y, BoundaryConditions::natural());
        assert_relative_eq!(pp.derivative_at(0.0, 2).unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(pp.derivative_at(4.5, 2).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_clamped_first_derivative_zero() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 2.0, 1.0, 4.0];
        let pp = spline(&x, &y, BoundaryConditions::both(BoundaryCondition::Clamped));
        assert_relative_eq!(pp.derivative_at(0.0, 1).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(pp.derivative_at(3.0, 1).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_explicit_derivatives_reproduce_cubic() {
        let x = array![-1.0, 0.0, 0.5, 2.0];
        let f = |t: f64| 0.5 * t * t * t + t * t - 3.0;
        let df = |t: f64| 1.5 * t * t + 2.0 * t;
        let d2f = |t: f64| 3.0 * t + 2.0;

        let bc = BoundaryConditions::new(
            BoundaryCondition::first_derivative(df(-1.0)),
            BoundaryCondition::second_derivative(d2f(2.0)),
        );
        let pp = spline(&x, &x.mapv(f), bc);
        for &t in &[-0.5, 0.25, 1.0, 1.8] {
            assert_relative_eq!(pp.value_at(t).unwrap(), f(t), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_interpolates_and_is_c2() {
        let x = array![0.0, 0.3, 1.1, 2.0, 2.2, 3.5];
        let y = array![0.0, 1.0, -1.0, 0.5, 0.7, 2.0];
        let pp = spline(&x, &y, BoundaryConditions::default());
        for i in 0..x.len() {
            assert_relative_eq!(pp.value_at(x[i]).unwrap(), y[i], epsilon = 1e-12);
        }
        // Second derivative continuous at interior breakpoints
        let c = pp.coefficients();
        for i in 1..x.len() - 1 {
            let h = x[i] - x[i - 1];
            let left = 6.0 * c[[0, i - 1, 0]] * h + 2.0 * c[[1, i - 1, 0]];
            let right = 2.0 * c[[1, i, 0]];
            assert_relative_eq!(left, right, epsilon = 1e-9);
        }
    }

    // ========================================
    // Periodic Tests
    // ========================================

    #[test]
    fn test_periodic_matches_ends() {
        let x = Array1::linspace(0.0, 2.0 * std::f64::consts::PI, 9);
        let mut y = x.mapv(f64::sin);
        y[8] = y[0];
        let pp = spline(&x, &y, BoundaryConditions::periodic());
        assert_eq!(pp.extrapolate(), Extrapolate::Periodic);

        let (lo, hi) = pp.domain();
        for nu in 0..3 {
            assert_relative_eq!(
                pp.derivative_at(lo, nu).unwrap(),
                pp.derivative_at(hi - 1e-12, nu).unwrap(),
                epsilon = 1e-8
            );
        }
        // Values repeat with the period
        assert_relative_eq!(
            pp.value_at(1.0).unwrap(),
            pp.value_at(1.0 + hi).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_periodic_slopes_first_equals_last() {
        let x = array![0.0, 1.0, 2.5, 3.0, 4.0];
        let y = array![1.0, 3.0, -1.0, 2.0, 1.0];
        let samples = SampleSet::new(&x, &y, 0).unwrap();
        let s = SplineSlopes::new(BoundaryConditions::periodic())
            .node_derivatives(&samples)
            .unwrap();
        assert_eq!(s[[0, 0]], s[[4, 0]]);
    }

    #[test]
    fn test_periodic_three_nodes() {
        let x = array![0.0, 1.0, 3.0];
        let y = array![1.0, 3.0, 1.0];
        let samples = SampleSet::new(&x, &y, 0).unwrap();
        let s = SplineSlopes::new(BoundaryConditions::periodic())
            .node_derivatives(&samples)
            .unwrap();
        // slopes 2 and -1, weights 1 and 1/2
        let expected = (2.0 / 1.0 + -1.0 / 2.0) / (1.0 + 0.5);
        for i in 0..3 {
            assert_relative_eq!(s[[i, 0]], expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_periodic_unequal_ends_rejected() {
        let result = build_boundary_spline(
            &array![0.0, 1.0, 2.0, 3.0],
            &array![0.0, 1.0, 0.0, 0.5],
            &BoundaryConditions::periodic(),
            &SplineConfig::default(),
        );
        assert!(matches!(
            result,
            Err(InterpolationError::InvalidBoundaryCondition(_))
        ));
    }

    #[test]
    fn test_periodic_smooth_across_wrap() {
        for n in 4..=9 {
            let x = Array1::from_shape_fn(n, |i| i as f64 + 0.3 * (i as f64).sin());
            let mut y = Array1::from_shape_fn(n, |i| ((i * 7) % 5) as f64 - 1.5 * i as f64);
            y[n - 1] = y[0];
            let pp = spline(&x, &y, BoundaryConditions::periodic())
                .with_extrapolate(Extrapolate::Extend);

            let (lo, hi) = pp.domain();
            for nu in 0..3 {
                assert_relative_eq!(
                    pp.derivative_at(lo, nu).unwrap(),
                    pp.derivative_at(hi, nu).unwrap(),
                    epsilon = 1e-9,
                    max_relative = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_extrapolate_override() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![0.0, 1.0, 0.0, 0.0];
        let config = SplineConfig::default().with_extrapolate(Extrapolate::Forbid);
        let pp = build_boundary_spline(&x, &y, &BoundaryConditions::periodic(), &config).unwrap();
        assert_eq!(pp.extrapolate(), Extrapolate::Forbid);
    }

    // ========================================
    // Batch and Complex Tests
    // ========================================

    #[test]
    fn test_batch_matches_single_builds() {
        let x = array![0.0, 1.0, 2.0, 4.0, 5.0];
        let a = array![0.0, 1.0, 4.0, 2.0, 3.0];
        let b = array![3.0, -1.0, 0.0, 2.0, 2.5];
        let mut y = Array2::zeros((2, 5));
        y.row_mut(0).assign(&a);
        y.row_mut(1).assign(&b);

        let config = SplineConfig::default().with_axis(1);
        let bc = BoundaryConditions::new(
            BoundaryCondition::derivative(1, array![0.5, -0.5].into_dyn()),
            BoundaryCondition::Natural,
        );
        let pp = build_boundary_spline(&x, &y, &bc, &config).unwrap();

        let xq = array![0.5, 3.3];
        let out = pp.evaluate_array(&xq).unwrap();
        assert_eq!(out.shape(), &[2, 2]);

        for (row, (series, d0)) in [(a, 0.5), (b, -0.5)].into_iter().enumerate() {
            let single = spline(
                &x,
                &series,
                BoundaryConditions::new(
                    BoundaryCondition::derivative(1, arr0(d0).into_dyn()),
                    BoundaryCondition::Natural,
                ),
            );
            for (q, &t) in xq.iter().enumerate() {
                assert_relative_eq!(out[[row, q]], single.value_at(t).unwrap(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_complex_equals_real_and_imaginary_parts() {
        let x = array![0.0, 1.0, 1.5, 3.0, 4.0];
        let re = array![1.0, 2.0, 0.0, -1.0, 1.0];
        let im = array![0.0, -1.0, 3.0, 2.0, 0.0];
        let z: Array1<Complex64> = re
            .iter()
            .zip(im.iter())
            .map(|(&a, &b)| Complex64::new(a, b))
            .collect();

        for bc_tag in ["not-a-knot", "natural", "periodic"] {
            let zc: BoundaryConditions<Complex64> = BoundaryConditions::parse(bc_tag, bc_tag).unwrap();
            let rc: BoundaryConditions<f64> = BoundaryConditions::parse(bc_tag, bc_tag).unwrap();
            let pz = build_boundary_spline(&x, &z, &zc, &SplineConfig::default()).unwrap();
            let pr = build_boundary_spline(&x, &re, &rc, &SplineConfig::default()).unwrap();
            let pi = build_boundary_spline(&x, &im, &rc, &SplineConfig::default()).unwrap();
            for &t in &[0.3, 1.2, 2.7, 3.9] {
                let v = pz.value_at(t).unwrap();
                assert_relative_eq!(v.re, pr.value_at(t).unwrap(), epsilon = 1e-12);
                assert_relative_eq!(v.im, pi.value_at(t).unwrap(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_validation_precedes_solve() {
        let result = build_boundary_spline(
            &array![0.0, 1.0, 1.0],
            &array![0.0, 1.0, 2.0],
            &BoundaryConditions::<f64>::parse("clamped", "natural").unwrap(),
            &SplineConfig::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonIncreasingDomain { index: 1 }
        );
    }
}
