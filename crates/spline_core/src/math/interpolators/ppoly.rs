//! Piecewise polynomials in the local power basis.

use ndarray::{Array2, Array3, ArrayBase, ArrayD, Axis, Data, Dimension, IxDyn};
use num_traits::{Float, Zero};

use super::config::Extrapolate;
use crate::types::{real_from_usize, InterpolationError, Result, SampleValue};

/// Piecewise polynomial over breakpoints `x[0] < x[1] < ... < x[n-1]`.
///
/// On interval `i` (between `x[i]` and `x[i+1]`) column `j` of the batch
/// evaluates to
///
/// ```text
/// S(x) = sum_{m=0}^{k-1} c[m, i, j] * (x - x[i])^(k-1-m)
/// ```
///
/// so row 0 of `c` holds the highest power. Batch columns are the flattened
/// trailing dimensions of the original `y`; `batch_shape` and `axis` restore
/// them on output.
///
/// # Example
///
/// ```
/// use ndarray::Array3;
/// use spline_core::math::interpolators::{Extrapolate, PiecewisePolynomial};
///
/// // S(x) = x^2 on [0, 1], then 1 + 2(x - 1) on [1, 2]
/// let mut c = Array3::<f64>::zeros((3, 2, 1));
/// c[[0, 0, 0]] = 1.0;
/// c[[1, 1, 0]] = 2.0;
/// c[[2, 1, 0]] = 1.0;
/// let pp = PiecewisePolynomial::new(c, vec![0.0, 1.0, 2.0], Extrapolate::Extend).unwrap();
///
/// assert!((pp.value_at(0.5).unwrap() - 0.25).abs() < 1e-15);
/// assert!((pp.value_at(1.5).unwrap() - 2.0).abs() < 1e-15);
/// assert!((pp.derivative_at(0.5, 1).unwrap() - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewisePolynomial<T: SampleValue> {
    /// Coefficients with shape `(k, n-1, m)`
    c: Array3<T>,
    /// Breakpoints
    x: Vec<T::Real>,
    /// Out-of-domain policy
    extrapolate: Extrapolate,
    /// Batch dimensions of the original values
    batch_shape: Vec<usize>,
    /// Position of the query dimensions in evaluation output
    axis: usize,
}

impl<T: SampleValue> PiecewisePolynomial<T> {
    /// Create a piecewise polynomial with a flat batch of `c.shape()[2]` columns.
    ///
    /// # Errors
    ///
    /// * `InvalidShape` - fewer than 2 breakpoints, zero order, or interval count
    ///   not matching `x.len() - 1`
    /// * `NonFiniteInput` - non-finite breakpoints
    /// * `NonIncreasingDomain` - breakpoints not strictly increasing
    pub fn new(c: Array3<T>, x: Vec<T::Real>, extrapolate: Extrapolate) -> Result<Self> {
        let m = c.shape()[2];
        Self::with_batch(c, x, extrapolate, vec![m], 0)
    }

    /// Create a piecewise polynomial whose batch columns unflatten to
    /// `batch_shape`, with query dimensions inserted at `axis` on output.
    ///
    /// # Errors
    ///
    /// As [`PiecewisePolynomial::new`], plus `InvalidShape` if the product of
    /// `batch_shape` differs from `c.shape()[2]` or `axis > batch_shape.len()`.
    pub fn with_batch(
        c: Array3<T>,
        x: Vec<T::Real>,
        extrapolate: Extrapolate,
        batch_shape: Vec<usize>,
        axis: usize,
    ) -> Result<Self> {
        let (k, intervals, m) = c.dim();
        if x.len() < 2 {
            return Err(InterpolationError::invalid_shape(format!(
                "at least 2 breakpoints are needed: got {}",
                x.len()
            )));
        }
        if k == 0 {
            return Err(InterpolationError::invalid_shape(
                "polynomial order must be at least 1",
            ));
        }
        if intervals != x.len() - 1 {
            return Err(InterpolationError::invalid_shape(format!(
                "coefficients describe {} intervals but there are {} breakpoints",
                intervals,
                x.len()
            )));
        }
        if batch_shape.iter().product::<usize>() != m {
            return Err(InterpolationError::invalid_shape(format!(
                "batch shape {:?} does not hold {} columns",
                batch_shape, m
            )));
        }
        if axis > batch_shape.len() {
            return Err(InterpolationError::invalid_shape(format!(
                "output axis {} exceeds batch rank {}",
                axis,
                batch_shape.len()
            )));
        }
        if !x.iter().all(|v| v.is_finite()) {
            return Err(InterpolationError::non_finite("x"));
        }
        if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InterpolationError::NonIncreasingDomain { index });
        }

        Ok(Self {
            c,
            x,
            extrapolate,
            batch_shape,
            axis,
        })
    }

    /// Coefficient array with shape `(k, n-1, m)`.
    #[inline]
    pub fn coefficients(&self) -> &Array3<T> {
        &self.c
    }

    /// Coefficients with the batch dimensions restored: `(k, n-1, batch...)`.
    pub fn coefficients_nd(&self) -> Result<ArrayD<T>> {
        let (k, intervals, _) = self.c.dim();
        let mut shape = vec![k, intervals];
        shape.extend_from_slice(&self.batch_shape);
        let data: Vec<T> = self.c.iter().copied().collect();
        ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|e| InterpolationError::invalid_shape(e.to_string()))
    }

    /// Breakpoints.
    #[inline]
    pub fn breakpoints(&self) -> &[T::Real] {
        &self.x
    }

    /// Number of coefficients per interval (degree + 1).
    #[inline]
    pub fn order(&self) -> usize {
        self.c.shape()[0]
    }

    /// Number of intervals.
    #[inline]
    pub fn intervals(&self) -> usize {
        self.x.len() - 1
    }

    /// Number of flattened batch columns.
    #[inline]
    pub fn batch_len(&self) -> usize {
        self.c.shape()[2]
    }

    /// Batch dimensions of the evaluated values.
    #[inline]
    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    /// Position of the query dimensions in evaluation output.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Out-of-domain policy.
    #[inline]
    pub fn extrapolate(&self) -> Extrapolate {
        self.extrapolate
    }

    /// Replace the out-of-domain policy.
    pub fn with_extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    /// First and last breakpoint.
    #[inline]
    pub fn domain(&self) -> (T::Real, T::Real) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Find the interval containing `xq` and the offset from its left end.
    ///
    /// Returns `Ok(None)` for a NaN query.
    fn locate(&self, xq: T::Real) -> Result<Option<(usize, T::Real)>> {
        if xq.is_nan() {
            return Ok(None);
        }
        let (lo, hi) = self.domain();
        let xq = match self.extrapolate {
            Extrapolate::Periodic => wrap_periodic(xq, lo, hi),
            Extrapolate::Forbid if xq < lo || xq > hi => {
                return Err(out_of_bounds(xq, lo, hi));
            }
            _ => xq,
        };
        let i = find_interval(&self.x, xq);
        Ok(Some((i, xq - self.x[i])))
    }

    /// Evaluate the `nu`-th derivative at every query point.
    ///
    /// The output shape is `batch_shape[..axis] + xq.shape() + batch_shape[axis..]`.
    /// NaN queries produce NaN values.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` for a query outside the domain when extrapolation is
    /// forbidden.
    pub fn call<S, D>(&self, xq: &ArrayBase<S, D>, nu: usize) -> Result<ArrayD<T>>
    where
        S: Data<Elem = T::Real>,
        D: Dimension,
    {
        let m = self.batch_len();
        let queries: Vec<T::Real> = xq.iter().copied().collect();
        let mut flat = Array2::from_elem((queries.len(), m), T::zero());

        for (q, mut row) in queries.iter().zip(flat.axis_iter_mut(Axis(0))) {
            match self.locate(*q)? {
                Some((i, s)) => {
                    for (j, out) in row.iter_mut().enumerate() {
                        *out = eval_local(&self.c, i, s, nu, j);
                    }
                }
                None => row.fill(T::from_real(T::Real::nan())),
            }
        }

        let q_shape = xq.shape().to_vec();
        let mut shape = q_shape.clone();
        shape.extend_from_slice(&self.batch_shape);
        let data: Vec<T> = flat.iter().copied().collect();
        let out = ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|e| InterpolationError::invalid_shape(e.to_string()))?;

        if self.axis == 0 || q_shape.is_empty() {
            return Ok(out);
        }
        let qn = q_shape.len();
        let bn = self.batch_shape.len();
        let perm: Vec<usize> = (qn..qn + self.axis)
            .chain(0..qn)
            .chain(qn + self.axis..qn + bn)
            .collect();
        Ok(out.permuted_axes(IxDyn(&perm)).as_standard_layout().into_owned())
    }

    /// Evaluate at every query point.
    pub fn evaluate_array<S, D>(&self, xq: &ArrayBase<S, D>) -> Result<ArrayD<T>>
    where
        S: Data<Elem = T::Real>,
        D: Dimension,
    {
        self.call(xq, 0)
    }

    /// Evaluate at a single point; the result has shape `batch_shape`.
    pub fn evaluate(&self, xq: T::Real) -> Result<ArrayD<T>> {
        self.call(&ndarray::arr0(xq), 0)
    }

    /// Evaluate the `nu`-th derivative at a single point.
    pub fn evaluate_derivative(&self, xq: T::Real, nu: usize) -> Result<ArrayD<T>> {
        self.call(&ndarray::arr0(xq), nu)
    }

    /// Value of a single-series polynomial at `xq`.
    ///
    /// # Errors
    ///
    /// `InvalidShape` if the polynomial carries more than one batch column,
    /// `OutOfBounds` as for [`call`](Self::call).
    pub fn value_at(&self, xq: T::Real) -> Result<T> {
        self.derivative_at(xq, 0)
    }

    /// `nu`-th derivative of a single-series polynomial at `xq`.
    pub fn derivative_at(&self, xq: T::Real, nu: usize) -> Result<T> {
        if self.batch_len() != 1 {
            return Err(InterpolationError::invalid_shape(format!(
                "scalar evaluation needs a single series: got {} columns",
                self.batch_len()
            )));
        }
        Ok(match self.locate(xq)? {
            Some((i, s)) => eval_local(&self.c, i, s, nu, 0),
            None => T::from_real(T::Real::nan()),
        })
    }

    /// Piecewise polynomial of the `nu`-th derivative.
    ///
    /// Differentiating at least `order()` times leaves the zero polynomial
    /// with a single coefficient per interval.
    pub fn derivative(&self, nu: usize) -> Self {
        if nu == 0 {
            return self.clone();
        }
        let (k, intervals, m) = self.c.dim();
        let c = if nu >= k {
            Array3::from_elem((1, intervals, m), T::zero())
        } else {
            Array3::from_shape_fn((k - nu, intervals, m), |(row, i, j)| {
                let power = k - 1 - row;
                self.c[[row, i, j]].scale(falling_factorial(power, nu))
            })
        };
        self.with_coefficients(c)
    }

    /// Piecewise polynomial of the `nu`-th antiderivative.
    ///
    /// Integration constants make the result continuous and zero at `x[0]`,
    /// together with its first `nu - 1` derivatives. A periodic policy becomes
    /// `Extend`, since the antiderivative is generally not periodic.
    pub fn antiderivative(&self, nu: usize) -> Self {
        if nu == 0 {
            return self.clone();
        }
        let (k, intervals, m) = self.c.dim();
        let order = k + nu;
        let mut c = Array3::from_elem((order, intervals, m), T::zero());
        for row in 0..k {
            let power = k - 1 - row;
            let factor = falling_factorial(power + nu, nu);
            for i in 0..intervals {
                for j in 0..m {
                    c[[row, i, j]] = self.c[[row, i, j]].unscale(factor);
                }
            }
        }

        // Match values and lower derivatives at each interior breakpoint.
        for i in 1..intervals {
            let h = self.x[i] - self.x[i - 1];
            for d in (0..nu).rev() {
                let fact = falling_factorial(d, d);
                for j in 0..m {
                    let v = eval_local(&c, i - 1, h, d, j);
                    c[[order - 1 - d, i, j]] = v.unscale(fact);
                }
            }
        }

        let extrapolate = match self.extrapolate {
            Extrapolate::Periodic => Extrapolate::Extend,
            other => other,
        };
        self.with_coefficients(c).with_extrapolate(extrapolate)
    }

    /// Definite integral from `a` to `b`, with shape `batch_shape`.
    ///
    /// Reversed bounds negate the result. Under a periodic policy whole
    /// periods are counted once and the remainder is wrapped.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if a bound lies outside the domain when extrapolation is
    /// forbidden.
    pub fn integrate(&self, a: T::Real, b: T::Real) -> Result<ArrayD<T>> {
        let (lo, hi) = self.domain();
        let (a, b, negate) = if b < a { (b, a, true) } else { (a, b, false) };
        let anti = self.antiderivative(1).with_extrapolate(Extrapolate::Extend);
        let m = self.batch_len();

        let total: Vec<T> = match self.extrapolate {
            Extrapolate::Forbid => {
                for bound in [a, b] {
                    if bound < lo || bound > hi {
                        return Err(out_of_bounds(bound, lo, hi));
                    }
                }
                anti.span(a, b)
            }
            Extrapolate::Extend => anti.span(a, b),
            Extrapolate::Periodic => {
                let period = hi - lo;
                let length = b - a;
                let periods = (length / period).floor();
                let remainder = length - periods * period;

                let mut total = vec![T::zero(); m];
                if periods > T::Real::zero() {
                    for (t, v) in total.iter_mut().zip(anti.span(lo, hi)) {
                        *t = v.scale(periods);
                    }
                }
                let start = wrap_periodic(a, lo, hi);
                let end = start + remainder;
                let pieces = if end <= hi {
                    anti.span(start, end)
                } else {
                    let head = anti.span(start, hi);
                    let tail = anti.span(lo, lo + (end - hi));
                    head.into_iter().zip(tail).map(|(p, q)| p + q).collect()
                };
                total
                    .into_iter()
                    .zip(pieces)
                    .map(|(t, p)| t + p)
                    .collect()
            }
        };

        let total: Vec<T> = if negate {
            total.into_iter().map(|v| -v).collect()
        } else {
            total
        };
        ArrayD::from_shape_vec(IxDyn(&self.batch_shape), total)
            .map_err(|e| InterpolationError::invalid_shape(e.to_string()))
    }

    /// `F(b) - F(a)` per column, evaluating with extension.
    fn span(&self, a: T::Real, b: T::Real) -> Vec<T> {
        let ia = find_interval(&self.x, a);
        let ib = find_interval(&self.x, b);
        let (sa, sb) = (a - self.x[ia], b - self.x[ib]);
        (0..self.batch_len())
            .map(|j| eval_local(&self.c, ib, sb, 0, j) - eval_local(&self.c, ia, sa, 0, j))
            .collect()
    }

    fn with_coefficients(&self, c: Array3<T>) -> Self {
        Self {
            c,
            x: self.x.clone(),
            extrapolate: self.extrapolate,
            batch_shape: self.batch_shape.clone(),
            axis: self.axis,
        }
    }
}

/// Interval index `i` with `x[i] <= xq < x[i+1]`, clamped to `[0, n-2]`.
///
/// The last breakpoint belongs to the last interval.
#[inline]
fn find_interval<F: Float>(x: &[F], xq: F) -> usize {
    let pos = x.partition_point(|&xi| xi <= xq);
    if pos == 0 {
        0
    } else if pos >= x.len() {
        x.len() - 2
    } else {
        pos - 1
    }
}

/// Map `xq` into `[lo, hi)` with period `hi - lo`.
#[inline]
fn wrap_periodic<F: Float>(xq: F, lo: F, hi: F) -> F {
    let period = hi - lo;
    let r = (xq - lo) % period;
    if r < F::zero() {
        lo + r + period
    } else {
        lo + r
    }
}

fn out_of_bounds<F: Float>(xq: F, lo: F, hi: F) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: xq.to_f64().unwrap_or(f64::NAN),
        min: lo.to_f64().unwrap_or(f64::NAN),
        max: hi.to_f64().unwrap_or(f64::NAN),
    }
}

/// `p * (p-1) * ... * (p-nu+1)`, the factor produced by differentiating
/// `s^p` `nu` times.
#[inline]
fn falling_factorial<F: Float>(p: usize, nu: usize) -> F {
    if nu > p {
        return F::zero();
    }
    (p + 1 - nu..=p).fold(F::one(), |acc, f| acc * real_from_usize::<F>(f))
}

/// `nu`-th derivative of column `j` of interval `i` at local offset `s`.
fn eval_local<T: SampleValue>(c: &Array3<T>, i: usize, s: T::Real, nu: usize, j: usize) -> T {
    let k = c.shape()[0];
    if nu >= k {
        return T::zero();
    }
    let mut acc = T::zero();
    for row in 0..k - nu {
        let power = k - 1 - row;
        acc = acc.scale(s) + c[[row, i, j]].scale(falling_factorial(power, nu));
    }
    acc
}
