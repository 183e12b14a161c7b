//! Sample validation and normalisation.
//!
//! Every constructor funnels its raw inputs through [`SampleSet`], which
//! checks shapes and values, moves the interpolation axis of `y` to the
//! front and flattens the remaining batch dimensions into columns.

use ndarray::{Array2, ArrayBase, ArrayViewD, Axis, Data, Dimension};
use num_traits::{Float, Zero};

use crate::types::{InterpolationError, SampleValue};

/// Validated interpolation samples.
///
/// Holds owned copies of the positions and values, so nothing borrowed from
/// the caller outlives construction.
///
/// * `x` - strictly increasing, finite positions (`n >= 2`)
/// * `y` - values with shape `(n, m)`: row `i` belongs to `x[i]`, column `j`
///   is one independent series of the flattened batch dimensions
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use spline_core::math::interpolators::SampleSet;
///
/// let x = array![0.0, 1.0, 3.0];
/// let y = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
///
/// // Series run along axis 1 of `y`
/// let samples = SampleSet::new(&x, &y, 1).unwrap();
/// assert_eq!(samples.len(), 3);
/// assert_eq!(samples.batch_shape(), &[2]);
/// assert_eq!(samples.dx(), &[1.0, 2.0]);
/// assert_eq!(samples.y()[[2, 1]], 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct SampleSet<T: SampleValue> {
    /// Sample positions
    x: Vec<T::Real>,
    /// Spacings `x[i+1] - x[i]`
    dx: Vec<T::Real>,
    /// Values, node axis first, batch dimensions flattened
    y: Array2<T>,
    /// Optional node derivatives, same layout as `y`
    dydx: Option<Array2<T>>,
    /// Shape of `y` without the interpolation axis
    batch_shape: Vec<usize>,
    /// Interpolation axis of the caller's `y`, after wrapping
    axis: usize,
}

impl<T: SampleValue> SampleSet<T> {
    /// Validate positions `x` and values `y` interpolated along `axis`.
    ///
    /// # Errors
    ///
    /// * `InvalidShape` - `x` not 1-D, fewer than 2 points, `y` rank 0, or
    ///   `y` length along `axis` differs from `x`
    /// * `NonFiniteInput` - NaN or infinity in `x` or `y`
    /// * `NonIncreasingDomain` - `x` not strictly increasing
    pub fn new<Sx, Sy, Dx, Dy>(
        x: &ArrayBase<Sx, Dx>,
        y: &ArrayBase<Sy, Dy>,
        axis: isize,
    ) -> Result<Self, InterpolationError>
    where
        Sx: Data<Elem = T::Real>,
        Sy: Data<Elem = T>,
        Dx: Dimension,
        Dy: Dimension,
    {
        Self::prepare(x.view().into_dyn(), y.view().into_dyn(), None, axis)
    }

    /// Validate samples together with caller-supplied node derivatives.
    ///
    /// `dydx` must have exactly the shape of `y`.
    ///
    /// # Errors
    ///
    /// As [`SampleSet::new`], plus `InvalidShape` for a `dydx` shape mismatch
    /// and `NonFiniteInput` for non-finite derivatives.
    pub fn with_derivatives<Sx, Sy, Sd, Dx, Dy>(
        x: &ArrayBase<Sx, Dx>,
        y: &ArrayBase<Sy, Dy>,
        dydx: &ArrayBase<Sd, Dy>,
        axis: isize,
    ) -> Result<Self, InterpolationError>
    where
        Sx: Data<Elem = T::Real>,
        Sy: Data<Elem = T>,
        Sd: Data<Elem = T>,
        Dx: Dimension,
        Dy: Dimension,
    {
        Self::prepare(
            x.view().into_dyn(),
            y.view().into_dyn(),
            Some(dydx.view().into_dyn()),
            axis,
        )
    }

    fn prepare(
        x: ArrayViewD<'_, T::Real>,
        y: ArrayViewD<'_, T>,
        dydx: Option<ArrayViewD<'_, T>>,
        axis: isize,
    ) -> Result<Self, InterpolationError> {
        if let Some(d) = &dydx {
            if d.shape() != y.shape() {
                return Err(InterpolationError::invalid_shape(format!(
                    "the shapes of `y` and `dydx` must be identical: got {:?} and {:?}",
                    y.shape(),
                    d.shape()
                )));
            }
        }

        if y.ndim() == 0 {
            return Err(InterpolationError::invalid_shape(
                "`y` must have at least one dimension",
            ));
        }
        let axis = axis.rem_euclid(y.ndim() as isize) as usize;

        if x.ndim() != 1 {
            return Err(InterpolationError::invalid_shape(format!(
                "`x` must be 1-dimensional: got {} dimensions",
                x.ndim()
            )));
        }
        let n = x.len();
        if n < 2 {
            return Err(InterpolationError::invalid_shape(format!(
                "`x` must contain at least 2 elements: got {}",
                n
            )));
        }
        if y.len_of(Axis(axis)) != n {
            return Err(InterpolationError::invalid_shape(format!(
                "the length of `y` along axis {} ({}) doesn't match the length of `x` ({})",
                axis,
                y.len_of(Axis(axis)),
                n
            )));
        }

        if !x.iter().all(|v| v.is_finite()) {
            return Err(InterpolationError::non_finite("x"));
        }
        if !y.iter().all(|v| v.is_finite()) {
            return Err(InterpolationError::non_finite("y"));
        }
        if let Some(d) = &dydx {
            if !d.iter().all(|v| v.is_finite()) {
                return Err(InterpolationError::non_finite("dydx"));
            }
        }

        let x: Vec<T::Real> = x.iter().copied().collect();
        let dx: Vec<T::Real> = x.windows(2).map(|w| w[1] - w[0]).collect();
        if let Some(index) = dx.iter().position(|&h| h <= T::Real::zero()) {
            return Err(InterpolationError::NonIncreasingDomain { index });
        }

        let batch_shape: Vec<usize> = y
            .shape()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &len)| len)
            .collect();

        let y = Self::to_node_major(y, axis, n)?;
        let dydx = match dydx {
            Some(d) => Some(Self::to_node_major(d, axis, n)?),
            None => None,
        };

        Ok(Self {
            x,
            dx,
            y,
            dydx,
            batch_shape,
            axis,
        })
    }

    /// Move `axis` to the front and flatten the rest into columns.
    fn to_node_major(
        values: ArrayViewD<'_, T>,
        axis: usize,
        n: usize,
    ) -> Result<Array2<T>, InterpolationError> {
        let mut perm = Vec::with_capacity(values.ndim());
        perm.push(axis);
        perm.extend((0..values.ndim()).filter(|&i| i != axis));

        let moved = values.permuted_axes(perm);
        let m: usize = moved.shape()[1..].iter().product();
        let data: Vec<T> = moved.iter().copied().collect();
        Array2::from_shape_vec((n, m), data)
            .map_err(|e| InterpolationError::invalid_shape(e.to_string()))
    }

    /// Sample positions.
    #[inline]
    pub fn x(&self) -> &[T::Real] {
        &self.x
    }

    /// Spacings between consecutive positions.
    #[inline]
    pub fn dx(&self) -> &[T::Real] {
        &self.dx
    }

    /// Values with shape `(n, m)`.
    #[inline]
    pub fn y(&self) -> &Array2<T> {
        &self.y
    }

    /// Caller-supplied node derivatives, if any.
    #[inline]
    pub fn dydx(&self) -> Option<&Array2<T>> {
        self.dydx.as_ref()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if there are no nodes (never for a validated set).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of independent series (product of the batch shape).
    #[inline]
    pub fn batch_len(&self) -> usize {
        self.y.ncols()
    }

    /// Shape of `y` with the interpolation axis removed.
    #[inline]
    pub fn batch_shape(&self) -> &[usize] {
        &self.batch_shape
    }

    /// Interpolation axis of the original `y`.
    #[inline]
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Secant slopes `(y[i+1] - y[i]) / dx[i]` with shape `(n-1, m)`.
    pub fn slopes(&self) -> Array2<T> {
        let (n, m) = self.y.dim();
        Array2::from_shape_fn((n - 1, m), |(i, j)| {
            (self.y[[i + 1, j]] - self.y[[i, j]]).unscale(self.dx[i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array, Array3};
    use num_complex::Complex64;

    // ========================================
    // Valid Input Tests
    // ========================================

    #[test]
    fn test_one_dimensional_samples() {
        let samples = SampleSet::new(&array![0.0, 1.0, 3.0], &array![1.0, 2.0, 0.0], 0).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.batch_len(), 1);
        assert!(samples.batch_shape().is_empty());
        assert_eq!(samples.axis(), 0);
        assert_eq!(samples.dx(), &[1.0, 2.0]);
        assert_eq!(samples.y().shape(), &[3, 1]);
        assert!(samples.dydx().is_none());
    }

    #[test]
    fn test_axis_moved_to_front() {
        // y has shape (2, 4, 3) and runs along axis 1
        let y = Array3::from_shape_fn((2, 4, 3), |(a, i, b)| (100 * a + 10 * i + b) as f64);
        let x = array![0.0, 1.0, 2.0, 3.0];
        let samples = SampleSet::new(&x, &y, 1).unwrap();

        assert_eq!(samples.axis(), 1);
        assert_eq!(samples.batch_shape(), &[2, 3]);
        assert_eq!(samples.y().shape(), &[4, 6]);
        // Column j = a * 3 + b
        assert_eq!(samples.y()[[2, 5]], 100.0 + 20.0 + 2.0);
        assert_eq!(samples.y()[[3, 0]], 30.0);
    }

    #[test]
    fn test_negative_axis_wraps() {
        let y = Array::from_shape_fn((3, 5), |(a, i)| (a * 5 + i) as f64);
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
        let samples = SampleSet::new(&x, &y, -1).unwrap();
        assert_eq!(samples.axis(), 1);
        assert_eq!(samples.batch_shape(), &[3]);
        assert_eq!(samples.y()[[4, 2]], 14.0);
    }

    #[test]
    fn test_slopes() {
        let samples =
            SampleSet::new(&array![0.0, 2.0, 3.0], &array![1.0, 5.0, 2.0], 0).unwrap();
        let slopes = samples.slopes();
        assert_eq!(slopes[[0, 0]], 2.0);
        assert_eq!(slopes[[1, 0]], -3.0);
    }

    #[test]
    fn test_with_derivatives_moves_axis() {
        let y = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let dydx = array![[10.0, 11.0], [12.0, 13.0], [14.0, 15.0]];
        let samples = SampleSet::with_derivatives(&array![0.0, 1.0], &y, &dydx, 1).unwrap();
        let d = samples.dydx().unwrap();
        assert_eq!(d.shape(), &[2, 3]);
        assert_eq!(d[[1, 2]], 15.0);
    }

    #[test]
    fn test_complex_values_accepted() {
        let y = array![Complex64::new(0.0, 1.0), Complex64::new(1.0, -1.0)];
        let samples = SampleSet::new(&array![0.0, 1.0], &y, 0).unwrap();
        assert_eq!(samples.slopes()[[0, 0]], Complex64::new(1.0, -2.0));
    }

    // ========================================
    // Rejection Tests
    // ========================================

    #[test]
    fn test_single_point_is_invalid_shape() {
        let result = SampleSet::new(&array![1.0], &array![2.0], 0);
        assert!(matches!(result, Err(InterpolationError::InvalidShape(_))));
    }

    #[test]
    fn test_two_dimensional_x_is_invalid_shape() {
        let result = SampleSet::new(&array![[0.0, 1.0]], &array![2.0, 3.0], 0);
        match result.unwrap_err() {
            InterpolationError::InvalidShape(msg) => assert!(msg.contains("1-dimensional")),
            other => panic!("Expected InvalidShape error, got {:?}", other),
        }
    }

    #[test]
    fn test_length_mismatch_is_invalid_shape() {
        let result = SampleSet::new(&array![0.0, 1.0, 2.0], &array![2.0, 3.0], 0);
        match result.unwrap_err() {
            InterpolationError::InvalidShape(msg) => assert!(msg.contains("doesn't match")),
            other => panic!("Expected InvalidShape error, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_y_is_invalid_shape() {
        let y = ndarray::arr0(1.0);
        let result = SampleSet::new(&array![0.0, 1.0], &y, 0);
        assert!(matches!(result, Err(InterpolationError::InvalidShape(_))));
    }

    #[test]
    fn test_dydx_shape_mismatch() {
        let y = array![[0.0, 1.0], [2.0, 3.0]];
        let dydx = array![[0.0, 1.0, 2.0], [2.0, 3.0, 4.0]];
        let result = SampleSet::with_derivatives(&array![0.0, 1.0], &y, &dydx, 0);
        match result.unwrap_err() {
            InterpolationError::InvalidShape(msg) => assert!(msg.contains("dydx")),
            other => panic!("Expected InvalidShape error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_inputs() {
        let result = SampleSet::new(&array![0.0, f64::NAN], &array![1.0, 2.0], 0);
        assert_eq!(result.unwrap_err(), InterpolationError::non_finite("x"));

        let result = SampleSet::new(&array![0.0, 1.0], &array![1.0, f64::INFINITY], 0);
        assert_eq!(result.unwrap_err(), InterpolationError::non_finite("y"));

        let result = SampleSet::with_derivatives(
            &array![0.0, 1.0],
            &array![1.0, 2.0],
            &array![f64::NEG_INFINITY, 0.0],
            0,
        );
        assert_eq!(result.unwrap_err(), InterpolationError::non_finite("dydx"));
    }

    #[test]
    fn test_non_increasing_domain() {
        let result = SampleSet::new(&array![1.0, 2.0, 1.0], &array![0.0, 0.0, 0.0], 0);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonIncreasingDomain { index: 1 }
        );

        let result = SampleSet::new(&array![0.0, 0.0], &array![0.0, 1.0], 0);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonIncreasingDomain { index: 0 }
        );
    }
}
