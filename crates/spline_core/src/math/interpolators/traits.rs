//! Derivative estimation trait shared by the cubic constructors.

use ndarray::Array2;

use super::validation::SampleSet;
use crate::types::{Result, SampleValue};

/// Strategy producing a first derivative at every node.
///
/// Every cubic interpolant in this crate is a Hermite interpolant: once the
/// node derivatives are known the coefficients follow from
/// [`assemble_coefficients`](super::assemble_coefficients). Implementors only
/// decide how those derivatives are obtained.
///
/// # Example
///
/// ```
/// use ndarray::{array, Array2};
/// use spline_core::math::interpolators::{build_with, DerivativeEstimator, SampleSet};
/// use spline_core::types::Result;
///
/// /// Uses the left secant slope at every node.
/// struct LeftSlope;
///
/// impl DerivativeEstimator<f64> for LeftSlope {
///     fn node_derivatives(&self, samples: &SampleSet<f64>) -> Result<Array2<f64>> {
///         let slopes = samples.slopes();
///         let n = samples.len();
///         Ok(Array2::from_shape_fn((n, samples.batch_len()), |(i, j)| {
///             slopes[[i.saturating_sub(1), j]]
///         }))
///     }
/// }
///
/// let samples = SampleSet::new(&array![0.0, 1.0, 2.0], &array![0.0, 1.0, 2.0], 0).unwrap();
/// let pp = build_with(&LeftSlope, &samples, Default::default()).unwrap();
/// assert!((pp.value_at(1.5).unwrap() - 1.5).abs() < 1e-12);
/// ```
pub trait DerivativeEstimator<T: SampleValue> {
    /// Node derivatives with the layout of [`SampleSet::y`]: shape `(n, m)`.
    ///
    /// # Errors
    ///
    /// Strategy-specific; e.g. `UnsupportedDataType` or
    /// `InvalidBoundaryCondition`.
    fn node_derivatives(&self, samples: &SampleSet<T>) -> Result<Array2<T>>;
}
