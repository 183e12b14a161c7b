//! Dense LU factorisation with partial pivoting.
//!
//! Used for the small closed systems that do not fit the banded layout.

use crate::types::{InterpolationError, SampleValue};
use num_traits::Float;

/// LU factors of a square dense matrix stored in row-major order.
///
/// # Example
///
/// ```
/// use spline_core::math::linalg::DenseLu;
///
/// let lu = DenseLu::factor(2, vec![2.0, 1.0, 1.0, 3.0]).unwrap();
/// let x = lu.solve(&[3.0_f64, 5.0]);
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DenseLu<F: Float> {
    n: usize,
    /// Combined factors: strict lower part holds L (unit diagonal), upper part holds U
    lu: Vec<F>,
    /// Row permutation applied during elimination
    perm: Vec<usize>,
}

impl<F: Float> DenseLu<F> {
    /// Factor the `n x n` row-major matrix `a`.
    ///
    /// # Errors
    ///
    /// * `InvalidShape` - `a.len() != n * n` or `n == 0`
    /// * `SingularMatrix` - Every candidate pivot in some column is zero
    pub fn factor(n: usize, a: Vec<F>) -> Result<Self, InterpolationError> {
        if n == 0 || a.len() != n * n {
            return Err(InterpolationError::invalid_shape(format!(
                "dense matrix must be square and non-empty: got {} entries for order {}",
                a.len(),
                n
            )));
        }

        let mut lu = a;
        let mut perm: Vec<usize> = (0..n).collect();

        for k in 0..n {
            let pivot_row = (k..n)
                .max_by(|&i, &j| {
                    lu[i * n + k]
                        .abs()
                        .partial_cmp(&lu[j * n + k].abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(k);

            if lu[pivot_row * n + k] == F::zero() {
                return Err(InterpolationError::SingularMatrix { row: k });
            }

            if pivot_row != k {
                for col in 0..n {
                    lu.swap(k * n + col, pivot_row * n + col);
                }
                perm.swap(k, pivot_row);
            }

            let pivot = lu[k * n + k];
            for i in k + 1..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for col in k + 1..n {
                    lu[i * n + col] = lu[i * n + col] - factor * lu[k * n + col];
                }
            }
        }

        Ok(Self { n, lu, perm })
    }

    /// Order of the factored matrix.
    #[inline]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Solve `A x = rhs`, returning `x`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs.len()` differs from the matrix order.
    pub fn solve<T>(&self, rhs: &[T]) -> Vec<T>
    where
        T: SampleValue<Real = F>,
    {
        let n = self.n;
        assert_eq!(rhs.len(), n, "right-hand side length must match matrix order");

        let mut x: Vec<T> = self.perm.iter().map(|&p| rhs[p]).collect();

        for i in 1..n {
            let mut acc = x[i];
            for j in 0..i {
                acc = acc - x[j].scale(self.lu[i * n + j]);
            }
            x[i] = acc;
        }

        for i in (0..n).rev() {
            let mut acc = x[i];
            for j in i + 1..n {
                acc = acc - x[j].scale(self.lu[i * n + j]);
            }
            x[i] = acc.unscale(self.lu[i * n + i]);
        }

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_by_three() {
        // Matrix with a zero in the leading position forces a row swap.
        let a = vec![0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0];
        let x_true = [1.0, -1.0, 2.0];
        let b: Vec<f64> = (0..3)
            .map(|i| (0..3).map(|j| a[i * 3 + j] * x_true[j]).sum())
            .collect();

        let lu = DenseLu::factor(3, a).unwrap();
        assert_eq!(lu.order(), 3);
        let x = lu.solve(&b);
        for i in 0..3 {
            assert_relative_eq!(x[i], x_true[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular() {
        let result = DenseLu::factor(2, vec![1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::SingularMatrix { row: 1 })
        ));
    }

    #[test]
    fn test_bad_shape() {
        let result = DenseLu::factor(2, vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidShape(_))));
    }
}
