//! Tridiagonal LU factorisation with partial pivoting.

use crate::types::{InterpolationError, SampleValue};
use num_traits::Float;

/// LU factors of a tridiagonal matrix.
///
/// The factorisation uses row interchanges, so the upper factor gains a
/// second super-diagonal. Factors are real; right-hand sides may be any
/// [`SampleValue`] whose real type matches, which lets one factorisation
/// serve every batch column of a spline problem.
///
/// # Example
///
/// ```
/// use spline_core::math::linalg::TridiagonalLu;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [3, 4, 3]  =>  x = [1, 1, 1]
/// let lu = TridiagonalLu::factor(vec![1.0, 1.0], vec![2.0, 2.0, 2.0], vec![1.0, 1.0]).unwrap();
/// let mut rhs = vec![3.0_f64, 4.0, 3.0];
/// lu.solve_in_place(&mut rhs);
/// assert!(rhs.iter().all(|v| (v - 1.0).abs() < 1e-12));
/// ```
#[derive(Debug, Clone)]
pub struct TridiagonalLu<F: Float> {
    /// Multipliers of the unit lower factor
    dl: Vec<F>,
    /// Diagonal of the upper factor
    d: Vec<F>,
    /// First super-diagonal of the upper factor
    du: Vec<F>,
    /// Second super-diagonal created by row interchanges
    du2: Vec<F>,
    /// Row interchanged with row `i` at step `i`
    ipiv: Vec<usize>,
}

impl<F: Float> TridiagonalLu<F> {
    /// Factor the tridiagonal matrix with sub-diagonal `sub`, diagonal `diag`
    /// and super-diagonal `sup`.
    ///
    /// Row `i` of the matrix is `sub[i-1], diag[i], sup[i]`.
    ///
    /// # Errors
    ///
    /// * `InvalidShape` - Diagonal lengths are inconsistent or the matrix is empty
    /// * `SingularMatrix` - A zero pivot remains after partial pivoting
    pub fn factor(sub: Vec<F>, diag: Vec<F>, sup: Vec<F>) -> Result<Self, InterpolationError> {
        let n = diag.len();
        if n == 0 {
            return Err(InterpolationError::invalid_shape(
                "tridiagonal system must have at least one row",
            ));
        }
        if sub.len() != n - 1 || sup.len() != n - 1 {
            return Err(InterpolationError::invalid_shape(format!(
                "off-diagonals must have length {}: got {} and {}",
                n - 1,
                sub.len(),
                sup.len()
            )));
        }

        let mut dl = sub;
        let mut d = diag;
        let mut du = sup;
        let mut du2 = vec![F::zero(); n.saturating_sub(2)];
        let mut ipiv: Vec<usize> = (0..n).collect();

        for i in 0..n.saturating_sub(1) {
            if d[i].abs() >= dl[i].abs() {
                // No interchange; eliminate the sub-diagonal entry.
                if d[i] != F::zero() {
                    let fact = dl[i] / d[i];
                    dl[i] = fact;
                    d[i + 1] = d[i + 1] - fact * du[i];
                }
            } else {
                // Swap rows i and i+1, then eliminate.
                let fact = d[i] / dl[i];
                d[i] = dl[i];
                dl[i] = fact;
                let temp = du[i];
                du[i] = d[i + 1];
                d[i + 1] = temp - fact * d[i + 1];
                if i + 2 < n {
                    du2[i] = du[i + 1];
                    du[i + 1] = -fact * du[i + 1];
                }
                ipiv[i] = i + 1;
            }
        }

        if let Some(row) = d.iter().position(|&p| p == F::zero()) {
            return Err(InterpolationError::SingularMatrix { row });
        }

        Ok(Self {
            dl,
            d,
            du,
            du2,
            ipiv,
        })
    }

    /// Order of the factored matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.d.len()
    }

    /// Returns true if the factorisation is empty (never for a valid factor).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    /// Overwrite `rhs` with the solution of `A x = rhs`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs.len()` differs from the matrix order.
    pub fn solve_in_place<T>(&self, rhs: &mut [T])
    where
        T: SampleValue<Real = F>,
    {
        let n = self.len();
        assert_eq!(rhs.len(), n, "right-hand side length must match matrix order");

        // Forward: L y = P b
        for i in 0..n - 1 {
            if self.ipiv[i] == i {
                rhs[i + 1] = rhs[i + 1] - rhs[i].scale(self.dl[i]);
            } else {
                let temp = rhs[i];
                rhs[i] = rhs[i + 1];
                rhs[i + 1] = temp - rhs[i].scale(self.dl[i]);
            }
        }

        // Backward: U x = y
        rhs[n - 1] = rhs[n - 1].unscale(self.d[n - 1]);
        if n > 1 {
            rhs[n - 2] = (rhs[n - 2] - rhs[n - 1].scale(self.du[n - 2])).unscale(self.d[n - 2]);
        }
        for i in (0..n.saturating_sub(2)).rev() {
            rhs[i] = (rhs[i] - rhs[i + 1].scale(self.du[i]) - rhs[i + 2].scale(self.du2[i]))
                .unscale(self.d[i]);
        }
    }

    /// Solve `A x = rhs`, returning `x`.
    pub fn solve<T>(&self, rhs: &[T]) -> Vec<T>
    where
        T: SampleValue<Real = F>,
    {
        let mut x = rhs.to_vec();
        self.solve_in_place(&mut x);
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn multiply(sub: &[f64], diag: &[f64], sup: &[f64], x: &[f64]) -> Vec<f64> {
        let n = diag.len();
        (0..n)
            .map(|i| {
                let mut acc = diag[i] * x[i];
                if i > 0 {
                    acc += sub[i - 1] * x[i - 1];
                }
                if i + 1 < n {
                    acc += sup[i] * x[i + 1];
                }
                acc
            })
            .collect()
    }

    #[test]
    fn test_diagonally_dominant_system() {
        let sub = vec![1.0, 1.0, 1.0];
        let diag = vec![4.0, 4.0, 4.0, 4.0];
        let sup = vec![1.0, 1.0, 1.0];
        let x_true = vec![1.0, -2.0, 3.0, 0.5];
        let b = multiply(&sub, &diag, &sup, &x_true);

        let lu = TridiagonalLu::factor(sub, diag, sup).unwrap();
        let x = lu.solve(&b);
        for (xi, ti) in x.iter().zip(x_true.iter()) {
            assert_relative_eq!(*xi, *ti, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_requires_pivoting() {
        // Zero leading diagonal: elimination without interchange would fail.
        let sub = vec![2.0, 1.0];
        let diag = vec![0.0, 1.0, 3.0];
        let sup = vec![1.0, 5.0];
        let x_true = vec![0.25, -1.0, 2.0];
        let b = multiply(&sub, &diag, &sup, &x_true);

        let lu = TridiagonalLu::factor(sub, diag, sup).unwrap();
        let x = lu.solve(&b);
        for (xi, ti) in x.iter().zip(x_true.iter()) {
            assert_relative_eq!(*xi, *ti, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_and_two_row_systems() {
        let lu = TridiagonalLu::factor(vec![], vec![4.0], vec![]).unwrap();
        assert_eq!(lu.solve(&[2.0_f64]), vec![0.5]);

        let lu = TridiagonalLu::factor(vec![1.0], vec![1.0, 1.0], vec![2.0]).unwrap();
        // x0 + 2 x1 = 5, x0 + x1 = 3
        let x = lu.solve(&[5.0_f64, 3.0]);
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_right_hand_side() {
        let lu = TridiagonalLu::factor(vec![1.0, 1.0], vec![3.0, 3.0, 3.0], vec![1.0, 1.0]).unwrap();
        let re = lu.solve(&[1.0_f64, 2.0, 3.0]);
        let im = lu.solve(&[-1.0_f64, 0.5, 4.0]);
        let z = lu.solve(&[
            Complex64::new(1.0, -1.0),
            Complex64::new(2.0, 0.5),
            Complex64::new(3.0, 4.0),
        ]);
        for i in 0..3 {
            assert_relative_eq!(z[i].re, re[i], epsilon = 1e-12);
            assert_relative_eq!(z[i].im, im[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular_matrix() {
        let result = TridiagonalLu::factor(vec![1.0], vec![1.0, 1.0], vec![1.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::SingularMatrix { row: 1 }
        );
    }

    #[test]
    fn test_mismatched_diagonals() {
        let result = TridiagonalLu::factor(vec![1.0], vec![1.0, 1.0, 1.0], vec![1.0, 1.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidShape(_))));

        let result = TridiagonalLu::<f64>::factor(vec![], vec![], vec![]);
        assert!(matches!(result, Err(InterpolationError::InvalidShape(_))));
    }
}
