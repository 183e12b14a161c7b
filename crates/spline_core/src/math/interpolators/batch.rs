//! Column-wise work over a flattened batch.
//!
//! Batch columns are independent, so with the `parallel` feature they are
//! processed on the rayon pool once there are enough of them.

use ndarray::Array2;

use crate::types::{InterpolationError, Result};

/// Minimum number of columns before work is spread across threads.
#[cfg(feature = "parallel")]
pub(crate) const PARALLEL_THRESHOLD: usize = 16;

/// Run `column` for every `j in 0..m` and stack the results as the columns
/// of an `(n, m)` array.
///
/// Each call must return exactly `n` values.
#[cfg(feature = "parallel")]
pub(crate) fn try_map_columns<T, F>(n: usize, m: usize, column: F) -> Result<Array2<T>>
where
    T: Copy + Send,
    F: Fn(usize) -> Result<Vec<T>> + Sync + Send,
{
    use rayon::prelude::*;

    let columns: Vec<Vec<T>> = if m >= PARALLEL_THRESHOLD {
        (0..m).into_par_iter().map(column).collect::<Result<_>>()?
    } else {
        (0..m).map(column).collect::<Result<_>>()?
    };
    stack_columns(n, columns)
}

/// Sequential fallback when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub(crate) fn try_map_columns<T, F>(n: usize, m: usize, column: F) -> Result<Array2<T>>
where
    T: Copy + Send,
    F: Fn(usize) -> Result<Vec<T>> + Sync + Send,
{
    let columns: Vec<Vec<T>> = (0..m).map(column).collect::<Result<_>>()?;
    stack_columns(n, columns)
}

fn stack_columns<T: Copy>(n: usize, columns: Vec<Vec<T>>) -> Result<Array2<T>> {
    let m = columns.len();
    if let Some(bad) = columns.iter().find(|c| c.len() != n) {
        return Err(InterpolationError::invalid_shape(format!(
            "column has {} rows, expected {}",
            bad.len(),
            n
        )));
    }
    Ok(Array2::from_shape_fn((n, m), |(i, j)| columns[j][i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_stacked_in_order() {
        let a = try_map_columns(3, 40, |j| Ok(vec![j as f64, 10.0 * j as f64, -1.0])).unwrap();
        assert_eq!(a.dim(), (3, 40));
        assert_eq!(a[[1, 25]], 250.0);
        assert_eq!(a[[2, 39]], -1.0);
    }

    #[test]
    fn test_first_error_is_returned() {
        let result = try_map_columns::<f64, _>(2, 4, |j| {
            if j == 2 {
                Err(InterpolationError::SingularMatrix { row: 0 })
            } else {
                Ok(vec![0.0, 0.0])
            }
        });
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::SingularMatrix { row: 0 }
        );
    }

    #[test]
    fn test_wrong_column_length() {
        let result = try_map_columns(3, 1, |_| Ok(vec![1.0_f64]));
        assert!(matches!(result, Err(InterpolationError::InvalidShape(_))));
    }

    #[test]
    fn test_empty_batch() {
        let a = try_map_columns::<f64, _>(4, 0, |_| Ok(vec![])).unwrap();
        assert_eq!(a.dim(), (4, 0));
    }
}
