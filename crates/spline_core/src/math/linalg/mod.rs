//! Linear system solvers used by the spline constructors.
//!
//! ## Available Solvers
//!
//! - [`TridiagonalLu`]: O(n) banded LU with partial pivoting for bandwidth-one systems
//! - [`DenseLu`]: Gaussian elimination with partial pivoting for small dense systems
//!
//! Both factor a real matrix once and then solve against any number of
//! right-hand sides, real or complex.

mod banded;
mod dense;

pub use banded::TridiagonalLu;
pub use dense::DenseLu;
