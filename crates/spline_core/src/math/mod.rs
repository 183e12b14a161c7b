//! Numerical building blocks.
//!
//! - [`interpolators`]: Sample validation, derivative estimation and piecewise polynomials
//! - [`linalg`]: Banded and dense LU solvers for the spline systems

pub mod interpolators;
pub mod linalg;
