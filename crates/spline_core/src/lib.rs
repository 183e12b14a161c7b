//! # spline_core: Piecewise-Cubic Interpolation
//!
//! Builds cubic interpolants of one-dimensional data and evaluates them:
//! - Hermite interpolation from caller-supplied derivatives
//! - Shape-preserving monotone interpolation (PCHIP)
//! - C² cubic splines with not-a-knot, natural, clamped, periodic or explicit
//!   derivative boundary conditions
//!
//! Every constructor returns a [`PiecewisePolynomial`](math::interpolators::PiecewisePolynomial)
//! supporting evaluation of any derivative order, differentiation,
//! antidifferentiation and definite integration.
//!
//! ## Modules
//!
//! - `math::interpolators`: Constructors, boundary conditions, configuration
//! - `math::linalg`: Tridiagonal and dense LU solvers
//! - `types`: [`SampleValue`](types::SampleValue) scalar trait and [`InterpolationError`](types::InterpolationError)
//!
//! ## Value Types
//!
//! Positions are real (`f32` or `f64`). Values may be real or complex
//! (`Complex32`, `Complex64`); complex data is interpolated as a whole, which
//! is equivalent to interpolating the real and imaginary parts separately.
//!
//! ## Usage Examples
//!
//! ```rust
//! use ndarray::array;
//! use spline_core::math::interpolators::{build_boundary_spline, BoundaryConditions, SplineConfig};
//!
//! let x = array![0.0, 1.0, 2.0, 3.0];
//! let y = array![0.0_f64, 1.0, 8.0, 27.0];
//!
//! let pp = build_boundary_spline(&x, &y, &BoundaryConditions::default(), &SplineConfig::default())
//!     .unwrap();
//! assert!((pp.value_at(2.5).unwrap() - 15.625).abs() < 1e-12);
//!
//! let area = pp.integrate(0.0, 3.0).unwrap();
//! assert!((area.sum() - 20.25).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Solve batch columns on the rayon thread pool
//! - `serde`: Serialisation for boundary conditions, extrapolation modes and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use num_complex::{Complex32, Complex64};
