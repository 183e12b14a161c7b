//! Piecewise-cubic interpolation.
//!
//! Every interpolant in this module is a cubic Hermite interpolant: a
//! strategy produces one first derivative per node, and a shared assembler
//! turns values and derivatives into a [`PiecewisePolynomial`].
//!
//! ## Constructors
//!
//! - [`build_hermite`]: Derivatives supplied by the caller (C¹)
//! - [`build_monotone`]: Shape-preserving PCHIP derivatives (C¹, real data only)
//! - [`build_boundary_spline`]: C² cubic spline with [`BoundaryConditions`]
//! - [`build_with`]: Any [`DerivativeEstimator`] applied to a [`SampleSet`]
//!
//! ## Batches
//!
//! `y` may carry any number of dimensions besides the interpolation axis
//! ([`SplineConfig::axis`]). All series share `x`; linear systems are factored
//! once and solved for every series.
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use spline_core::math::interpolators::{
//!     build_boundary_spline, build_monotone, BoundaryConditions, SplineConfig,
//! };
//!
//! let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
//! let y = array![0.0_f64, 1.0, 2.0, 3.0, 4.0];
//! let config = SplineConfig::default();
//!
//! let spline = build_boundary_spline(&x, &y, &BoundaryConditions::default(), &config).unwrap();
//! let pchip = build_monotone(&x, &y, &config).unwrap();
//!
//! // Linear data is reproduced exactly, also beyond the ends
//! assert!((spline.value_at(5.5).unwrap() - 5.5).abs() < 1e-12);
//! assert!((pchip.value_at(2.5).unwrap() - 2.5).abs() < 1e-12);
//! ```

mod batch;
mod boundary;
mod config;
mod cubic_spline;
mod hermite;
mod monotone;
mod ppoly;
mod traits;
mod validation;

// Re-export public types at module level
pub use boundary::{BoundaryCondition, BoundaryConditions};
pub use config::{Extrapolate, SplineConfig};
pub use cubic_spline::{build_boundary_spline, SplineSlopes};
pub use hermite::{assemble_coefficients, build_hermite, build_with, SuppliedDerivatives};
pub use monotone::{build_monotone, evaluate_monotone, evaluate_monotone_orders, MonotoneSlopes};
pub use ppoly::PiecewisePolynomial;
pub use traits::DerivativeEstimator;
pub use validation::SampleSet;
