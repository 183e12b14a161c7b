//! Error types for structured error handling.
//!
//! This module provides `InterpolationError`, the single error type returned
//! by every construction, evaluation and linear-algebra routine in the crate.
//! Each validation failure maps to its own variant so callers can match on
//! the kind of problem instead of parsing messages.

use thiserror::Error;

/// Interpolation-related errors.
///
/// Validation errors are raised before any numerical work starts, so a
/// failed call never leaves partial state behind.
///
/// # Variants
/// - `InvalidShape`: Rank, length or axis-length mismatch between inputs
/// - `NonFiniteInput`: NaN or infinity present in an input array
/// - `NonIncreasingDomain`: Sample positions are not strictly increasing
/// - `UnsupportedDataType`: Value type not accepted by the chosen method
/// - `InvalidBoundaryCondition`: Malformed or inconsistent boundary condition
/// - `OutOfBounds`: Query point outside the domain when extrapolation is forbidden
/// - `SingularMatrix`: Zero pivot met while solving a linear system
///
/// # Examples
/// ```
/// use spline_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
///
/// let err = InterpolationError::NonIncreasingDomain { index: 1 };
/// assert!(format!("{}", err).contains("strictly increasing"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Rank, length or axis-length mismatch between `x`, `y` and `dydx`.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// NaN or infinity found in an input array.
    #[error("`{name}` must contain only finite values")]
    NonFiniteInput {
        /// Name of the offending input (`x`, `y` or `dydx`)
        name: String,
    },

    /// Sample positions are not a strictly increasing sequence.
    #[error("`x` must be strictly increasing: x[{index}] >= x[{}]", .index + 1)]
    NonIncreasingDomain {
        /// Index of the first position not smaller than its successor
        index: usize,
    },

    /// Value type not supported by the requested method.
    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    /// Boundary condition is unknown, malformed or inconsistent with the data.
    #[error("Invalid boundary condition: {0}")]
    InvalidBoundaryCondition(String),

    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Zero pivot during a linear solve.
    #[error("Singular matrix: zero pivot at row {row}")]
    SingularMatrix {
        /// Row at which elimination broke down
        row: usize,
    },
}

impl InterpolationError {
    /// Create an invalid shape error.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape(message.into())
    }

    /// Create a non-finite input error for the named array.
    pub fn non_finite(name: impl Into<String>) -> Self {
        Self::NonFiniteInput { name: name.into() }
    }

    /// Create an invalid boundary condition error.
    pub fn invalid_bc(message: impl Into<String>) -> Self {
        Self::InvalidBoundaryCondition(message.into())
    }

    /// Returns true for errors raised by input validation, as opposed to
    /// evaluation or numerical breakdown.
    pub fn is_validation_error(&self) -> bool {
        !matches!(
            self,
            Self::OutOfBounds { .. } | Self::SingularMatrix { .. }
        )
    }
}

/// Convenience alias for results carrying an [`InterpolationError`].
pub type Result<T> = std::result::Result<T, InterpolationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = InterpolationError::invalid_shape("`x` must be 1-dimensional");
        assert_eq!(
            format!("{}", err),
            "Invalid shape: `x` must be 1-dimensional"
        );

        let err = InterpolationError::non_finite("dydx");
        assert_eq!(format!("{}", err), "`dydx` must contain only finite values");

        let err = InterpolationError::NonIncreasingDomain { index: 2 };
        assert_eq!(
            format!("{}", err),
            "`x` must be strictly increasing: x[2] >= x[3]"
        );

        let err = InterpolationError::invalid_bc("bc_type=bogus is not allowed");
        assert!(format!("{}", err).starts_with("Invalid boundary condition"));

        let err = InterpolationError::SingularMatrix { row: 4 };
        assert!(format!("{}", err).contains("row 4"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(InterpolationError::invalid_shape("x").is_validation_error());
        assert!(InterpolationError::non_finite("y").is_validation_error());
        assert!(InterpolationError::UnsupportedDataType("complex".into()).is_validation_error());
        assert!(!InterpolationError::OutOfBounds {
            x: 1.0,
            min: 0.0,
            max: 0.5
        }
        .is_validation_error());
        assert!(!InterpolationError::SingularMatrix { row: 0 }.is_validation_error());
    }

    #[test]
    fn test_clone_and_eq() {
        let err = InterpolationError::NonIncreasingDomain { index: 0 };
        assert_eq!(err.clone(), err);
        assert_ne!(err, InterpolationError::NonIncreasingDomain { index: 1 });
    }
}
