//! Spline construction configuration types.

use std::fmt;
use std::str::FromStr;

/// Behaviour of a piecewise polynomial outside its breakpoint range.
///
/// # Variants
///
/// - `Forbid`: Queries outside the domain return `InterpolationError::OutOfBounds`
/// - `Extend`: The first/last interval polynomial is used beyond the ends (default)
/// - `Periodic`: Queries are wrapped into `[x[0], x[n-1]]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Extrapolate {
    /// Reject out-of-domain queries.
    Forbid,

    /// Extend the boundary polynomials.
    #[default]
    Extend,

    /// Wrap queries with period `x[n-1] - x[0]`.
    Periodic,
}

impl From<bool> for Extrapolate {
    fn from(value: bool) -> Self {
        if value {
            Extrapolate::Extend
        } else {
            Extrapolate::Forbid
        }
    }
}

impl fmt::Display for Extrapolate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Extrapolate::Forbid => "forbid",
            Extrapolate::Extend => "extend",
            Extrapolate::Periodic => "periodic",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Extrapolate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forbid" | "none" | "false" => Ok(Extrapolate::Forbid),
            "extend" | "true" => Ok(Extrapolate::Extend),
            "periodic" => Ok(Extrapolate::Periodic),
            other => Err(format!("unknown extrapolation mode `{}`", other)),
        }
    }
}

/// Configuration shared by the spline constructors.
///
/// Carries the options that would otherwise be optional arguments: the
/// interpolation axis of `y`, the extrapolation policy of the result and the
/// tolerance used to decide whether periodic end values agree.
///
/// # Example
///
/// ```
/// use spline_core::math::interpolators::{Extrapolate, SplineConfig};
///
/// // Default configuration: axis 0, automatic extrapolation
/// let config = SplineConfig::default();
/// assert_eq!(config.axis, 0);
/// assert!(config.extrapolate.is_none());
///
/// // Custom configuration
/// let config = SplineConfig::new()
///     .with_axis(-1)
///     .with_extrapolate(Extrapolate::Forbid);
/// assert_eq!(config.extrapolate, Some(Extrapolate::Forbid));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineConfig {
    /// Axis of `y` that runs along `x`.
    ///
    /// Negative values count from the last axis, and values wrap modulo the
    /// rank of `y`.
    /// Default: 0
    pub axis: isize,

    /// Extrapolation policy of the constructed polynomial.
    ///
    /// `None` resolves to `Periodic` for periodic boundary conditions and to
    /// `Extend` otherwise.
    /// Default: None
    pub extrapolate: Option<Extrapolate>,

    /// Relative tolerance for `y[0] == y[n-1]` under periodic conditions.
    ///
    /// Default: 1e-15
    pub periodic_rtol: f64,

    /// Absolute tolerance for `y[0] == y[n-1]` under periodic conditions.
    ///
    /// Default: 1e-15
    pub periodic_atol: f64,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            axis: 0,
            extrapolate: None,
            periodic_rtol: 1e-15,
            periodic_atol: 1e-15,
        }
    }
}

impl SplineConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never extrapolates.
    pub fn strict() -> Self {
        Self {
            extrapolate: Some(Extrapolate::Forbid),
            ..Self::default()
        }
    }

    /// Set the interpolation axis.
    pub fn with_axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    /// Set the extrapolation policy.
    pub fn with_extrapolate(mut self, extrapolate: impl Into<Extrapolate>) -> Self {
        self.extrapolate = Some(extrapolate.into());
        self
    }

    /// Set the tolerances used for the periodic end-value check.
    pub fn with_periodic_tolerance(mut self, rtol: f64, atol: f64) -> Self {
        self.periodic_rtol = rtol;
        self.periodic_atol = atol;
        self
    }

    /// Resolve the extrapolation policy, falling back to `default`.
    #[inline]
    pub fn extrapolate_or(&self, default: Extrapolate) -> Extrapolate {
        self.extrapolate.unwrap_or(default)
    }
}
