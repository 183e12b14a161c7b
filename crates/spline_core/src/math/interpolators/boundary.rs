//! Boundary conditions for cubic splines.

use ndarray::{arr0, ArrayD};
use std::fmt;
use std::str::FromStr;

use super::validation::SampleSet;
use crate::types::{real_const, InterpolationError, Result, SampleValue};

/// Condition imposed at one end of a cubic spline.
///
/// # Variants
///
/// - `NotAKnot`: The third derivative is continuous across the second
///   (or second-to-last) breakpoint (default)
/// - `Natural`: Zero second derivative at the end
/// - `Clamped`: Zero first derivative at the end
/// - `Periodic`: The spline wraps around; only valid at both ends at once
/// - `Derivative`: A first or second derivative of the given value, with one
///   entry per batch series (shape of `y` without the interpolation axis)
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BoundaryCondition<T: SampleValue> {
    /// Continuous third derivative at the first interior breakpoint.
    #[default]
    NotAKnot,

    /// Zero second derivative.
    Natural,

    /// Zero first derivative.
    Clamped,

    /// Periodic continuation.
    Periodic,

    /// Explicit derivative of order 1 or 2.
    Derivative {
        /// Derivative order (1 or 2)
        order: u8,
        /// Derivative value per batch series
        value: ArrayD<T>,
    },
}

impl<T: SampleValue> BoundaryCondition<T> {
    /// First derivative `value` for a single series.
    pub fn first_derivative(value: T) -> Self {
        Self::derivative(1, arr0(value).into_dyn())
    }

    /// Second derivative `value` for a single series.
    pub fn second_derivative(value: T) -> Self {
        Self::derivative(2, arr0(value).into_dyn())
    }

    /// Derivative of `order` with one value per batch series.
    ///
    /// The order is checked when the spline is built.
    pub fn derivative(order: u8, value: ArrayD<T>) -> Self {
        Self::Derivative { order, value }
    }

    /// Returns true for [`BoundaryCondition::Periodic`].
    #[inline]
    pub fn is_periodic(&self) -> bool {
        matches!(self, Self::Periodic)
    }
}

impl<T: SampleValue> fmt::Display for BoundaryCondition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAKnot => write!(f, "not-a-knot"),
            Self::Natural => write!(f, "natural"),
            Self::Clamped => write!(f, "clamped"),
            Self::Periodic => write!(f, "periodic"),
            Self::Derivative { order, .. } => write!(f, "derivative(order={})", order),
        }
    }
}

impl<T: SampleValue> FromStr for BoundaryCondition<T> {
    type Err = InterpolationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "not-a-knot" => Ok(Self::NotAKnot),
            "natural" => Ok(Self::Natural),
            "clamped" => Ok(Self::Clamped),
            "periodic" => Ok(Self::Periodic),
            other => Err(InterpolationError::invalid_bc(format!(
                "bc_type={} is not allowed",
                other
            ))),
        }
    }
}

/// Start and end conditions of a cubic spline.
///
/// # Example
///
/// ```
/// use spline_core::math::interpolators::{BoundaryCondition, BoundaryConditions};
///
/// let bc: BoundaryConditions<f64> = BoundaryConditions::parse("clamped", "natural").unwrap();
/// assert_eq!(bc.start, BoundaryCondition::Clamped);
///
/// assert!(BoundaryConditions::<f64>::parse("clamped", "bogus").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryConditions<T: SampleValue> {
    /// Condition at `x[0]`
    pub start: BoundaryCondition<T>,
    /// Condition at `x[n-1]`
    pub end: BoundaryCondition<T>,
}

impl<T: SampleValue> BoundaryConditions<T> {
    /// Separate conditions for each end.
    pub fn new(start: BoundaryCondition<T>, end: BoundaryCondition<T>) -> Self {
        Self { start, end }
    }

    /// The same condition at both ends.
    pub fn both(condition: BoundaryCondition<T>) -> Self {
        Self {
            start: condition.clone(),
            end: condition,
        }
    }

    /// Periodic conditions.
    pub fn periodic() -> Self {
        Self::both(BoundaryCondition::Periodic)
    }

    /// Natural conditions at both ends.
    pub fn natural() -> Self {
        Self::both(BoundaryCondition::Natural)
    }

    /// Parse a pair of string tags.
    ///
    /// # Errors
    ///
    /// `InvalidBoundaryCondition` for an unknown tag.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Returns true when both ends are periodic.
    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.start.is_periodic() && self.end.is_periodic()
    }

    /// Check the pair against `samples` and lower it to solver form.
    ///
    /// `rtol` and `atol` bound `|y[0] - y[n-1]|` for periodic conditions.
    pub(crate) fn resolve(
        &self,
        samples: &SampleSet<T>,
        rtol: f64,
        atol: f64,
    ) -> Result<(EndCondition<T>, EndCondition<T>)> {
        if self.start.is_periodic() != self.end.is_periodic() {
            return Err(InterpolationError::invalid_bc(
                "'periodic' is defined for both curve ends and cannot be used with other \
                 boundary conditions",
            ));
        }
        if self.is_periodic() {
            check_periodic_ends(samples, rtol, atol)?;
            return Ok((EndCondition::Periodic, EndCondition::Periodic));
        }
        Ok((
            lower(&self.start, samples)?,
            lower(&self.end, samples)?,
        ))
    }
}

impl<T: SampleValue> From<BoundaryCondition<T>> for BoundaryConditions<T> {
    fn from(condition: BoundaryCondition<T>) -> Self {
        Self::both(condition)
    }
}

/// Validated end condition with values flattened to batch columns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EndCondition<T> {
    NotAKnot,
    Periodic,
    Derivative { order: u8, values: Vec<T> },
}

fn lower<T: SampleValue>(
    condition: &BoundaryCondition<T>,
    samples: &SampleSet<T>,
) -> Result<EndCondition<T>> {
    let m = samples.batch_len();
    match condition {
        BoundaryCondition::NotAKnot => Ok(EndCondition::NotAKnot),
        BoundaryCondition::Periodic => Ok(EndCondition::Periodic),
        BoundaryCondition::Clamped => Ok(EndCondition::Derivative {
            order: 1,
            values: vec![T::zero(); m],
        }),
        BoundaryCondition::Natural => Ok(EndCondition::Derivative {
            order: 2,
            values: vec![T::zero(); m],
        }),
        BoundaryCondition::Derivative { order, value } => {
            if !matches!(order, 1 | 2) {
                return Err(InterpolationError::invalid_bc(format!(
                    "the specified derivative order must be 1 or 2: got {}",
                    order
                )));
            }
            if value.shape() != samples.batch_shape() {
                return Err(InterpolationError::invalid_bc(format!(
                    "derivative value shape {:?} is not the expected one {:?}",
                    value.shape(),
                    samples.batch_shape()
                )));
            }
            if !value.iter().all(|v| v.is_finite()) {
                return Err(InterpolationError::invalid_bc(
                    "derivative values must be finite",
                ));
            }
            Ok(EndCondition::Derivative {
                order: *order,
                values: value.iter().copied().collect(),
            })
        }
    }
}

fn check_periodic_ends<T: SampleValue>(samples: &SampleSet<T>, rtol: f64, atol: f64) -> Result<()> {
    let y = samples.y();
    let last = samples.len() - 1;
    let rtol: T::Real = real_const(rtol);
    let atol: T::Real = real_const(atol);
    let close = (0..samples.batch_len()).all(|j| {
        let (a, b) = (y[[0, j]], y[[last, j]]);
        (a - b).modulus() <= atol + rtol * b.modulus()
    });
    if close {
        Ok(())
    } else {
        Err(InterpolationError::invalid_bc(format!(
            "the first and last `y` point along axis {} must be identical (within machine \
             precision) when bc_type='periodic'",
            samples.axis()
        )))
    }
}
