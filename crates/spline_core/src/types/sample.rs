//! Scalar types accepted as sample values.
//!
//! Sample positions are always real. Sample values may be real or complex;
//! every value type names the real type used for its positions, spacings and
//! linear-system coefficients through [`SampleValue::Real`].

use num_complex::Complex;
use num_traits::{Float, Num};
use std::fmt::{Debug, Display};
use std::ops::Neg;

/// A scalar that can be stored at a spline node.
///
/// Implemented for `f32`, `f64`, `Complex<f32>` and `Complex<f64>`.
/// Arithmetic between two values comes from [`Num`]; arithmetic with the
/// associated real type goes through [`scale`](SampleValue::scale) and
/// [`unscale`](SampleValue::unscale).
///
/// # Example
///
/// ```
/// use spline_core::types::SampleValue;
/// use num_complex::Complex64;
///
/// let z = Complex64::new(1.0, -2.0);
/// assert_eq!(z.scale(2.0), Complex64::new(2.0, -4.0));
/// assert!(<Complex64 as SampleValue>::IS_COMPLEX);
/// assert!(!<f64 as SampleValue>::IS_COMPLEX);
/// ```
pub trait SampleValue: Num + Copy + Neg<Output = Self> + Debug + Send + Sync + 'static {
    /// Real scalar type for positions and matrix entries.
    type Real: Float + Debug + Display + Send + Sync + 'static;

    /// True when the value carries an imaginary component.
    const IS_COMPLEX: bool;

    /// Embed a real number.
    fn from_real(r: Self::Real) -> Self;

    /// Multiply by a real factor.
    fn scale(self, r: Self::Real) -> Self;

    /// Divide by a real factor.
    fn unscale(self, r: Self::Real) -> Self;

    /// Absolute value (modulus for complex values).
    fn modulus(self) -> Self::Real;

    /// Real component.
    fn real_part(self) -> Self::Real;

    /// True when every component is finite.
    fn is_finite(self) -> bool;
}

macro_rules! impl_real_sample {
    ($($t:ty),*) => {$(
        impl SampleValue for $t {
            type Real = $t;
            const IS_COMPLEX: bool = false;

            #[inline]
            fn from_real(r: $t) -> Self {
                r
            }

            #[inline]
            fn scale(self, r: $t) -> Self {
                self * r
            }

            #[inline]
            fn unscale(self, r: $t) -> Self {
                self / r
            }

            #[inline]
            fn modulus(self) -> $t {
                self.abs()
            }

            #[inline]
            fn real_part(self) -> $t {
                self
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    )*};
}

macro_rules! impl_complex_sample {
    ($($t:ty),*) => {$(
        impl SampleValue for Complex<$t> {
            type Real = $t;
            const IS_COMPLEX: bool = true;

            #[inline]
            fn from_real(r: $t) -> Self {
                Complex::new(r, 0.0)
            }

            #[inline]
            fn scale(self, r: $t) -> Self {
                Complex::new(self.re * r, self.im * r)
            }

            #[inline]
            fn unscale(self, r: $t) -> Self {
                Complex::new(self.re / r, self.im / r)
            }

            #[inline]
            fn modulus(self) -> $t {
                self.norm()
            }

            #[inline]
            fn real_part(self) -> $t {
                self.re
            }

            #[inline]
            fn is_finite(self) -> bool {
                self.re.is_finite() && self.im.is_finite()
            }
        }
    )*};
}

impl_real_sample!(f32, f64);
impl_complex_sample!(f32, f64);

/// Convert an `f64` constant into the real type `F`.
#[inline]
pub(crate) fn real_const<F: Float>(value: f64) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Convert a count into the real type `F`.
#[inline]
pub(crate) fn real_from_usize<F: Float>(value: usize) -> F {
    F::from(value).unwrap_or_else(F::nan)
}

/// Three-valued sign: -1, 0 or +1.
///
/// Unlike [`Float::signum`], zero maps to zero.
#[inline]
pub(crate) fn sign<F: Float>(value: F) -> F {
    if value > F::zero() {
        F::one()
    } else if value < F::zero() {
        -F::one()
    } else {
        F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::{Complex32, Complex64};

    #[test]
    fn test_real_sample_ops() {
        assert_eq!(3.0_f64.scale(2.0), 6.0);
        assert_eq!(3.0_f64.unscale(2.0), 1.5);
        assert_eq!((-4.0_f64).modulus(), 4.0);
        assert_eq!(<f32 as SampleValue>::from_real(1.5), 1.5_f32);
        assert!(SampleValue::is_finite(1.0_f64));
        assert!(!SampleValue::is_finite(f64::NAN));
        assert!(!SampleValue::is_finite(f32::INFINITY));
    }

    #[test]
    fn test_complex_sample_ops() {
        let z = Complex64::new(3.0, 4.0);
        assert_eq!(z.modulus(), 5.0);
        assert_eq!(z.unscale(2.0), Complex64::new(1.5, 2.0));
        assert_eq!(z.real_part(), 3.0);
        assert_eq!(Complex64::from_real(2.0), Complex64::new(2.0, 0.0));
        assert!(!SampleValue::is_finite(Complex64::new(1.0, f64::NAN)));
        assert!(SampleValue::is_finite(Complex32::new(1.0, 2.0)));
    }

    #[test]
    fn test_sign_is_three_valued() {
        assert_eq!(sign(2.5_f64), 1.0);
        assert_eq!(sign(-0.1_f64), -1.0);
        assert_eq!(sign(0.0_f64), 0.0);
        assert_eq!(sign(-0.0_f64), 0.0);
    }

    #[test]
    fn test_real_const() {
        let three: f32 = real_const(3.0);
        assert_eq!(three, 3.0);
    }
}
