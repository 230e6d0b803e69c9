//! Checked arithmetic trait for fixed-point values.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, PoolError>`](crate::error::PoolError) instead
//! of panicking on overflow, underflow, or division by zero.  It is a thin
//! method-call veneer over [`fixed_point`](super::fixed_point) so formulas
//! can be written as chains.
//!
//! # Examples
//!
//! ```
//! use smart_pool::domain::Fixed;
//! use smart_pool::math::CheckedArithmetic;
//!
//! let a = Fixed::from_integer(3);
//! let b = Fixed::from_integer(2);
//! let half = a.safe_div(&b).and_then(|v| v.safe_sub(&Fixed::ONE));
//! assert_eq!(half, Ok(Fixed::from_ratio(1, 2).expect("non-zero")));
//! ```

use super::fixed_point::{self, PowLimits};
use crate::domain::Fixed;
use crate::error::PoolError;

/// Fallible fixed-point arithmetic.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
/// - `safe_mul` / `safe_div` round to nearest.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] if the result exceeds 256 bits.
    fn safe_add(&self, other: &Self) -> Result<Self, PoolError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, PoolError>;

    /// Checked fixed-point multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] if the raw product overflows.
    fn safe_mul(&self, other: &Self) -> Result<Self, PoolError>;

    /// Checked fixed-point division.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::DivisionByZero`] if `other` is zero, or
    /// [`PoolError::Overflow`] if the scaled numerator overflows.
    fn safe_div(&self, other: &Self) -> Result<Self, PoolError>;

    /// Checked fixed-point power with a fractional exponent.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::DomainError`] if `self` is outside the base
    /// range of `limits`, or any arithmetic error from the evaluation.
    fn safe_pow(&self, exp: &Self, limits: &PowLimits) -> Result<Self, PoolError>;

    /// `1 - self`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Underflow`] if `self > 1`.
    fn complement(&self) -> Result<Self, PoolError>;
}

impl CheckedArithmetic for Fixed {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, PoolError> {
        fixed_point::add(*self, *other)
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, PoolError> {
        fixed_point::sub(*self, *other)
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, PoolError> {
        fixed_point::mul(*self, *other)
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, PoolError> {
        fixed_point::div(*self, *other)
    }

    #[inline]
    fn safe_pow(&self, exp: &Self, limits: &PowLimits) -> Result<Self, PoolError> {
        fixed_point::pow(*self, *exp, limits)
    }

    #[inline]
    fn complement(&self) -> Result<Self, PoolError> {
        fixed_point::sub(Fixed::ONE, *self)
    }
}
