//! Deterministic 18-decimal fixed-point primitives.
//!
//! Every operation is exact integer arithmetic on a 256-bit word, so two
//! hosts evaluating the same inputs always agree bit-for-bit.  `mul` and
//! `div` round to nearest by adding half of the divisor before the
//! truncating division; the only approximation in the whole engine is the
//! binomial series inside [`pow_approx`].
//!
//! # Overflow policy
//!
//! No operation saturates or wraps.  Intermediate products that do not fit
//! in 256 bits fail with [`PoolError::Overflow`], subtraction below zero
//! fails with [`PoolError::Underflow`], and a zero divisor fails with
//! [`PoolError::DivisionByZero`].

use super::{div_round, U256};
use crate::domain::{Fixed, Rounding};
use crate::error::{PoolError, Result};

/// Upper bound on binomial-series terms evaluated by [`pow_approx`].
///
/// For bases inside the default `[1e-18, 2 - 1e-18]` range and realistic
/// exponents the series converges within a few dozen terms.
pub const MAX_POW_APPROX_TERMS: u32 = 10_000;

/// Domain limits and precision for [`pow`].
///
/// The binomial series only converges for bases in `(0, 2)`.  These values
/// normally come from [`PoolParams`](crate::config::PoolParams).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PowLimits {
    /// Smallest accepted base (inclusive).
    pub min_base: Fixed,
    /// Largest accepted base (inclusive).
    pub max_base: Fixed,
    /// Series terms smaller than this stop the approximation.
    pub precision: Fixed,
}

impl Default for PowLimits {
    fn default() -> Self {
        Self {
            min_base: Fixed::EPSILON,
            // 2.0 - 1e-18
            max_base: Fixed::from_raw(U256::from(2_000_000_000_000_000_000u128 - 1)),
            // 1e-10
            precision: Fixed::from_raw_u128(100_000_000),
        }
    }
}

/// `a + b`.
///
/// # Errors
///
/// [`PoolError::Overflow`] if the sum exceeds 256 bits.
pub fn add(a: Fixed, b: Fixed) -> Result<Fixed> {
    a.checked_add(&b).ok_or(PoolError::Overflow("fixed-point addition"))
}

/// `a - b`.
///
/// # Errors
///
/// [`PoolError::Underflow`] if `b > a`.
pub fn sub(a: Fixed, b: Fixed) -> Result<Fixed> {
    a.checked_sub(&b)
        .ok_or(PoolError::Underflow("fixed-point subtraction"))
}

/// `|a - b|` together with `true` when the true difference is negative.
pub fn sub_sign(a: Fixed, b: Fixed) -> (Fixed, bool) {
    if a >= b {
        (a.abs_diff(&b), false)
    } else {
        (a.abs_diff(&b), true)
    }
}

/// `a * b`, rounded to nearest.
///
/// # Errors
///
/// [`PoolError::Overflow`] if the raw product (or the half-unit rounding
/// adjustment) exceeds 256 bits.
pub fn mul(a: Fixed, b: Fixed) -> Result<Fixed> {
    let product = a
        .raw()
        .checked_mul(b.raw())
        .ok_or(PoolError::Overflow("fixed-point multiplication"))?;
    div_round(product, Fixed::ONE.raw(), Rounding::Nearest)
        .map(Fixed::from_raw)
        .ok_or(PoolError::Overflow("fixed-point multiplication rounding"))
}

/// `a / b`, rounded to nearest.
///
/// # Errors
///
/// - [`PoolError::DivisionByZero`] if `b` is zero.
/// - [`PoolError::Overflow`] if `a * 10^18` exceeds 256 bits.
pub fn div(a: Fixed, b: Fixed) -> Result<Fixed> {
    if b.is_zero() {
        return Err(PoolError::DivisionByZero);
    }
    let scaled = a
        .raw()
        .checked_mul(Fixed::ONE.raw())
        .ok_or(PoolError::Overflow("fixed-point division scaling"))?;
    div_round(scaled, b.raw(), Rounding::Nearest)
        .map(Fixed::from_raw)
        .ok_or(PoolError::Overflow("fixed-point division rounding"))
}

/// `a * b / c` with a single rounding step in the given direction.
///
/// Settlement amounts go through here: deposits and burns round
/// [`Up`](Rounding::Up), payouts and mints round [`Down`](Rounding::Down).
///
/// # Errors
///
/// - [`PoolError::DivisionByZero`] if `c` is zero.
/// - [`PoolError::Overflow`] if the raw product `a * b` exceeds 256 bits.
pub fn mul_div(a: Fixed, b: Fixed, c: Fixed, rounding: Rounding) -> Result<Fixed> {
    if c.is_zero() {
        return Err(PoolError::DivisionByZero);
    }
    let product = a
        .raw()
        .checked_mul(b.raw())
        .ok_or(PoolError::Overflow("fixed-point mul_div product"))?;
    div_round(product, c.raw(), rounding)
        .map(Fixed::from_raw)
        .ok_or(PoolError::Overflow("fixed-point mul_div rounding"))
}

/// `base^n` for a whole exponent, by repeated squaring through [`mul`].
///
/// Inherits the rounding and overflow behaviour of [`mul`].
///
/// # Errors
///
/// [`PoolError::Overflow`] if any intermediate square or product overflows.
pub fn pow_int(base: Fixed, n: u64) -> Result<Fixed> {
    let mut base = base;
    let mut result = if n % 2 != 0 { base } else { Fixed::ONE };
    let mut n = n / 2;
    while n != 0 {
        base = mul(base, base)?;
        if n % 2 != 0 {
            result = mul(result, base)?;
        }
        n /= 2;
    }
    Ok(result)
}

/// `base^exp` for a fractional exponent.
///
/// Splits `exp` into its whole part `i` and remainder `f`, and returns
/// `pow_int(base, i) * pow_approx(base, f)`.
///
/// # Errors
///
/// - [`PoolError::DomainError`] if `base` is outside
///   `[limits.min_base, limits.max_base]`.
/// - Any error from [`pow_int`], [`pow_approx`] or [`mul`].
pub fn pow(base: Fixed, exp: Fixed, limits: &PowLimits) -> Result<Fixed> {
    if base < limits.min_base {
        return Err(PoolError::DomainError("pow base below minimum"));
    }
    if base > limits.max_base {
        return Err(PoolError::DomainError("pow base above maximum"));
    }

    let whole = exp.floor();
    let remain = sub(exp, whole)?;
    let whole_exp = exp.trunc();
    if whole_exp > U256::from(u64::MAX) {
        return Err(PoolError::Overflow("pow exponent too large"));
    }
    let whole_pow = pow_int(base, whole_exp.low_u64())?;
    if remain.is_zero() {
        return Ok(whole_pow);
    }

    let partial = pow_approx(base, remain, limits.precision)?;
    mul(whole_pow, partial)
}

/// Binomial-series approximation of `base^exp` for `0 <= exp < 1`.
///
/// ```text
/// (1 + x)^a = Σ C(a, k) · x^k,   x = base − 1
/// term₀ = 1
/// termₖ = termₖ₋₁ · (a − (k − 1)) · x / k
/// ```
///
/// The sign of each term is tracked explicitly since fixed-point values are
/// unsigned.  Terms are accumulated until one falls below `precision`.
///
/// # Errors
///
/// - [`PoolError::DomainError`] if the series has not converged after
///   [`MAX_POW_APPROX_TERMS`] terms.
/// - [`PoolError::Underflow`] if the running sum would go negative.
/// - Any error from [`mul`] or [`div`].
pub fn pow_approx(base: Fixed, exp: Fixed, precision: Fixed) -> Result<Fixed> {
    let a = exp;
    let (x, x_neg) = sub_sign(base, Fixed::ONE);
    let mut term = Fixed::ONE;
    let mut sum = term;
    let mut negative = false;

    let mut k: u32 = 1;
    while term >= precision {
        if k > MAX_POW_APPROX_TERMS {
            return Err(PoolError::DomainError("pow approximation did not converge"));
        }
        let big_k = Fixed::from_integer(u64::from(k));
        let (c, c_neg) = sub_sign(a, sub(big_k, Fixed::ONE)?);
        term = mul(term, mul(c, x)?)?;
        term = div(term, big_k)?;
        if term.is_zero() {
            break;
        }
        if x_neg {
            negative = !negative;
        }
        if c_neg {
            negative = !negative;
        }
        sum = if negative {
            sub(sum, term)?
        } else {
            add(sum, term)?
        };
        k += 1;
    }
    Ok(sum)
}
