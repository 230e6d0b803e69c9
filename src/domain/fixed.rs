//! 18-decimal unsigned fixed-point number.

use core::fmt;
use core::str::FromStr;

use crate::error::PoolError;
use crate::math::U256;

/// Number of decimal places carried by [`Fixed`].
pub const DECIMALS: usize = 18;

/// Raw value of `1.0`.
const ONE_RAW: u64 = 1_000_000_000_000_000_000;

/// An unsigned fixed-point quantity scaled by `10^18`.
///
/// Every balance, weight, fee, price, and pool-share amount in the engine
/// is a `Fixed`.  `Fixed::ONE` has raw value `10^18`; the raw integer is a
/// 256-bit word, so intermediate products overflow exactly where a 256-bit
/// machine word would.
///
/// Arithmetic lives in [`math::fixed_point`](crate::math::fixed_point) and
/// is reachable through [`CheckedArithmetic`](crate::math::CheckedArithmetic).
/// The inherent `checked_add`/`checked_sub` here are the exact, unscaled
/// operations.
///
/// # Examples
///
/// ```
/// use smart_pool::domain::Fixed;
///
/// let w: Fixed = "1.5".parse().expect("valid literal");
/// assert_eq!(w, Fixed::from_ratio(3, 2).expect("non-zero denominator"));
/// assert_eq!(w.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Fixed(U256);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// One (`10^18` raw).
    pub const ONE: Self = Self(U256([ONE_RAW, 0, 0, 0]));

    /// The smallest representable non-zero value (`10^-18`).
    pub const EPSILON: Self = Self(U256([1, 0, 0, 0]));

    /// Largest representable value.
    pub const MAX: Self = Self(U256::MAX);

    /// Wraps a raw scaled integer.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Wraps a raw scaled `u128`.
    pub fn from_raw_u128(raw: u128) -> Self {
        Self(U256::from(raw))
    }

    /// Converts a whole number into fixed-point.
    pub fn from_integer(value: u64) -> Self {
        // u64 * 10^18 < 2^124, never overflows 256 bits
        Self(U256::from(value) * U256::from(ONE_RAW))
    }

    /// Builds `numerator / denominator`, truncated to 18 decimals.
    ///
    /// Returns `None` when `denominator` is zero.
    #[must_use]
    pub fn from_ratio(numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        Some(Self(
            U256::from(numerator) * U256::from(ONE_RAW) / U256::from(denominator),
        ))
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Exact subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Absolute difference.
    pub fn abs_diff(&self, other: &Self) -> Self {
        if self.0 >= other.0 {
            Self(self.0 - other.0)
        } else {
            Self(other.0 - self.0)
        }
    }

    /// Integer part, discarding the fraction.
    #[must_use]
    pub fn trunc(&self) -> U256 {
        self.0 / U256::from(ONE_RAW)
    }

    /// Integer part re-scaled to fixed-point.
    pub fn floor(&self) -> Self {
        Self(self.trunc() * U256::from(ONE_RAW))
    }

    /// Lossy conversion to `f64`, for diagnostics and tolerance checks.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let whole = self.trunc();
        let frac = self.0 % U256::from(ONE_RAW);
        // whole parts above 2^128 are not meaningful as f64 diagnostics
        whole.low_u128() as f64 + frac.low_u64() as f64 / ONE_RAW as f64
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.trunc();
        let frac = (self.0 % U256::from(ONE_RAW)).low_u64();
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:018}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for Fixed {
    type Err = PoolError;

    /// Parses a plain decimal literal such as `"10000"`, `"1.5"` or
    /// `"0.003"`.  At most 18 fractional digits are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const MALFORMED: PoolError = PoolError::InvalidQuantity("malformed fixed-point literal");

        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(MALFORMED);
        }
        if frac.len() > DECIMALS || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MALFORMED);
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MALFORMED);
        }

        let whole = if whole.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(whole).map_err(|_| MALFORMED)?
        };
        let frac = if frac.is_empty() {
            U256::zero()
        } else {
            let padded = format!("{frac:0<width$}", width = DECIMALS);
            U256::from_dec_str(&padded).map_err(|_| MALFORMED)?
        };

        whole
            .checked_mul(U256::from(ONE_RAW))
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or(PoolError::Overflow("fixed-point literal too large"))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fixed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Fixed {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
