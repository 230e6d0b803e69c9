//! Explicit rounding direction for arithmetic operations.

/// Rounding direction for [`div_round`](crate::math::div_round).
///
/// The fixed-point primitives round to nearest; value-settling call sites
/// choose [`Up`](Self::Up) or [`Down`](Self::Down) so that rounding never
/// works against the pool.
///
/// # Examples
///
/// ```
/// use smart_pool::domain::Rounding;
/// use smart_pool::math::{div_round, U256};
///
/// let seven = U256::from(7u64);
/// let two = U256::from(2u64);
/// assert_eq!(div_round(seven, two, Rounding::Up), Some(U256::from(4u64)));
/// assert_eq!(div_round(seven, two, Rounding::Down), Some(U256::from(3u64)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Ceiling.
    Up,
    /// Floor.
    Down,
    /// Half up.
    Nearest,
}
