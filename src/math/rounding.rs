//! Rounding helpers for 256-bit integer division.
//!
//! This module provides [`div_round`], a free function that performs
//! [`U256`] division with an explicit [`Rounding`] direction.  It is the
//! low-level building block under the fixed-point `mul`/`div`/`mul_div`
//! primitives and the weight interpolation of the scheduler.
//!
//! # Convention
//!
//! The fixed-point core and the bonding-curve formulas round to nearest
//! (half-up).  Linear settlement amounts go through
//! [`mul_div`](super::fixed_point::mul_div) with a single directed rounding:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Proportional join deposit | [`Rounding::Up`] |
//! | Proportional exit payout | [`Rounding::Down`] |
//! | Shares minted on token apply or weight increase | [`Rounding::Down`] |
//! | Shares burned on token removal or weight decrease | [`Rounding::Up`] |
//! | Balance pulled on weight increase | [`Rounding::Up`] |
//! | Balance pushed on weight decrease | [`Rounding::Down`] |
//! | Scheduler weight step, rising / falling | [`Rounding::Down`] / [`Rounding::Up`] |

use super::U256;
use crate::domain::Rounding;

/// Integer division of [`U256`] values with explicit rounding direction.
///
/// - [`Rounding::Down`]: floor division.
/// - [`Rounding::Up`]: ceiling division.
/// - [`Rounding::Nearest`]: adds `denominator / 2` before flooring, so
///   exact halves round up.
///
/// Returns [`None`] if `denominator` is zero or the rounding adjustment
/// overflows.
///
/// # Examples
///
/// ```
/// use smart_pool::domain::Rounding;
/// use smart_pool::math::{div_round, U256};
///
/// let ten = U256::from(10u64);
/// let three = U256::from(3u64);
/// assert_eq!(div_round(ten, three, Rounding::Down), Some(U256::from(3u64)));
/// assert_eq!(div_round(ten, three, Rounding::Up), Some(U256::from(4u64)));
/// assert_eq!(div_round(ten, three, Rounding::Nearest), Some(U256::from(3u64)));
/// assert_eq!(div_round(ten, U256::zero(), Rounding::Down), None);
/// ```
#[must_use]
pub fn div_round(numerator: U256, denominator: U256, rounding: Rounding) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }
    match rounding {
        Rounding::Down => Some(numerator / denominator),
        Rounding::Up => {
            let q = numerator / denominator;
            if (numerator % denominator).is_zero() {
                Some(q)
            } else {
                q.checked_add(U256::one())
            }
        }
        Rounding::Nearest => numerator
            .checked_add(denominator / U256::from(2u8))
            .map(|adjusted| adjusted / denominator),
    }
}
