//! Outcome of a swap operation.

use core::fmt;

use super::Fixed;
use crate::error::PoolError;
use crate::math::CheckedArithmetic;

/// The outcome of an executed swap.
///
/// Prices follow the pool's spot-price convention: units of the in-asset
/// paid per unit of the out-asset.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
///
/// # Examples
///
/// ```
/// use smart_pool::domain::{Fixed, SwapResult};
///
/// let result = SwapResult::new(Fixed::from_integer(2), Fixed::ONE, Fixed::from_integer(2));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapResult {
    amount_in: Fixed,
    amount_out: Fixed,
    spot_price_after: Fixed,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidQuantity`] if either amount is zero.
    pub fn new(
        amount_in: Fixed,
        amount_out: Fixed,
        spot_price_after: Fixed,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(PoolError::InvalidQuantity("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(PoolError::InvalidQuantity("amount_out must be positive"));
        }
        Ok(Self {
            amount_in,
            amount_out,
            spot_price_after,
        })
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Fixed {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Fixed {
        self.amount_out
    }

    /// Returns the spot price (fee included) after the swap.
    pub const fn spot_price_after(&self) -> Fixed {
        self.spot_price_after
    }

    /// Realized price `amount_in / amount_out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the division overflows.
    pub fn effective_price(&self) -> crate::error::Result<Fixed> {
        self.amount_in.safe_div(&self.amount_out)
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult(in={}, out={}, price_after={})",
            self.amount_in, self.amount_out, self.spot_price_after
        )
    }
}
