//! Weighted bonding-curve formulas.
//!
//! The pool invariant is the weighted geometric mean
//!
//! ```text
//! V = ∏ Bᵢ ^ (Wᵢ / ΣW)
//! ```
//!
//! Every formula here takes denormalized weights; only their ratios matter,
//! so callers never normalize up front.  All steps go through
//! [`fixed_point`](super::fixed_point), and the only approximation is the
//! fractional [`pow`](super::fixed_point::pow).
//!
//! # Single-asset joins and exits
//!
//! Depositing a single asset is equivalent to depositing proportionally and
//! swapping the `(1 − normalized weight)` share into the other assets.  The
//! swap fee is therefore charged on that share only.  The four single-asset
//! formulas are inverses of each other up to rounding.
//!
//! # Exit fee
//!
//! The exit fee is [`EXIT_FEE`], zero.  The push/pull flow of exits sends
//! the full pool-share amount to be burned, so a non-zero value would leave
//! collected shares stranded; [`PoolParams::validate`] rejects any other
//! value.
//!
//! [`PoolParams::validate`]: crate::config::PoolParams::validate

use super::fixed_point::{self, PowLimits};
use super::CheckedArithmetic;
use crate::domain::Fixed;
use crate::error::Result;

/// Exit fee charged on pool shares redeemed through an exit.
pub const EXIT_FEE: Fixed = Fixed::ZERO;

/// Stateless pricing engine parameterised by the `pow` domain limits.
///
/// # Examples
///
/// ```
/// use smart_pool::domain::Fixed;
/// use smart_pool::math::BondingCurve;
///
/// let curve = BondingCurve::default();
/// let bal_in: Fixed = "52.5".parse().expect("literal");
/// let bal_out: Fixed = "10500".parse().expect("literal");
/// let weight = Fixed::from_integer(5);
///
/// let price = curve
///     .spot_price(bal_in, weight, bal_out, weight, Fixed::ZERO)
///     .expect("price");
/// assert_eq!(price, "0.005".parse().expect("literal"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BondingCurve {
    limits: PowLimits,
}

impl BondingCurve {
    /// Creates a curve using the given `pow` limits.
    pub const fn new(limits: PowLimits) -> Self {
        Self { limits }
    }

    /// Returns the `pow` limits used by the fractional-power steps.
    #[must_use]
    pub const fn limits(&self) -> &PowLimits {
        &self.limits
    }

    /// Price of one unit of the out-asset in units of the in-asset,
    /// including the swap fee.
    ///
    /// ```text
    /// sP = (bI / wI) / (bO / wO) · 1 / (1 − fee)
    /// ```
    ///
    /// # Errors
    ///
    /// [`DivisionByZero`](crate::error::PoolError::DivisionByZero) for a
    /// zero weight, zero out-balance or a fee of one, or any arithmetic
    /// error.
    pub fn spot_price(
        &self,
        balance_in: Fixed,
        weight_in: Fixed,
        balance_out: Fixed,
        weight_out: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let numer = balance_in.safe_div(&weight_in)?;
        let denom = balance_out.safe_div(&weight_out)?;
        let ratio = numer.safe_div(&denom)?;
        let scale = Fixed::ONE.safe_div(&swap_fee.complement()?)?;
        ratio.safe_mul(&scale)
    }

    /// Out-asset amount received for an exact `amount_in`.
    ///
    /// ```text
    /// aO = bO · (1 − (bI / (bI + aI · (1 − fee))) ^ (wI / wO))
    /// ```
    ///
    /// # Errors
    ///
    /// [`DomainError`](crate::error::PoolError::DomainError) if the
    /// balance ratio leaves the `pow` domain, or any arithmetic error.
    pub fn out_given_in(
        &self,
        balance_in: Fixed,
        weight_in: Fixed,
        balance_out: Fixed,
        weight_out: Fixed,
        amount_in: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let weight_ratio = weight_in.safe_div(&weight_out)?;
        let adjusted_in = amount_in.safe_mul(&swap_fee.complement()?)?;
        let y = balance_in.safe_div(&balance_in.safe_add(&adjusted_in)?)?;
        let foo = y.safe_pow(&weight_ratio, &self.limits)?;
        let bar = foo.complement()?;
        balance_out.safe_mul(&bar)
    }

    /// In-asset amount required to receive an exact `amount_out`.
    ///
    /// ```text
    /// aI = bI · ((bO / (bO − aO)) ^ (wO / wI) − 1) / (1 − fee)
    /// ```
    ///
    /// # Errors
    ///
    /// [`Underflow`](crate::error::PoolError::Underflow) if `amount_out`
    /// exceeds `balance_out`,
    /// [`DomainError`](crate::error::PoolError::DomainError) if the
    /// balance ratio leaves the `pow` domain, or any arithmetic error.
    pub fn in_given_out(
        &self,
        balance_in: Fixed,
        weight_in: Fixed,
        balance_out: Fixed,
        weight_out: Fixed,
        amount_out: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let weight_ratio = weight_out.safe_div(&weight_in)?;
        let diff = balance_out.safe_sub(&amount_out)?;
        let y = balance_out.safe_div(&diff)?;
        let foo = y.safe_pow(&weight_ratio, &self.limits)?;
        let foo = foo.safe_sub(&Fixed::ONE)?;
        balance_in
            .safe_mul(&foo)?
            .safe_div(&swap_fee.complement()?)
    }

    /// Pool shares minted for an exact single-asset deposit.
    ///
    /// ```text
    /// nW  = wI / ΣW
    /// aI' = aI · (1 − (1 − nW) · fee)
    /// pO  = ((bI + aI') / bI) ^ nW · S − S
    /// ```
    ///
    /// # Errors
    ///
    /// Any arithmetic or `pow` domain error.
    pub fn pool_out_given_single_in(
        &self,
        balance_in: Fixed,
        weight_in: Fixed,
        pool_supply: Fixed,
        total_weight: Fixed,
        amount_in: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let normalized = weight_in.safe_div(&total_weight)?;
        let zaz = normalized.complement()?.safe_mul(&swap_fee)?;
        let in_after_fee = amount_in.safe_mul(&zaz.complement()?)?;

        let new_balance = balance_in.safe_add(&in_after_fee)?;
        let token_ratio = new_balance.safe_div(&balance_in)?;
        let pool_ratio = token_ratio.safe_pow(&normalized, &self.limits)?;
        let new_supply = pool_ratio.safe_mul(&pool_supply)?;
        new_supply.safe_sub(&pool_supply)
    }

    /// Single-asset deposit required to mint exactly `pool_out` shares.
    ///
    /// ```text
    /// nW  = wI / ΣW
    /// aI' = ((S + pO) / S) ^ (1 / nW) · bI − bI
    /// aI  = aI' / (1 − (1 − nW) · fee)
    /// ```
    ///
    /// # Errors
    ///
    /// Any arithmetic or `pow` domain error.
    pub fn single_in_given_pool_out(
        &self,
        balance_in: Fixed,
        weight_in: Fixed,
        pool_supply: Fixed,
        total_weight: Fixed,
        pool_out: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let normalized = weight_in.safe_div(&total_weight)?;
        let new_supply = pool_supply.safe_add(&pool_out)?;
        let pool_ratio = new_supply.safe_div(&pool_supply)?;

        let inverse = Fixed::ONE.safe_div(&normalized)?;
        let token_ratio = pool_ratio.safe_pow(&inverse, &self.limits)?;
        let new_balance = token_ratio.safe_mul(&balance_in)?;
        let in_after_fee = new_balance.safe_sub(&balance_in)?;

        let zar = normalized.complement()?.safe_mul(&swap_fee)?;
        in_after_fee.safe_div(&zar.complement()?)
    }

    /// Asset amount paid out for redeeming exactly `pool_in` shares into a
    /// single asset.
    ///
    /// ```text
    /// nW  = wO / ΣW
    /// pI' = pI · (1 − exitFee)
    /// aO' = bO − ((S − pI') / S) ^ (1 / nW) · bO
    /// aO  = aO' · (1 − (1 − nW) · fee)
    /// ```
    ///
    /// # Errors
    ///
    /// [`Underflow`](crate::error::PoolError::Underflow) if `pool_in`
    /// exceeds the supply, or any arithmetic or `pow` domain error.
    pub fn single_out_given_pool_in(
        &self,
        balance_out: Fixed,
        weight_out: Fixed,
        pool_supply: Fixed,
        total_weight: Fixed,
        pool_in: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let normalized = weight_out.safe_div(&total_weight)?;
        let pool_after_exit_fee = pool_in.safe_mul(&EXIT_FEE.complement()?)?;
        let new_supply = pool_supply.safe_sub(&pool_after_exit_fee)?;
        let pool_ratio = new_supply.safe_div(&pool_supply)?;

        let inverse = Fixed::ONE.safe_div(&normalized)?;
        let token_ratio = pool_ratio.safe_pow(&inverse, &self.limits)?;
        let new_balance = token_ratio.safe_mul(&balance_out)?;
        let out_before_fee = balance_out.safe_sub(&new_balance)?;

        let zaz = normalized.complement()?.safe_mul(&swap_fee)?;
        out_before_fee.safe_mul(&zaz.complement()?)
    }

    /// Pool shares that must be redeemed to withdraw exactly `amount_out`
    /// of a single asset.
    ///
    /// ```text
    /// nW  = wO / ΣW
    /// aO' = aO / (1 − (1 − nW) · fee)
    /// pI  = (S − ((bO − aO') / bO) ^ nW · S) / (1 − exitFee)
    /// ```
    ///
    /// # Errors
    ///
    /// [`Underflow`](crate::error::PoolError::Underflow) if the fee-adjusted
    /// amount exceeds the balance, or any arithmetic or `pow` domain error.
    pub fn pool_in_given_single_out(
        &self,
        balance_out: Fixed,
        weight_out: Fixed,
        pool_supply: Fixed,
        total_weight: Fixed,
        amount_out: Fixed,
        swap_fee: Fixed,
    ) -> Result<Fixed> {
        let normalized = weight_out.safe_div(&total_weight)?;
        let zar = normalized.complement()?.safe_mul(&swap_fee)?;
        let out_before_fee = amount_out.safe_div(&zar.complement()?)?;

        let new_balance = balance_out.safe_sub(&out_before_fee)?;
        let token_ratio = new_balance.safe_div(&balance_out)?;
        let pool_ratio = token_ratio.safe_pow(&normalized, &self.limits)?;
        let new_supply = pool_ratio.safe_mul(&pool_supply)?;
        let pool_after_exit_fee = pool_supply.safe_sub(&new_supply)?;
        pool_after_exit_fee.safe_div(&EXIT_FEE.complement()?)
    }

    /// `base ^ exp` under this curve's limits.
    ///
    /// # Errors
    ///
    /// See [`fixed_point::pow`].
    pub fn pow(&self, base: Fixed, exp: Fixed) -> Result<Fixed> {
        fixed_point::pow(base, exp, &self.limits)
    }
}
