//! Core weighted pool (Balancer style).
//!
//! [`WeightedPool`] is pure bookkeeping: the registry of bound assets,
//! the swap fee, the public-swap flag, and the pool-share total supply.  It
//! never moves tokens; [`SmartPool`](super::SmartPool) pairs it with a
//! [`Ledger`](crate::traits::Ledger) and rights.
//!
//! # Storage
//!
//! Assets live in a dense `Vec` in binding order with a `HashMap` from
//! [`AssetId`] to slot, so lookups are O(1) and iteration order is stable.
//! Every insert and removal keeps three invariants:
//!
//! - asset count within `[min_assets, max_assets]` (count may only drop
//!   below the minimum during construction);
//! - every weight within `[min_weight, max_weight]`, every balance at least
//!   `min_balance` when bound or rebound;
//! - total weight at most `max_total_weight`.
//!
//! # Swap Algorithm (exact in)
//!
//! 1. `amount_in ≤ balance_in · max_in_ratio`
//! 2. `spot_before ≤ max_price`
//! 3. `amount_out = out_given_in(...) ≥ min_amount_out`
//! 4. update both balances
//! 5. `spot_before ≤ spot_after ≤ max_price` and
//!    `spot_before ≤ amount_in / amount_out`

use std::collections::HashMap;

use crate::config::{PoolConfig, PoolParams};
use crate::domain::{Asset, AssetId, Fixed, Rounding, SwapResult};
use crate::error::PoolError;
use crate::math::fixed_point::mul_div;
use crate::math::{BondingCurve, CheckedArithmetic};
use crate::traits::FromConfig;

/// A weighted constant-function pool over up to `max_assets` assets.
///
/// Created from a [`PoolConfig`] via [`FromConfig`].
///
/// # Example
///
/// ```rust
/// use smart_pool::config::PoolConfig;
/// use smart_pool::domain::{AssetId, Fixed};
/// use smart_pool::pools::WeightedPool;
/// use smart_pool::rights::Rights;
/// use smart_pool::traits::FromConfig;
///
/// let a = AssetId::from_bytes([1; 32]);
/// let b = AssetId::from_bytes([2; 32]);
/// let cfg = PoolConfig::new(
///     vec![a, b],
///     vec![Fixed::from_integer(1_000), Fixed::from_integer(1_000)],
///     vec![Fixed::from_integer(5), Fixed::from_integer(5)],
///     "0.003".parse().expect("literal"),
///     Rights::none(),
/// )
/// .expect("valid config");
///
/// let mut pool = WeightedPool::from_config(&cfg).expect("pool created");
/// let result = pool
///     .swap_exact_in(a, Fixed::from_integer(10), b, Fixed::ZERO, None)
///     .expect("swap ok");
/// assert!(result.amount_out() < Fixed::from_integer(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedPool {
    assets: Vec<Asset>,
    index: HashMap<AssetId, usize>,
    total_weight: Fixed,
    swap_fee: Fixed,
    public_swap: bool,
    total_supply: Fixed,
    params: PoolParams,
    curve: BondingCurve,
}

impl WeightedPool {
    // -- accessors ------------------------------------------------------------

    /// Bound assets in binding order.
    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Identities of the bound assets in binding order.
    pub fn asset_ids(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.assets.iter().map(Asset::id)
    }

    /// Number of bound assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns `true` if no asset is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Returns `true` if `asset` is bound.
    #[must_use]
    pub fn is_bound(&self, asset: AssetId) -> bool {
        self.index.contains_key(&asset)
    }

    /// The bound record of `asset`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidAsset`] if `asset` is not bound.
    pub fn asset(&self, asset: AssetId) -> Result<&Asset, PoolError> {
        self.index
            .get(&asset)
            .and_then(|slot| self.assets.get(*slot))
            .ok_or(PoolError::InvalidAsset("asset is not bound"))
    }

    /// Denormalized weights in binding order.
    #[must_use]
    pub fn weights(&self) -> Vec<Fixed> {
        self.assets.iter().map(Asset::weight).collect()
    }

    /// Balances in binding order.
    #[must_use]
    pub fn balances(&self) -> Vec<Fixed> {
        self.assets.iter().map(Asset::balance).collect()
    }

    /// `weight / total_weight` for `asset`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidAsset`] if `asset` is not bound.
    pub fn normalized_weight(&self, asset: AssetId) -> Result<Fixed, PoolError> {
        self.asset(asset)?.weight().safe_div(&self.total_weight)
    }

    /// Sum of all denormalized weights.
    pub const fn total_weight(&self) -> Fixed {
        self.total_weight
    }

    /// Current swap fee.
    pub const fn swap_fee(&self) -> Fixed {
        self.swap_fee
    }

    /// Whether swaps and single-asset joins/exits are open.
    #[must_use]
    pub const fn public_swap(&self) -> bool {
        self.public_swap
    }

    /// Pool-share total supply.
    pub const fn total_supply(&self) -> Fixed {
        self.total_supply
    }

    /// The params this pool was created with.
    #[must_use]
    pub const fn params(&self) -> &PoolParams {
        &self.params
    }

    /// The pricing engine.
    #[must_use]
    pub const fn curve(&self) -> &BondingCurve {
        &self.curve
    }

    // -- registry -------------------------------------------------------------

    /// Binds a new asset.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidAsset`] if `asset` is already bound.
    /// - [`PoolError::AssetCount`] if the pool is full.
    /// - [`PoolError::InvalidWeight`] if `weight` is out of bounds or the
    ///   total weight would exceed `max_total_weight`.
    /// - [`PoolError::InvalidBalance`] if `balance < min_balance`.
    pub fn bind(&mut self, asset: AssetId, balance: Fixed, weight: Fixed) -> Result<(), PoolError> {
        if self.is_bound(asset) {
            return Err(PoolError::InvalidAsset("asset is already bound"));
        }
        if self.assets.len() >= self.params.max_assets {
            return Err(PoolError::AssetCount("pool already holds max_assets"));
        }
        let total = self.checked_total_with(weight, Fixed::ZERO)?;
        self.check_balance(balance)?;

        self.index.insert(asset, self.assets.len());
        self.assets.push(Asset::new(asset, balance, weight));
        self.total_weight = total;
        Ok(())
    }

    /// Replaces the balance and weight of a bound asset.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidAsset`] if `asset` is not bound.
    /// - [`PoolError::InvalidWeight`] if `weight` is out of bounds or the
    ///   total weight would exceed `max_total_weight`.
    /// - [`PoolError::InvalidBalance`] if `balance < min_balance`.
    pub fn rebind(
        &mut self,
        asset: AssetId,
        balance: Fixed,
        weight: Fixed,
    ) -> Result<(), PoolError> {
        let slot = self.slot(asset)?;
        let old_weight = self.asset(asset)?.weight();
        let total = self.checked_total_with(weight, old_weight)?;
        self.check_balance(balance)?;

        if let Some(entry) = self.assets.get_mut(slot) {
            entry.set_balance(balance);
            entry.set_weight(weight);
        }
        self.total_weight = total;
        Ok(())
    }

    /// Removes a bound asset and returns its final record.
    ///
    /// The remaining assets keep their relative order.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidAsset`] if `asset` is not bound.
    /// - [`PoolError::AssetCount`] if the pool holds only `min_assets`.
    pub fn unbind(&mut self, asset: AssetId) -> Result<Asset, PoolError> {
        let slot = self.slot(asset)?;
        if self.assets.len() <= self.params.min_assets {
            return Err(PoolError::AssetCount("pool already holds min_assets"));
        }
        let removed = self.assets.remove(slot);
        self.total_weight = self
            .total_weight
            .safe_sub(&removed.weight())?;
        self.index.remove(&asset);
        for (i, a) in self.assets.iter().enumerate().skip(slot) {
            self.index.insert(a.id(), i);
        }
        Ok(removed)
    }

    /// Sets the swap fee.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidFee`] if `fee` is outside `[min_fee, max_fee]`.
    pub fn set_swap_fee(&mut self, fee: Fixed) -> Result<(), PoolError> {
        if !self.params.fee_ok(fee) {
            return Err(PoolError::InvalidFee(
                "swap fee must lie within [min_fee, max_fee]",
            ));
        }
        self.swap_fee = fee;
        Ok(())
    }

    /// Opens or closes public swapping.
    pub fn set_public_swap(&mut self, enabled: bool) {
        self.public_swap = enabled;
    }

    /// Adds `amount` to the pool-share total supply.
    ///
    /// # Errors
    ///
    /// [`PoolError::Overflow`] if the supply overflows.
    pub fn mint_supply(&mut self, amount: Fixed) -> Result<(), PoolError> {
        self.total_supply = self.total_supply.safe_add(&amount)?;
        Ok(())
    }

    /// Removes `amount` from the pool-share total supply.
    ///
    /// # Errors
    ///
    /// [`PoolError::Underflow`] if `amount` exceeds the supply.
    pub fn burn_supply(&mut self, amount: Fixed) -> Result<(), PoolError> {
        self.total_supply = self.total_supply.safe_sub(&amount)?;
        Ok(())
    }

    // -- pricing --------------------------------------------------------------

    /// Spot price of `asset_out` in units of `asset_in`, fee included.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidAsset`] if either asset is not bound, or any
    /// arithmetic error.
    pub fn spot_price(&self, asset_in: AssetId, asset_out: AssetId) -> Result<Fixed, PoolError> {
        let i = self.asset(asset_in)?;
        let o = self.asset(asset_out)?;
        self.curve
            .spot_price(i.balance(), i.weight(), o.balance(), o.weight(), self.swap_fee)
    }

    /// Spot price without the swap fee.
    ///
    /// # Errors
    ///
    /// Same as [`spot_price`](Self::spot_price).
    pub fn spot_price_sans_fee(
        &self,
        asset_in: AssetId,
        asset_out: AssetId,
    ) -> Result<Fixed, PoolError> {
        let i = self.asset(asset_in)?;
        let o = self.asset(asset_out)?;
        self.curve
            .spot_price(i.balance(), i.weight(), o.balance(), o.weight(), Fixed::ZERO)
    }

    /// Amount of `asset_out` a swap of `amount_in` would return.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidAsset`] for an unbound or identical pair, or
    /// any arithmetic error.
    pub fn quote_out_given_in(
        &self,
        asset_in: AssetId,
        amount_in: Fixed,
        asset_out: AssetId,
    ) -> Result<Fixed, PoolError> {
        let (i, o) = self.pair(asset_in, asset_out)?;
        self.curve.out_given_in(
            i.balance(),
            i.weight(),
            o.balance(),
            o.weight(),
            amount_in,
            self.swap_fee,
        )
    }

    /// Amount of `asset_in` needed to receive `amount_out`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidAsset`] for an unbound or identical pair, or
    /// any arithmetic error.
    pub fn quote_in_given_out(
        &self,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_out: Fixed,
    ) -> Result<Fixed, PoolError> {
        let (i, o) = self.pair(asset_in, asset_out)?;
        self.curve.in_given_out(
            i.balance(),
            i.weight(),
            o.balance(),
            o.weight(),
            amount_out,
            self.swap_fee,
        )
    }

    // -- swaps ----------------------------------------------------------------

    /// Sells exactly `amount_in` of `asset_in` for `asset_out`.
    ///
    /// `max_price` of `None` means no price limit.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SwapsPaused`] if public swapping is off.
    /// - [`PoolError::InvalidAsset`] for an unbound or identical pair.
    /// - [`PoolError::InvalidQuantity`] if `amount_in` is zero.
    /// - [`PoolError::LimitExceeded`] if the ratio cap, `min_amount_out`,
    ///   or `max_price` is violated.
    /// - [`PoolError::DomainError`] if the price moved against the trade.
    pub fn swap_exact_in(
        &mut self,
        asset_in: AssetId,
        amount_in: Fixed,
        asset_out: AssetId,
        min_amount_out: Fixed,
        max_price: Option<Fixed>,
    ) -> Result<SwapResult, PoolError> {
        self.require_public_swap()?;
        if amount_in.is_zero() {
            return Err(PoolError::InvalidQuantity("amount_in must be positive"));
        }
        let (i, o) = self.pair(asset_in, asset_out)?;
        if amount_in > i.balance().safe_mul(&self.params.max_in_ratio)? {
            return Err(PoolError::LimitExceeded("amount_in exceeds max_in_ratio"));
        }

        let spot_before = self.spot_price(asset_in, asset_out)?;
        check_max_price(spot_before, max_price, "spot price already above max_price")?;

        let amount_out = self.quote_out_given_in(asset_in, amount_in, asset_out)?;
        if amount_out < min_amount_out {
            return Err(PoolError::LimitExceeded("amount_out below min_amount_out"));
        }

        self.settle_swap(asset_in, amount_in, asset_out, amount_out, spot_before, max_price)
    }

    /// Buys exactly `amount_out` of `asset_out` with `asset_in`.
    ///
    /// `max_price` of `None` means no price limit.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SwapsPaused`] if public swapping is off.
    /// - [`PoolError::InvalidAsset`] for an unbound or identical pair.
    /// - [`PoolError::InvalidQuantity`] if `amount_out` is zero.
    /// - [`PoolError::LimitExceeded`] if the ratio cap, `max_amount_in`,
    ///   or `max_price` is violated.
    /// - [`PoolError::DomainError`] if the price moved against the trade.
    pub fn swap_exact_out(
        &mut self,
        asset_in: AssetId,
        max_amount_in: Fixed,
        asset_out: AssetId,
        amount_out: Fixed,
        max_price: Option<Fixed>,
    ) -> Result<SwapResult, PoolError> {
        self.require_public_swap()?;
        if amount_out.is_zero() {
            return Err(PoolError::InvalidQuantity("amount_out must be positive"));
        }
        let (_, o) = self.pair(asset_in, asset_out)?;
        if amount_out > o.balance().safe_mul(&self.params.max_out_ratio)? {
            return Err(PoolError::LimitExceeded("amount_out exceeds max_out_ratio"));
        }

        let spot_before = self.spot_price(asset_in, asset_out)?;
        check_max_price(spot_before, max_price, "spot price already above max_price")?;

        let amount_in = self.quote_in_given_out(asset_in, asset_out, amount_out)?;
        if amount_in > max_amount_in {
            return Err(PoolError::LimitExceeded("amount_in above max_amount_in"));
        }

        self.settle_swap(asset_in, amount_in, asset_out, amount_out, spot_before, max_price)
    }

    /// Applies a priced swap to the balances and checks the post-trade
    /// price bounds.  Leaves the pool untouched on error.
    fn settle_swap(
        &mut self,
        asset_in: AssetId,
        amount_in: Fixed,
        asset_out: AssetId,
        amount_out: Fixed,
        spot_before: Fixed,
        max_price: Option<Fixed>,
    ) -> Result<SwapResult, PoolError> {
        let mut next = self.clone();
        let new_in = next.asset(asset_in)?.balance().safe_add(&amount_in)?;
        let new_out = next.asset(asset_out)?.balance().safe_sub(&amount_out)?;
        next.set_balance(asset_in, new_in)?;
        next.set_balance(asset_out, new_out)?;

        let spot_after = next.spot_price(asset_in, asset_out)?;
        if spot_after < spot_before {
            return Err(PoolError::DomainError("spot price fell after swap"));
        }
        check_max_price(spot_after, max_price, "spot price after swap above max_price")?;
        if spot_before > amount_in.safe_div(&amount_out)? {
            return Err(PoolError::DomainError("effective price below spot price"));
        }

        let result = SwapResult::new(amount_in, amount_out, spot_after)?;
        *self = next;
        Ok(result)
    }

    // -- proportional join / exit ----------------------------------------------

    /// Mints `shares_out` against a proportional deposit of every asset.
    ///
    /// Returns the deposited amounts in binding order, each
    /// `balance * shares_out / supply` rounded up.
    ///
    /// # Errors
    ///
    /// - [`PoolError::LengthMismatch`] if `max_amounts_in` does not match
    ///   the asset count.
    /// - [`PoolError::InvalidQuantity`] if the share ratio or any amount
    ///   rounds to zero.
    /// - [`PoolError::LimitExceeded`] if an amount exceeds its maximum.
    pub fn join_pool(
        &mut self,
        shares_out: Fixed,
        max_amounts_in: &[Fixed],
    ) -> Result<Vec<Fixed>, PoolError> {
        if max_amounts_in.len() != self.assets.len() {
            return Err(PoolError::LengthMismatch(
                "max_amounts_in must match the asset count",
            ));
        }
        let ratio = shares_out.safe_div(&self.total_supply)?;
        if ratio.is_zero() {
            return Err(PoolError::InvalidQuantity("share ratio rounds to zero"));
        }

        let mut amounts = Vec::with_capacity(self.assets.len());
        for (asset, max_in) in self.assets.iter().zip(max_amounts_in) {
            let amount = mul_div(asset.balance(), shares_out, self.total_supply, Rounding::Up)?;
            if amount.is_zero() {
                return Err(PoolError::InvalidQuantity("deposit rounds to zero"));
            }
            if amount > *max_in {
                return Err(PoolError::LimitExceeded("deposit above max_amount_in"));
            }
            amounts.push(amount);
        }

        let mut next = self.clone();
        for (asset, amount) in self.assets.iter().zip(&amounts) {
            next.set_balance(asset.id(), asset.balance().safe_add(amount)?)?;
        }
        next.mint_supply(shares_out)?;
        *self = next;
        Ok(amounts)
    }

    /// Burns `shares_in` against a proportional withdrawal of every asset.
    ///
    /// Returns the withdrawn amounts in binding order, each
    /// `balance * shares_in / supply` rounded down.
    ///
    /// # Errors
    ///
    /// - [`PoolError::LengthMismatch`] if `min_amounts_out` does not match
    ///   the asset count.
    /// - [`PoolError::InvalidQuantity`] if the share ratio or any amount
    ///   rounds to zero.
    /// - [`PoolError::LimitExceeded`] if an amount falls below its minimum.
    pub fn exit_pool(
        &mut self,
        shares_in: Fixed,
        min_amounts_out: &[Fixed],
    ) -> Result<Vec<Fixed>, PoolError> {
        if min_amounts_out.len() != self.assets.len() {
            return Err(PoolError::LengthMismatch(
                "min_amounts_out must match the asset count",
            ));
        }
        let ratio = shares_in.safe_div(&self.total_supply)?;
        if ratio.is_zero() {
            return Err(PoolError::InvalidQuantity("share ratio rounds to zero"));
        }

        let mut amounts = Vec::with_capacity(self.assets.len());
        for (asset, min_out) in self.assets.iter().zip(min_amounts_out) {
            let amount = mul_div(asset.balance(), shares_in, self.total_supply, Rounding::Down)?;
            if amount.is_zero() {
                return Err(PoolError::InvalidQuantity("withdrawal rounds to zero"));
            }
            if amount < *min_out {
                return Err(PoolError::LimitExceeded("withdrawal below min_amount_out"));
            }
            amounts.push(amount);
        }

        let mut next = self.clone();
        for (asset, amount) in self.assets.iter().zip(&amounts) {
            next.set_balance(asset.id(), asset.balance().safe_sub(amount)?)?;
        }
        next.burn_supply(shares_in)?;
        *self = next;
        Ok(amounts)
    }

    // -- single-asset join / exit ----------------------------------------------

    /// Deposits exactly `amount_in` of one asset; returns the shares minted.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SwapsPaused`] if public swapping is off.
    /// - [`PoolError::InvalidAsset`] if `asset_in` is not bound.
    /// - [`PoolError::LimitExceeded`] if the ratio cap or
    ///   `min_shares_out` is violated.
    pub fn join_single(
        &mut self,
        asset_in: AssetId,
        amount_in: Fixed,
        min_shares_out: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.require_public_swap()?;
        let a = *self.asset(asset_in)?;
        if amount_in > a.balance().safe_mul(&self.params.max_in_ratio)? {
            return Err(PoolError::LimitExceeded("amount_in exceeds max_in_ratio"));
        }
        let shares_out = self.curve.pool_out_given_single_in(
            a.balance(),
            a.weight(),
            self.total_supply,
            self.total_weight,
            amount_in,
            self.swap_fee,
        )?;
        if shares_out.is_zero() {
            return Err(PoolError::InvalidQuantity("shares out rounds to zero"));
        }
        if shares_out < min_shares_out {
            return Err(PoolError::LimitExceeded("shares out below min_shares_out"));
        }
        self.settle_single(asset_in, a.balance().safe_add(&amount_in)?, shares_out, true)?;
        Ok(shares_out)
    }

    /// Mints exactly `shares_out` against one asset; returns the amount
    /// deposited.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SwapsPaused`] if public swapping is off.
    /// - [`PoolError::InvalidAsset`] if `asset_in` is not bound.
    /// - [`PoolError::InvalidQuantity`] if the amount rounds to zero.
    /// - [`PoolError::LimitExceeded`] if `max_amount_in` or the ratio cap
    ///   is violated.
    pub fn join_single_exact_shares(
        &mut self,
        asset_in: AssetId,
        shares_out: Fixed,
        max_amount_in: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.require_public_swap()?;
        let a = *self.asset(asset_in)?;
        let amount_in = self.curve.single_in_given_pool_out(
            a.balance(),
            a.weight(),
            self.total_supply,
            self.total_weight,
            shares_out,
            self.swap_fee,
        )?;
        if amount_in.is_zero() {
            return Err(PoolError::InvalidQuantity("amount_in rounds to zero"));
        }
        if amount_in > max_amount_in {
            return Err(PoolError::LimitExceeded("amount_in above max_amount_in"));
        }
        if amount_in > a.balance().safe_mul(&self.params.max_in_ratio)? {
            return Err(PoolError::LimitExceeded("amount_in exceeds max_in_ratio"));
        }
        self.settle_single(asset_in, a.balance().safe_add(&amount_in)?, shares_out, true)?;
        Ok(amount_in)
    }

    /// Redeems exactly `shares_in` for one asset; returns the amount paid
    /// out.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SwapsPaused`] if public swapping is off.
    /// - [`PoolError::InvalidAsset`] if `asset_out` is not bound.
    /// - [`PoolError::LimitExceeded`] if `min_amount_out` or the ratio cap
    ///   is violated.
    pub fn exit_single(
        &mut self,
        asset_out: AssetId,
        shares_in: Fixed,
        min_amount_out: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.require_public_swap()?;
        let a = *self.asset(asset_out)?;
        let amount_out = self.curve.single_out_given_pool_in(
            a.balance(),
            a.weight(),
            self.total_supply,
            self.total_weight,
            shares_in,
            self.swap_fee,
        )?;
        if amount_out < min_amount_out {
            return Err(PoolError::LimitExceeded("amount_out below min_amount_out"));
        }
        if amount_out > a.balance().safe_mul(&self.params.max_out_ratio)? {
            return Err(PoolError::LimitExceeded("amount_out exceeds max_out_ratio"));
        }
        self.settle_single(asset_out, a.balance().safe_sub(&amount_out)?, shares_in, false)?;
        Ok(amount_out)
    }

    /// Withdraws exactly `amount_out` of one asset; returns the shares
    /// redeemed.
    ///
    /// # Errors
    ///
    /// - [`PoolError::SwapsPaused`] if public swapping is off.
    /// - [`PoolError::InvalidAsset`] if `asset_out` is not bound.
    /// - [`PoolError::InvalidQuantity`] if the shares round to zero.
    /// - [`PoolError::LimitExceeded`] if the ratio cap or `max_shares_in`
    ///   is violated.
    pub fn exit_single_exact_amount(
        &mut self,
        asset_out: AssetId,
        amount_out: Fixed,
        max_shares_in: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.require_public_swap()?;
        let a = *self.asset(asset_out)?;
        if amount_out > a.balance().safe_mul(&self.params.max_out_ratio)? {
            return Err(PoolError::LimitExceeded("amount_out exceeds max_out_ratio"));
        }
        let shares_in = self.curve.pool_in_given_single_out(
            a.balance(),
            a.weight(),
            self.total_supply,
            self.total_weight,
            amount_out,
            self.swap_fee,
        )?;
        if shares_in.is_zero() {
            return Err(PoolError::InvalidQuantity("shares in rounds to zero"));
        }
        if shares_in > max_shares_in {
            return Err(PoolError::LimitExceeded("shares in above max_shares_in"));
        }
        self.settle_single(asset_out, a.balance().safe_sub(&amount_out)?, shares_in, false)?;
        Ok(shares_in)
    }

    // -- helpers --------------------------------------------------------------

    fn slot(&self, asset: AssetId) -> Result<usize, PoolError> {
        self.index
            .get(&asset)
            .copied()
            .ok_or(PoolError::InvalidAsset("asset is not bound"))
    }

    fn pair(&self, asset_in: AssetId, asset_out: AssetId) -> Result<(Asset, Asset), PoolError> {
        if asset_in == asset_out {
            return Err(PoolError::InvalidAsset("asset_in and asset_out must differ"));
        }
        Ok((*self.asset(asset_in)?, *self.asset(asset_out)?))
    }

    fn require_public_swap(&self) -> Result<(), PoolError> {
        if self.public_swap {
            Ok(())
        } else {
            Err(PoolError::SwapsPaused)
        }
    }

    /// Total weight after replacing `old` with `new`, bounds-checked.
    fn checked_total_with(&self, new: Fixed, old: Fixed) -> Result<Fixed, PoolError> {
        if !self.params.weight_ok(new) {
            return Err(PoolError::InvalidWeight(
                "weight must lie within [min_weight, max_weight]",
            ));
        }
        let total = self.total_weight.safe_sub(&old)?.safe_add(&new)?;
        if total > self.params.max_total_weight {
            return Err(PoolError::InvalidWeight(
                "total weight would exceed max_total_weight",
            ));
        }
        Ok(total)
    }

    fn check_balance(&self, balance: Fixed) -> Result<(), PoolError> {
        if balance < self.params.min_balance {
            return Err(PoolError::InvalidBalance(
                "balance must be at least min_balance",
            ));
        }
        Ok(())
    }

    /// Updates only the balance of a bound asset; swaps and joins move
    /// balances without revalidating weights.
    fn set_balance(&mut self, asset: AssetId, balance: Fixed) -> Result<(), PoolError> {
        let slot = self.slot(asset)?;
        if let Some(entry) = self.assets.get_mut(slot) {
            entry.set_balance(balance);
        }
        Ok(())
    }

    fn settle_single(
        &mut self,
        asset: AssetId,
        new_balance: Fixed,
        shares: Fixed,
        mint: bool,
    ) -> Result<(), PoolError> {
        let mut next = self.clone();
        next.set_balance(asset, new_balance)?;
        if mint {
            next.mint_supply(shares)?;
        } else {
            next.burn_supply(shares)?;
        }
        *self = next;
        Ok(())
    }
}

fn check_max_price(
    price: Fixed,
    max_price: Option<Fixed>,
    context: &'static str,
) -> Result<(), PoolError> {
    match max_price {
        Some(limit) if price > limit => Err(PoolError::LimitExceeded(context)),
        _ => Ok(()),
    }
}

impl FromConfig<PoolConfig> for WeightedPool {
    /// Creates a new pool from the given configuration.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`PoolConfig::validate`].
    /// - Propagates any error from [`bind`](WeightedPool::bind).
    fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let params = *config.params();
        let mut pool = Self {
            assets: Vec::with_capacity(config.assets().len()),
            index: HashMap::with_capacity(config.assets().len()),
            total_weight: Fixed::ZERO,
            swap_fee: Fixed::ZERO,
            public_swap: config.public_swap(),
            total_supply: config.initial_supply(),
            params,
            curve: params.bonding_curve(),
        };
        pool.set_swap_fee(config.swap_fee())?;
        for ((asset, balance), weight) in config
            .assets()
            .iter()
            .zip(config.balances())
            .zip(config.weights())
        {
            pool.bind(*asset, *balance, *weight)?;
        }
        Ok(pool)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::rights::Rights;

    // -- helpers --------------------------------------------------------------

    fn id(b: u8) -> AssetId {
        AssetId::from_bytes([b; 32])
    }

    fn fx(s: &str) -> Fixed {
        let Ok(v) = s.parse() else {
            panic!("valid literal {s}");
        };
        v
    }

    fn make_pool(balances: &[&str], weights: &[&str], fee: &str) -> WeightedPool {
        let n = balances.len();
        let Ok(cfg) = PoolConfig::new(
            (0..n).map(|i| id(i as u8 + 1)).collect(),
            balances.iter().map(|b| fx(b)).collect(),
            weights.iter().map(|w| fx(w)).collect(),
            fx(fee),
            Rights::none(),
        ) else {
            panic!("valid config");
        };
        let Ok(pool) = WeightedPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    fn two_asset() -> WeightedPool {
        make_pool(&["52.5", "10500"], &["5", "5"], "0.003")
    }

    // -- FromConfig -----------------------------------------------------------

    #[test]
    fn from_config_binds_in_order() {
        let pool = make_pool(&["100", "200", "300"], &["12", "1.5", "1.5"], "0.003");
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.total_weight(), fx("15"));
        assert_eq!(pool.weights(), vec![fx("12"), fx("1.5"), fx("1.5")]);
        assert_eq!(pool.balances(), vec![fx("100"), fx("200"), fx("300")]);
        assert_eq!(pool.total_supply(), fx("100"));
        assert!(pool.public_swap());
        let ids: Vec<_> = pool.asset_ids().collect();
        assert_eq!(ids, vec![id(1), id(2), id(3)]);
    }

    #[test]
    fn normalized_weight() {
        let pool = make_pool(&["100", "200"], &["12", "4"], "0.003");
        assert_eq!(pool.normalized_weight(id(1)), Ok(fx("0.75")));
        assert!(pool.normalized_weight(id(9)).is_err());
    }

    // -- registry -------------------------------------------------------------

    #[test]
    fn bind_rejects_duplicates_and_overweight() {
        let mut pool = make_pool(&["100", "200"], &["20", "20"], "0.003");
        assert!(matches!(
            pool.bind(id(1), fx("1"), fx("1")),
            Err(PoolError::InvalidAsset(_))
        ));
        assert!(matches!(
            pool.bind(id(3), fx("1"), fx("11")),
            Err(PoolError::InvalidWeight(_))
        ));
        assert!(matches!(
            pool.bind(id(3), fx("0.0000000000001"), fx("1")),
            Err(PoolError::InvalidBalance(_))
        ));
        assert_eq!(pool.bind(id(3), fx("1"), fx("10")), Ok(()));
        assert_eq!(pool.total_weight(), fx("50"));
    }

    #[test]
    fn bind_rejects_when_full() {
        let mut pool = make_pool(&["1"; 8], &["1"; 8], "0.003");
        assert!(matches!(
            pool.bind(id(9), fx("1"), fx("1")),
            Err(PoolError::AssetCount(_))
        ));
    }

    #[test]
    fn rebind_updates_total() {
        let mut pool = make_pool(&["100", "200"], &["10", "10"], "0.003");
        assert_eq!(pool.rebind(id(1), fx("150"), fx("30")), Ok(()));
        assert_eq!(pool.total_weight(), fx("40"));
        assert_eq!(pool.balances()[0], fx("150"));
        assert!(matches!(
            pool.rebind(id(1), fx("150"), fx("41")),
            Err(PoolError::InvalidWeight(_))
        ));
        assert_eq!(pool.total_weight(), fx("40"));
    }

    #[test]
    fn unbind_keeps_order_and_index() {
        let mut pool = make_pool(&["1", "2", "3"], &["1", "2", "3"], "0.003");
        let Ok(removed) = pool.unbind(id(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(removed.balance(), fx("1"));
        assert_eq!(pool.total_weight(), fx("5"));
        let ids: Vec<_> = pool.asset_ids().collect();
        assert_eq!(ids, vec![id(2), id(3)]);
        let Ok(third) = pool.asset(id(3)) else {
            panic!("still bound");
        };
        assert_eq!(third.weight(), fx("3"));
        assert!(matches!(pool.unbind(id(2)), Err(PoolError::AssetCount(_))));
        assert!(matches!(pool.unbind(id(1)), Err(PoolError::InvalidAsset(_))));
    }

    #[test]
    fn swap_fee_bounds() {
        let mut pool = two_asset();
        assert_eq!(pool.set_swap_fee(fx("0.01")), Ok(()));
        assert_eq!(pool.swap_fee(), fx("0.01"));
        assert!(matches!(pool.set_swap_fee(fx("0.5")), Err(PoolError::InvalidFee(_))));
        assert_eq!(pool.swap_fee(), fx("0.01"));
    }

    // -- swaps ----------------------------------------------------------------

    #[test]
    fn swap_exact_in_moves_balances() {
        let mut pool = two_asset();
        let Ok(quote) = pool.quote_out_given_in(id(1), fx("2.5"), id(2)) else {
            panic!("expected Ok");
        };
        let Ok(result) = pool.swap_exact_in(id(1), fx("2.5"), id(2), Fixed::ZERO, None) else {
            panic!("expected Ok");
        };
        assert_eq!(result.amount_out(), quote);
        assert_eq!(pool.balances()[0], fx("55"));
        let Ok(expected_out) = fx("10500").safe_sub(&quote) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.balances()[1], expected_out);
    }

    #[test]
    fn swap_raises_spot_price() {
        let mut pool = two_asset();
        let Ok(before) = pool.spot_price(id(1), id(2)) else {
            panic!("expected Ok");
        };
        let Ok(result) = pool.swap_exact_in(id(1), fx("1"), id(2), Fixed::ZERO, None) else {
            panic!("expected Ok");
        };
        assert!(result.spot_price_after() > before);
    }

    #[test]
    fn swap_exact_in_limits() {
        let mut pool = two_asset();
        // more than half the in-balance
        assert!(matches!(
            pool.swap_exact_in(id(1), fx("27"), id(2), Fixed::ZERO, None),
            Err(PoolError::LimitExceeded(_))
        ));
        assert!(matches!(
            pool.swap_exact_in(id(1), fx("1"), id(2), fx("1000"), None),
            Err(PoolError::LimitExceeded(_))
        ));
        assert!(matches!(
            pool.swap_exact_in(id(1), fx("1"), id(2), Fixed::ZERO, Some(fx("0.001"))),
            Err(PoolError::LimitExceeded(_))
        ));
        assert!(matches!(
            pool.swap_exact_in(id(1), Fixed::ZERO, id(2), Fixed::ZERO, None),
            Err(PoolError::InvalidQuantity(_))
        ));
        assert!(matches!(
            pool.swap_exact_in(id(1), fx("1"), id(1), Fixed::ZERO, None),
            Err(PoolError::InvalidAsset(_))
        ));
        assert_eq!(pool, two_asset());
    }

    #[test]
    fn swap_exact_out_round_trips_quote() {
        let mut pool = two_asset();
        let Ok(result) = pool.swap_exact_out(id(1), fx("10"), id(2), fx("100"), None) else {
            panic!("expected Ok");
        };
        assert_eq!(result.amount_out(), fx("100"));
        assert!(result.amount_in() > fx("0.5"));
        assert!(matches!(
            pool.swap_exact_out(id(1), fx("10"), id(2), fx("4000"), None),
            Err(PoolError::LimitExceeded(_))
        ));
    }

    #[test]
    fn paused_pool_rejects_swaps() {
        let mut pool = two_asset();
        pool.set_public_swap(false);
        assert_eq!(
            pool.swap_exact_in(id(1), fx("1"), id(2), Fixed::ZERO, None),
            Err(PoolError::SwapsPaused)
        );
        assert_eq!(
            pool.join_single(id(1), fx("1"), Fixed::ZERO),
            Err(PoolError::SwapsPaused)
        );
    }

    // -- joins / exits ----------------------------------------------------------

    #[test]
    fn proportional_join_and_exit() {
        let mut pool = make_pool(&["100", "200"], &["5", "5"], "0.003");
        let Ok(amounts) = pool.join_pool(fx("10"), &[fx("100"), fx("100")]) else {
            panic!("expected Ok");
        };
        assert_eq!(amounts, vec![fx("10"), fx("20")]);
        assert_eq!(pool.total_supply(), fx("110"));

        let Ok(amounts) = pool.exit_pool(fx("11"), &[Fixed::ZERO, Fixed::ZERO]) else {
            panic!("expected Ok");
        };
        assert_eq!(amounts, vec![fx("11"), fx("22")]);
        assert_eq!(pool.total_supply(), fx("99"));
        assert_eq!(pool.balances(), vec![fx("99"), fx("198")]);
    }

    #[test]
    fn proportional_amounts_round_toward_the_pool() {
        let shares = fx("0.333333333333333333");

        let mut joined = make_pool(&["1", "2"], &["5", "5"], "0.003");
        let Ok(deposits) = joined.join_pool(shares, &[fx("1"), fx("1")]) else {
            panic!("expected Ok");
        };
        assert_eq!(
            deposits,
            vec![fx("0.003333333333333334"), fx("0.006666666666666667")]
        );

        let mut exited = make_pool(&["1", "2"], &["5", "5"], "0.003");
        let Ok(payouts) = exited.exit_pool(shares, &[Fixed::ZERO, Fixed::ZERO]) else {
            panic!("expected Ok");
        };
        assert_eq!(
            payouts,
            vec![fx("0.003333333333333333"), fx("0.006666666666666666")]
        );
    }

    #[test]
    fn proportional_join_limits() {
        let mut pool = make_pool(&["100", "200"], &["5", "5"], "0.003");
        assert!(matches!(
            pool.join_pool(fx("10"), &[fx("100")]),
            Err(PoolError::LengthMismatch(_))
        ));
        assert!(matches!(
            pool.join_pool(fx("10"), &[fx("100"), fx("19")]),
            Err(PoolError::LimitExceeded(_))
        ));
        assert_eq!(pool.total_supply(), fx("100"));
    }

    #[test]
    fn single_join_then_exit() {
        let mut pool = make_pool(&["1000", "1000"], &["10", "10"], "0.003");
        let Ok(shares) = pool.join_single(id(1), fx("50"), Fixed::ZERO) else {
            panic!("expected Ok");
        };
        assert!(shares > Fixed::ZERO);
        assert_eq!(pool.balances()[0], fx("1050"));
        let Ok(out) = pool.exit_single(id(1), shares, Fixed::ZERO) else {
            panic!("expected Ok");
        };
        // fees keep a little of the deposit in the pool
        assert!(out < fx("50"));
        assert!(out > fx("49.8"));
    }

    #[test]
    fn single_exact_variants() {
        let mut pool = make_pool(&["1000", "1000"], &["10", "10"], "0.003");
        let Ok(paid) = pool.join_single_exact_shares(id(2), fx("1"), fx("100")) else {
            panic!("expected Ok");
        };
        assert!(paid > Fixed::ZERO);
        assert_eq!(pool.total_supply(), fx("101"));

        let Ok(burned) = pool.exit_single_exact_amount(id(2), fx("10"), fx("100")) else {
            panic!("expected Ok");
        };
        assert!(burned > Fixed::ZERO);
        assert!(matches!(
            pool.exit_single_exact_amount(id(2), fx("600"), fx("100")),
            Err(PoolError::LimitExceeded(_))
        ));
    }
}
