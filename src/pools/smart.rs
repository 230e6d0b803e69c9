//! Rights-gated smart pool.
//!
//! [`SmartPool`] wraps a [`WeightedPool`] with the governance machinery:
//! capability checks, the [`WeightScheduler`], the [`TokenLifecycle`], the
//! pool-share cap, the LP whitelist, an event buffer, and the [`Ledger`]
//! that settles every balance move.
//!
//! # Atomicity
//!
//! Every mutating entry point runs inside [`transact`](SmartPool::transact):
//! it takes the reentrancy guard, snapshots all pool-side state, runs the
//! operation, and restores the snapshot (dropping any buffered events) if
//! anything fails.
//!
//! Bookkeeping is updated first, then all ledger legs of the operation are
//! settled as one [`Settlement`]: every pull, burn and push is checked
//! against the ledger before the first call, and legs already run are
//! reversed if a later one fails.  Shares are minted last.

use std::collections::HashSet;

use crate::domain::{AccountId, AssetId, BlockNumber, Fixed, SwapResult};
use crate::error::PoolError;
use crate::events::PoolEvent;
use crate::manager::{
    reweight_single, AdvanceOutcome, AppliedToken, RemovedToken, ReweightOutcome,
    TokenLifecycle, WeightScheduler,
};
use crate::math::CheckedArithmetic;
use crate::rights::{Capability, Rights};
use crate::traits::Ledger;

use super::guard::ReentrancyLock;
use super::settlement::Settlement;
use super::WeightedPool;

/// Pool-side state restored when an operation fails.
struct Snapshot {
    core: WeightedPool,
    scheduler: WeightScheduler,
    lifecycle: TokenLifecycle,
    cap: Fixed,
    whitelist: HashSet<AccountId>,
    events: usize,
}

/// A configurable-rights weighted pool bound to a ledger.
///
/// Created by [`SmartPoolFactory::create`](crate::factory::SmartPoolFactory::create).
#[derive(Debug)]
pub struct SmartPool<L: Ledger> {
    core: WeightedPool,
    rights: Rights,
    scheduler: WeightScheduler,
    lifecycle: TokenLifecycle,
    cap: Fixed,
    whitelist: HashSet<AccountId>,
    events: Vec<PoolEvent>,
    lock: ReentrancyLock,
    ledger: L,
}

impl<L: Ledger> SmartPool<L> {
    /// Assembles a pool whose initial balances and supply are already
    /// settled on `ledger`.
    ///
    /// The cap starts at the initial supply when the cap can be changed,
    /// and is unlimited otherwise.
    pub(crate) fn from_parts(core: WeightedPool, rights: Rights, ledger: L) -> Self {
        let cap = if rights.can_change_cap {
            core.total_supply()
        } else {
            Fixed::MAX
        };
        Self {
            core,
            rights,
            scheduler: WeightScheduler::new(),
            lifecycle: TokenLifecycle::new(),
            cap,
            whitelist: HashSet::new(),
            events: Vec::new(),
            lock: ReentrancyLock::new(),
            ledger,
        }
    }

    // -- accessors ------------------------------------------------------------

    /// The underlying weighted pool.
    #[must_use]
    pub const fn core(&self) -> &WeightedPool {
        &self.core
    }

    /// Capabilities fixed at creation.
    #[must_use]
    pub const fn rights(&self) -> Rights {
        self.rights
    }

    /// Gradual-update state.
    #[must_use]
    pub const fn scheduler(&self) -> &WeightScheduler {
        &self.scheduler
    }

    /// Pending-commit state.
    #[must_use]
    pub const fn lifecycle(&self) -> &TokenLifecycle {
        &self.lifecycle
    }

    /// Upper bound on the pool-share supply reachable through joins.
    pub const fn cap(&self) -> Fixed {
        self.cap
    }

    /// Pool-share total supply.
    pub const fn total_supply(&self) -> Fixed {
        self.core.total_supply()
    }

    /// Fraction of the pool held by `holder`.
    ///
    /// # Errors
    ///
    /// [`PoolError::DivisionByZero`] if the supply is zero.
    pub fn ownership(&self, holder: AccountId) -> Result<Fixed, PoolError> {
        self.ledger
            .share_balance(holder)
            .safe_div(&self.core.total_supply())
    }

    /// Returns `true` if `account` may join when whitelisting is on.
    #[must_use]
    pub fn is_whitelisted(&self, account: AccountId) -> bool {
        self.whitelist.contains(&account)
    }

    /// Returns `true` if `account` may currently join.
    #[must_use]
    pub fn can_provide_liquidity(&self, account: AccountId) -> bool {
        !self.rights.can_whitelist_lps || self.whitelist.contains(&account)
    }

    /// The settlement ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the settlement ledger, e.g. to fund accounts.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Events buffered since the last [`take_events`](Self::take_events).
    #[must_use]
    pub fn events(&self) -> &[PoolEvent] {
        &self.events
    }

    /// Drains the event buffer.
    pub fn take_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    // -- quotes ---------------------------------------------------------------

    /// Spot price of `asset_out` in `asset_in`, fee included.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::spot_price`].
    pub fn spot_price(&self, asset_in: AssetId, asset_out: AssetId) -> Result<Fixed, PoolError> {
        self.core.spot_price(asset_in, asset_out)
    }

    /// Amount out for an exact-in swap, without executing it.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::quote_out_given_in`].
    pub fn quote_swap(
        &self,
        asset_in: AssetId,
        amount_in: Fixed,
        asset_out: AssetId,
    ) -> Result<Fixed, PoolError> {
        let out = self.core.quote_out_given_in(asset_in, amount_in, asset_out)?;
        tracing::debug!(%asset_in, %asset_out, %amount_in, amount_out = %out, "quote");
        Ok(out)
    }

    /// Amount in for an exact-out swap, without executing it.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::quote_in_given_out`].
    pub fn quote_swap_exact_out(
        &self,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_out: Fixed,
    ) -> Result<Fixed, PoolError> {
        let amount_in = self.core.quote_in_given_out(asset_in, asset_out, amount_out)?;
        tracing::debug!(%asset_in, %asset_out, %amount_in, %amount_out, "quote exact out");
        Ok(amount_in)
    }

    // -- weights --------------------------------------------------------------

    /// Schedules a gradual update of every weight.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_change_weights`.
    /// - See [`WeightScheduler::schedule`].
    pub fn schedule(
        &mut self,
        new_weights: &[Fixed],
        start_block: BlockNumber,
        end_block: BlockNumber,
        current_block: BlockNumber,
    ) -> Result<(), PoolError> {
        self.rights.require(Capability::ChangeWeights)?;
        self.transact(|pool| {
            let plan = pool.scheduler.schedule(
                &pool.core,
                &pool.lifecycle,
                new_weights,
                start_block,
                end_block,
                current_block,
            )?;
            let event = PoolEvent::WeightsScheduled {
                start_block: plan.start_block(),
                end_block: plan.end_block(),
                start_weights: plan.start_weights().to_vec(),
                end_weights: plan.end_weights().to_vec(),
            };
            tracing::info!(
                start_block = plan.start_block(),
                end_block = plan.end_block(),
                "weights scheduled"
            );
            pool.events.push(event);
            Ok(())
        })
    }

    /// Moves weights along the active plan.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_change_weights`.
    /// - See [`WeightScheduler::advance`].
    pub fn advance(&mut self, current_block: BlockNumber) -> Result<AdvanceOutcome, PoolError> {
        self.rights.require(Capability::ChangeWeights)?;
        self.transact(|pool| {
            let outcome = pool.scheduler.advance(&mut pool.core, current_block)?;
            if outcome == AdvanceOutcome::Finished {
                tracing::info!(block = current_block, "gradual update finished");
                pool.events.push(PoolEvent::WeightsUpdateFinished {
                    block: current_block,
                });
            }
            Ok(outcome)
        })
    }

    /// Changes one weight at once, settling the balance and share delta
    /// with `caller`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_change_weights`.
    /// - See [`reweight_single`] and the ledger errors.
    pub fn reweight_single(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        new_weight: Fixed,
    ) -> Result<ReweightOutcome, PoolError> {
        self.rights.require(Capability::ChangeWeights)?;
        self.transact(|pool| {
            let old = pool.core.asset(asset)?.weight();
            let outcome = reweight_single(
                &mut pool.core,
                &pool.scheduler,
                &pool.lifecycle,
                asset,
                new_weight,
            )?;
            let settlement = match outcome {
                ReweightOutcome::Unchanged => return Ok(outcome),
                ReweightOutcome::Increased {
                    balance_in,
                    shares_minted,
                } => Settlement::with(caller)
                    .pull(asset, balance_in)
                    .mint(shares_minted),
                ReweightOutcome::Decreased {
                    balance_out,
                    shares_burned,
                } => Settlement::with(caller)
                    .burn(shares_burned)
                    .push(asset, balance_out),
            };
            settlement.execute(&mut pool.ledger)?;
            tracing::info!(%asset, %old, new = %new_weight, "weight changed");
            pool.events.push(PoolEvent::WeightChanged {
                asset,
                old,
                new: new_weight,
            });
            Ok(outcome)
        })
    }

    // -- token lifecycle --------------------------------------------------------

    /// Announces a new asset.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_add_remove_tokens`.
    /// - See [`TokenLifecycle::commit`].
    pub fn commit_token(
        &mut self,
        asset: AssetId,
        balance: Fixed,
        weight: Fixed,
        current_block: BlockNumber,
    ) -> Result<(), PoolError> {
        self.rights.require(Capability::AddRemoveTokens)?;
        self.transact(|pool| {
            pool.lifecycle.commit(
                &pool.core,
                &pool.scheduler,
                asset,
                balance,
                weight,
                current_block,
            )?;
            tracing::info!(%asset, %balance, %weight, block = current_block, "token committed");
            pool.events.push(PoolEvent::TokenCommitted {
                asset,
                balance,
                weight,
                commit_block: current_block,
            });
            Ok(())
        })
    }

    /// Binds the committed asset, pulling its balance from `caller` and
    /// minting the new shares to `caller`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_add_remove_tokens`.
    /// - See [`TokenLifecycle::apply`] and the ledger errors.
    pub fn apply_token(
        &mut self,
        caller: AccountId,
        current_block: BlockNumber,
    ) -> Result<AppliedToken, PoolError> {
        self.rights.require(Capability::AddRemoveTokens)?;
        self.transact(|pool| {
            let applied = pool.lifecycle.apply(&mut pool.core, current_block)?;
            Settlement::with(caller)
                .pull(applied.asset, applied.balance)
                .mint(applied.shares_minted)
                .execute(&mut pool.ledger)?;
            tracing::info!(
                asset = %applied.asset,
                shares = %applied.shares_minted,
                "token applied"
            );
            pool.events.push(PoolEvent::TokenApplied {
                asset: applied.asset,
            });
            Ok(applied)
        })
    }

    /// Unbinds `asset`, burning the proportional shares from `caller` and
    /// paying out its whole balance to `caller`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_add_remove_tokens`.
    /// - See [`TokenLifecycle::remove`] and the ledger errors.
    pub fn remove_token(
        &mut self,
        caller: AccountId,
        asset: AssetId,
    ) -> Result<RemovedToken, PoolError> {
        self.rights.require(Capability::AddRemoveTokens)?;
        self.transact(|pool| {
            let removed = pool.lifecycle.remove(&mut pool.core, &pool.scheduler, asset)?;
            Settlement::with(caller)
                .burn(removed.shares_burned)
                .push(asset, removed.balance)
                .execute(&mut pool.ledger)?;
            tracing::info!(%asset, shares = %removed.shares_burned, "token removed");
            pool.events.push(PoolEvent::TokenRemoved { asset });
            Ok(removed)
        })
    }

    // -- admin ----------------------------------------------------------------

    /// Sets the swap fee.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_change_swap_fee`.
    /// - [`PoolError::InvalidFee`] if out of bounds.
    pub fn set_swap_fee(&mut self, fee: Fixed) -> Result<(), PoolError> {
        self.rights.require(Capability::ChangeSwapFee)?;
        self.transact(|pool| {
            let old = pool.core.swap_fee();
            pool.core.set_swap_fee(fee)?;
            tracing::info!(%old, new = %fee, "swap fee changed");
            pool.events.push(PoolEvent::SwapFeeChanged { old, new: fee });
            Ok(())
        })
    }

    /// Opens or closes public swapping.
    ///
    /// # Errors
    ///
    /// [`PoolError::PermissionDenied`] without `can_pause_swapping`.
    pub fn set_public_swap(&mut self, enabled: bool) -> Result<(), PoolError> {
        self.rights.require(Capability::PauseSwapping)?;
        self.transact(|pool| {
            pool.core.set_public_swap(enabled);
            tracing::info!(enabled, "public swap changed");
            pool.events.push(PoolEvent::PublicSwapChanged { enabled });
            Ok(())
        })
    }

    /// Sets the pool-share cap.
    ///
    /// # Errors
    ///
    /// [`PoolError::PermissionDenied`] without `can_change_cap`.
    pub fn set_cap(&mut self, cap: Fixed) -> Result<(), PoolError> {
        self.rights.require(Capability::ChangeCap)?;
        self.transact(|pool| {
            let old = pool.cap;
            pool.cap = cap;
            tracing::info!(%old, new = %cap, "cap changed");
            pool.events.push(PoolEvent::CapChanged { old, new: cap });
            Ok(())
        })
    }

    /// Allows `account` to join.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_whitelist_lps`.
    /// - [`PoolError::InvalidConfiguration`] if already whitelisted.
    pub fn whitelist_lp(&mut self, account: AccountId) -> Result<(), PoolError> {
        self.rights.require(Capability::WhitelistLps)?;
        self.transact(|pool| {
            if !pool.whitelist.insert(account) {
                return Err(PoolError::InvalidConfiguration("account already whitelisted"));
            }
            tracing::info!(%account, "lp whitelisted");
            pool.events.push(PoolEvent::LpWhitelisted { account });
            Ok(())
        })
    }

    /// Revokes `account`'s permission to join.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PermissionDenied`] without `can_whitelist_lps`.
    /// - [`PoolError::NotWhitelisted`] if `account` was not whitelisted.
    pub fn remove_whitelisted_lp(&mut self, account: AccountId) -> Result<(), PoolError> {
        self.rights.require(Capability::WhitelistLps)?;
        self.transact(|pool| {
            if !pool.whitelist.remove(&account) {
                return Err(PoolError::NotWhitelisted);
            }
            tracing::info!(%account, "lp removed from whitelist");
            pool.events.push(PoolEvent::LpRemovedFromWhitelist { account });
            Ok(())
        })
    }

    // -- swaps ----------------------------------------------------------------

    /// Sells exactly `amount_in` of `asset_in` from `caller`.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::swap_exact_in`] and the ledger errors.
    pub fn swap_exact_in(
        &mut self,
        caller: AccountId,
        asset_in: AssetId,
        amount_in: Fixed,
        asset_out: AssetId,
        min_amount_out: Fixed,
        max_price: Option<Fixed>,
    ) -> Result<SwapResult, PoolError> {
        self.transact(|pool| {
            let result =
                pool.core
                    .swap_exact_in(asset_in, amount_in, asset_out, min_amount_out, max_price)?;
            pool.settle_swap(caller, asset_in, asset_out, &result)?;
            Ok(result)
        })
    }

    /// Buys exactly `amount_out` of `asset_out` for `caller`.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::swap_exact_out`] and the ledger errors.
    pub fn swap_exact_out(
        &mut self,
        caller: AccountId,
        asset_in: AssetId,
        max_amount_in: Fixed,
        asset_out: AssetId,
        amount_out: Fixed,
        max_price: Option<Fixed>,
    ) -> Result<SwapResult, PoolError> {
        self.transact(|pool| {
            let result =
                pool.core
                    .swap_exact_out(asset_in, max_amount_in, asset_out, amount_out, max_price)?;
            pool.settle_swap(caller, asset_in, asset_out, &result)?;
            Ok(result)
        })
    }

    fn settle_swap(
        &mut self,
        caller: AccountId,
        asset_in: AssetId,
        asset_out: AssetId,
        result: &SwapResult,
    ) -> Result<(), PoolError> {
        Settlement::with(caller)
            .pull(asset_in, result.amount_in())
            .push(asset_out, result.amount_out())
            .execute(&mut self.ledger)?;
        tracing::info!(
            %caller,
            %asset_in,
            %asset_out,
            amount_in = %result.amount_in(),
            amount_out = %result.amount_out(),
            "swap"
        );
        self.events.push(PoolEvent::Swap {
            caller,
            asset_in,
            asset_out,
            amount_in: result.amount_in(),
            amount_out: result.amount_out(),
        });
        Ok(())
    }

    // -- liquidity ------------------------------------------------------------

    /// Mints `shares_out` to `caller` against a proportional deposit.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotWhitelisted`] if whitelisting is on and `caller`
    ///   is not listed.
    /// - [`PoolError::CapExceeded`] if the supply would pass the cap.
    /// - See [`WeightedPool::join_pool`] and the ledger errors.
    pub fn join_pool(
        &mut self,
        caller: AccountId,
        shares_out: Fixed,
        max_amounts_in: &[Fixed],
    ) -> Result<Vec<Fixed>, PoolError> {
        self.require_liquidity_provider(caller)?;
        self.transact(|pool| {
            let amounts = pool.core.join_pool(shares_out, max_amounts_in)?;
            pool.check_cap()?;
            let assets: Vec<AssetId> = pool.core.asset_ids().collect();
            assets
                .iter()
                .zip(&amounts)
                .fold(Settlement::with(caller), |s, (asset, amount)| {
                    s.pull(*asset, *amount)
                })
                .mint(shares_out)
                .execute(&mut pool.ledger)?;
            for (asset, amount) in assets.into_iter().zip(&amounts) {
                pool.events.push(PoolEvent::Join {
                    caller,
                    asset,
                    amount: *amount,
                });
            }
            tracing::info!(%caller, shares = %shares_out, "join pool");
            Ok(amounts)
        })
    }

    /// Burns `shares_in` from `caller` against a proportional withdrawal.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::exit_pool`] and the ledger errors.
    pub fn exit_pool(
        &mut self,
        caller: AccountId,
        shares_in: Fixed,
        min_amounts_out: &[Fixed],
    ) -> Result<Vec<Fixed>, PoolError> {
        self.transact(|pool| {
            let amounts = pool.core.exit_pool(shares_in, min_amounts_out)?;
            let assets: Vec<AssetId> = pool.core.asset_ids().collect();
            assets
                .iter()
                .zip(&amounts)
                .fold(Settlement::with(caller).burn(shares_in), |s, (asset, amount)| {
                    s.push(*asset, *amount)
                })
                .execute(&mut pool.ledger)?;
            for (asset, amount) in assets.into_iter().zip(&amounts) {
                pool.events.push(PoolEvent::Exit {
                    caller,
                    asset,
                    amount: *amount,
                });
            }
            tracing::info!(%caller, shares = %shares_in, "exit pool");
            Ok(amounts)
        })
    }

    /// Deposits exactly `amount_in` of one asset; returns shares minted.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotWhitelisted`] or [`PoolError::CapExceeded`] as
    ///   for [`join_pool`](Self::join_pool).
    /// - See [`WeightedPool::join_single`] and the ledger errors.
    pub fn join_single(
        &mut self,
        caller: AccountId,
        asset_in: AssetId,
        amount_in: Fixed,
        min_shares_out: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.require_liquidity_provider(caller)?;
        self.transact(|pool| {
            let shares = pool.core.join_single(asset_in, amount_in, min_shares_out)?;
            pool.settle_single_join(caller, asset_in, amount_in, shares)?;
            Ok(shares)
        })
    }

    /// Mints exactly `shares_out` against one asset; returns the amount
    /// deposited.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotWhitelisted`] or [`PoolError::CapExceeded`] as
    ///   for [`join_pool`](Self::join_pool).
    /// - See [`WeightedPool::join_single_exact_shares`] and the ledger
    ///   errors.
    pub fn join_single_exact_shares(
        &mut self,
        caller: AccountId,
        asset_in: AssetId,
        shares_out: Fixed,
        max_amount_in: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.require_liquidity_provider(caller)?;
        self.transact(|pool| {
            let amount = pool
                .core
                .join_single_exact_shares(asset_in, shares_out, max_amount_in)?;
            pool.settle_single_join(caller, asset_in, amount, shares_out)?;
            Ok(amount)
        })
    }

    /// Redeems exactly `shares_in` for one asset; returns the amount paid.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::exit_single`] and the ledger errors.
    pub fn exit_single(
        &mut self,
        caller: AccountId,
        asset_out: AssetId,
        shares_in: Fixed,
        min_amount_out: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.transact(|pool| {
            let amount = pool.core.exit_single(asset_out, shares_in, min_amount_out)?;
            pool.settle_single_exit(caller, asset_out, amount, shares_in)?;
            Ok(amount)
        })
    }

    /// Withdraws exactly `amount_out` of one asset; returns shares burned.
    ///
    /// # Errors
    ///
    /// See [`WeightedPool::exit_single_exact_amount`] and the ledger errors.
    pub fn exit_single_exact_amount(
        &mut self,
        caller: AccountId,
        asset_out: AssetId,
        amount_out: Fixed,
        max_shares_in: Fixed,
    ) -> Result<Fixed, PoolError> {
        self.transact(|pool| {
            let shares = pool
                .core
                .exit_single_exact_amount(asset_out, amount_out, max_shares_in)?;
            pool.settle_single_exit(caller, asset_out, amount_out, shares)?;
            Ok(shares)
        })
    }

    fn settle_single_join(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        amount: Fixed,
        shares: Fixed,
    ) -> Result<(), PoolError> {
        self.check_cap()?;
        Settlement::with(caller)
            .pull(asset, amount)
            .mint(shares)
            .execute(&mut self.ledger)?;
        tracing::info!(%caller, %asset, %amount, %shares, "single-asset join");
        self.events.push(PoolEvent::Join {
            caller,
            asset,
            amount,
        });
        Ok(())
    }

    fn settle_single_exit(
        &mut self,
        caller: AccountId,
        asset: AssetId,
        amount: Fixed,
        shares: Fixed,
    ) -> Result<(), PoolError> {
        Settlement::with(caller)
            .burn(shares)
            .push(asset, amount)
            .execute(&mut self.ledger)?;
        tracing::info!(%caller, %asset, %amount, %shares, "single-asset exit");
        self.events.push(PoolEvent::Exit {
            caller,
            asset,
            amount,
        });
        Ok(())
    }

    // -- helpers --------------------------------------------------------------

    fn require_liquidity_provider(&self, caller: AccountId) -> Result<(), PoolError> {
        if self.can_provide_liquidity(caller) {
            Ok(())
        } else {
            tracing::debug!(%caller, "join rejected: not whitelisted");
            Err(PoolError::NotWhitelisted)
        }
    }

    fn check_cap(&self) -> Result<(), PoolError> {
        if self.core.total_supply() > self.cap {
            return Err(PoolError::CapExceeded);
        }
        Ok(())
    }

    /// Runs `op` under the reentrancy guard; restores pool-side state and
    /// drops buffered events if it fails.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, PoolError>,
    ) -> Result<T, PoolError> {
        let _guard = self.lock.enter()?;
        let snapshot = Snapshot {
            core: self.core.clone(),
            scheduler: self.scheduler.clone(),
            lifecycle: self.lifecycle.clone(),
            cap: self.cap,
            whitelist: self.whitelist.clone(),
            events: self.events.len(),
        };
        let result = op(self);
        if let Err(err) = &result {
            tracing::debug!(%err, "operation reverted");
            self.core = snapshot.core;
            self.scheduler = snapshot.scheduler;
            self.lifecycle = snapshot.lifecycle;
            self.cap = snapshot.cap;
            self.whitelist = snapshot.whitelist;
            self.events.truncate(snapshot.events);
        }
        result
    }
}
