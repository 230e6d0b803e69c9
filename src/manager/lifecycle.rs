//! Two-phase asset addition and immediate asset removal.
//!
//! Adding an asset is split into [`commit`](TokenLifecycle::commit) and
//! [`apply`](TokenLifecycle::apply) separated by `add_token_time_lock`
//! blocks, so observers see a new asset before it affects prices.
//! [`remove`](TokenLifecycle::remove) takes effect at once.
//!
//! These functions only touch pool bookkeeping.  The returned records tell
//! the caller how much to pull, push, mint, or burn on the ledger.

use crate::domain::{AssetId, BlockNumber, Fixed, Rounding};
use crate::error::PoolError;
use crate::math::fixed_point::mul_div;
use crate::math::CheckedArithmetic;
use crate::pools::WeightedPool;

use super::WeightScheduler;

/// An asset waiting for its timelock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTokenCommit {
    asset: AssetId,
    balance: Fixed,
    weight: Fixed,
    commit_block: BlockNumber,
}

impl PendingTokenCommit {
    /// The committed asset.
    pub const fn asset(&self) -> AssetId {
        self.asset
    }

    /// Balance to pull on apply.
    pub const fn balance(&self) -> Fixed {
        self.balance
    }

    /// Weight to bind with.
    pub const fn weight(&self) -> Fixed {
        self.weight
    }

    /// Block of the commit.
    pub const fn commit_block(&self) -> BlockNumber {
        self.commit_block
    }
}

/// Result of a successful [`TokenLifecycle::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedToken {
    /// The newly bound asset.
    pub asset: AssetId,
    /// Balance the caller must deposit.
    pub balance: Fixed,
    /// Weight it was bound with.
    pub weight: Fixed,
    /// Pool shares minted to the caller.
    pub shares_minted: Fixed,
}

/// Result of a successful [`TokenLifecycle::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedToken {
    /// The unbound asset.
    pub asset: AssetId,
    /// Its entire balance, owed to the caller.
    pub balance: Fixed,
    /// Pool shares burned from the caller.
    pub shares_burned: Fixed,
}

/// Holds at most one [`PendingTokenCommit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLifecycle {
    pending: Option<PendingTokenCommit>,
}

impl TokenLifecycle {
    /// Creates a lifecycle with no pending commit.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `true` if a commit awaits apply.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending commit, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingTokenCommit> {
        self.pending.as_ref()
    }

    /// Announces `asset` with its initial `balance` and `weight`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::UpdateInProgress`] if a gradual update is active.
    /// - [`PoolError::CommitPending`] if another commit is pending.
    /// - [`PoolError::InvalidAsset`] if `asset` is already bound.
    /// - [`PoolError::AssetCount`] if the pool is full.
    /// - [`PoolError::InvalidWeight`] if `weight` is out of bounds or the
    ///   total weight would exceed `max_total_weight`.
    /// - [`PoolError::InvalidBalance`] if `balance < min_balance`.
    pub fn commit(
        &mut self,
        pool: &WeightedPool,
        scheduler: &WeightScheduler,
        asset: AssetId,
        balance: Fixed,
        weight: Fixed,
        current_block: BlockNumber,
    ) -> Result<&PendingTokenCommit, PoolError> {
        if scheduler.is_active() {
            return Err(PoolError::UpdateInProgress);
        }
        if self.is_pending() {
            return Err(PoolError::CommitPending);
        }
        if pool.is_bound(asset) {
            return Err(PoolError::InvalidAsset("asset is already bound"));
        }
        let params = pool.params();
        if pool.len() >= params.max_assets {
            return Err(PoolError::AssetCount("pool already holds max_assets"));
        }
        if !params.weight_ok(weight) {
            return Err(PoolError::InvalidWeight(
                "weight must lie within [min_weight, max_weight]",
            ));
        }
        if pool.total_weight().safe_add(&weight)? > params.max_total_weight {
            return Err(PoolError::InvalidWeight(
                "total weight would exceed max_total_weight",
            ));
        }
        if balance < params.min_balance {
            return Err(PoolError::InvalidBalance(
                "balance must be at least min_balance",
            ));
        }

        Ok(&*self.pending.insert(PendingTokenCommit {
            asset,
            balance,
            weight,
            commit_block: current_block,
        }))
    }

    /// Binds the pending asset once the timelock has elapsed and mints
    /// `total_supply * weight / (total_weight + weight)` shares.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NoPendingCommit`] if nothing is pending.
    /// - [`PoolError::TimelockNotElapsed`] if fewer than
    ///   `add_token_time_lock` blocks have passed since the commit.
    /// - Propagates [`WeightedPool::bind`] failures.
    pub fn apply(
        &mut self,
        pool: &mut WeightedPool,
        current_block: BlockNumber,
    ) -> Result<AppliedToken, PoolError> {
        let Some(commit) = self.pending else {
            return Err(PoolError::NoPendingCommit);
        };
        let elapsed = current_block.saturating_sub(commit.commit_block);
        let lock = pool.params().add_token_time_lock;
        if elapsed < lock {
            return Err(PoolError::TimelockNotElapsed {
                remaining: lock - elapsed,
            });
        }

        let total_after = pool.total_weight().safe_add(&commit.weight)?;
        let shares_minted = mul_div(
            pool.total_supply(),
            commit.weight,
            total_after,
            Rounding::Down,
        )?;

        let mut next = pool.clone();
        next.bind(commit.asset, commit.balance, commit.weight)?;
        next.mint_supply(shares_minted)?;
        *pool = next;
        self.pending = None;

        Ok(AppliedToken {
            asset: commit.asset,
            balance: commit.balance,
            weight: commit.weight,
            shares_minted,
        })
    }

    /// Unbinds `asset` and burns `total_supply * weight / total_weight`
    /// shares.
    ///
    /// # Errors
    ///
    /// - [`PoolError::CommitPending`] if a commit is pending.
    /// - [`PoolError::UpdateInProgress`] if a gradual update is active.
    /// - [`PoolError::InvalidAsset`] if `asset` is not bound.
    /// - [`PoolError::AssetCount`] if the pool holds only `min_assets`.
    pub fn remove(
        &self,
        pool: &mut WeightedPool,
        scheduler: &WeightScheduler,
        asset: AssetId,
    ) -> Result<RemovedToken, PoolError> {
        if self.is_pending() {
            return Err(PoolError::CommitPending);
        }
        if scheduler.is_active() {
            return Err(PoolError::UpdateInProgress);
        }
        let bound = *pool.asset(asset)?;
        let shares_burned = mul_div(
            pool.total_supply(),
            bound.weight(),
            pool.total_weight(),
            Rounding::Up,
        )?;

        let mut next = pool.clone();
        next.unbind(asset)?;
        next.burn_supply(shares_burned)?;
        *pool = next;

        Ok(RemovedToken {
            asset,
            balance: bound.balance(),
            shares_burned,
        })
    }
}
