//! The external token ledger a pool settles against.
//!
//! The pool itself only does bookkeeping: balances, weights, and the
//! pool-share total supply.  Moving constituent assets between accounts and
//! the pool's custody, and crediting or debiting pool shares per holder, is
//! the ledger's job.  A host backs this trait with a chain, a simulator, or
//! [`InMemoryLedger`](crate::ledger::InMemoryLedger).
//!
//! # Call order
//!
//! The pool updates its own bookkeeping before calling [`Ledger::push`] and
//! holds its reentrancy guard for the whole operation.  Before the first
//! call of a settlement it checks every leg against the read side of this
//! trait; if a later leg still fails, the legs already executed are
//! reversed.  Implementations therefore need no rollback of their own
//! beyond leaving a failed call without effect.

use crate::domain::{AccountId, AssetId, Fixed};
use crate::error::PoolError;

/// Transfer and share-accounting surface consumed by a pool.
///
/// # Contract
///
/// - A call that returns `Err` must have had no effect.
/// - `pull` and `burn_shares` fail with
///   [`PoolError::InsufficientBalance`] when the account cannot cover the
///   amount.
/// - Amounts are never negative; a zero amount is a successful no-op.
pub trait Ledger {
    /// Moves `amount` of `asset` from `from` into the pool's custody.
    ///
    /// # Errors
    ///
    /// [`PoolError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    fn pull(&mut self, asset: AssetId, from: AccountId, amount: Fixed) -> Result<(), PoolError>;

    /// Moves `amount` of `asset` from the pool's custody to `to`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InsufficientBalance`] if custody holds less than
    /// `amount`.
    fn push(&mut self, asset: AssetId, to: AccountId, amount: Fixed) -> Result<(), PoolError>;

    /// Credits `amount` pool shares to `to`.
    ///
    /// # Errors
    ///
    /// [`PoolError::Overflow`] if the holder balance would overflow.
    fn mint_shares(&mut self, to: AccountId, amount: Fixed) -> Result<(), PoolError>;

    /// Debits `amount` pool shares from `from`.
    ///
    /// # Errors
    ///
    /// [`PoolError::InsufficientBalance`] if `from` holds fewer shares.
    fn burn_shares(&mut self, from: AccountId, amount: Fixed) -> Result<(), PoolError>;

    /// Pool shares held by `holder`.
    fn share_balance(&self, holder: AccountId) -> Fixed;

    /// Balance of `asset` held by `holder` outside the pool.
    fn asset_balance(&self, asset: AssetId, holder: AccountId) -> Fixed;

    /// Amount of `asset` held in the pool's custody.
    fn custody(&self, asset: AssetId) -> Fixed;
}
