//! Test ledger that refuses one chosen call.

use crate::domain::{AccountId, AssetId, Fixed};
use crate::error::PoolError;
use crate::traits::Ledger;

use super::InMemoryLedger;

/// Wraps an [`InMemoryLedger`] and fails its `n`-th mutating call once,
/// counting from zero.  Reads always pass through.
#[derive(Debug, Clone)]
pub(crate) struct RefusingLedger {
    inner: InMemoryLedger,
    refuse_in: Option<usize>,
}

impl RefusingLedger {
    pub(crate) const fn new(inner: InMemoryLedger, refuse_in: usize) -> Self {
        Self {
            inner,
            refuse_in: Some(refuse_in),
        }
    }

    /// A ledger that passes every call until [`refuse_in`](Self::refuse_in).
    pub(crate) const fn passing(inner: InMemoryLedger) -> Self {
        Self {
            inner,
            refuse_in: None,
        }
    }

    /// Arms the ledger to refuse the `n`-th mutating call from now.
    pub(crate) fn refuse_in(&mut self, n: usize) {
        self.refuse_in = Some(n);
    }

    pub(crate) const fn inner(&self) -> &InMemoryLedger {
        &self.inner
    }

    fn trip(&mut self) -> Result<(), PoolError> {
        match self.refuse_in {
            Some(0) => {
                self.refuse_in = None;
                Err(PoolError::Overflow("ledger refused the call"))
            }
            Some(n) => {
                self.refuse_in = Some(n - 1);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Ledger for RefusingLedger {
    fn pull(&mut self, asset: AssetId, from: AccountId, amount: Fixed) -> Result<(), PoolError> {
        self.trip()?;
        self.inner.pull(asset, from, amount)
    }

    fn push(&mut self, asset: AssetId, to: AccountId, amount: Fixed) -> Result<(), PoolError> {
        self.trip()?;
        self.inner.push(asset, to, amount)
    }

    fn mint_shares(&mut self, to: AccountId, amount: Fixed) -> Result<(), PoolError> {
        self.trip()?;
        self.inner.mint_shares(to, amount)
    }

    fn burn_shares(&mut self, from: AccountId, amount: Fixed) -> Result<(), PoolError> {
        self.trip()?;
        self.inner.burn_shares(from, amount)
    }

    fn share_balance(&self, holder: AccountId) -> Fixed {
        self.inner.share_balance(holder)
    }

    fn asset_balance(&self, asset: AssetId, holder: AccountId) -> Fixed {
        self.inner.asset_balance(asset, holder)
    }

    fn custody(&self, asset: AssetId) -> Fixed {
        self.inner.custody(asset)
    }
}
