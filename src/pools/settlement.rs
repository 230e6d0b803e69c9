//! Multi-leg ledger settlement.
//!
//! A [`Settlement`] collects every ledger movement one pool operation makes
//! with a single counterparty.  [`execute`](Settlement::execute) checks all
//! debit legs against the ledger before the first call, then runs the legs
//! in order.  If a leg still fails, the legs already run are reversed
//! newest-first, so the ledger ends where it started.

use std::collections::HashMap;

use crate::domain::{AccountId, AssetId, Fixed};
use crate::error::PoolError;
use crate::traits::Ledger;

/// One ledger movement between the counterparty and the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Leg {
    /// Asset from the counterparty into custody.
    Pull(AssetId, Fixed),
    /// Asset from custody to the counterparty.
    Push(AssetId, Fixed),
    /// Pool shares credited to the counterparty.
    Mint(Fixed),
    /// Pool shares debited from the counterparty.
    Burn(Fixed),
}

impl Leg {
    fn run<L: Ledger>(self, ledger: &mut L, account: AccountId) -> Result<(), PoolError> {
        match self {
            Self::Pull(asset, amount) => ledger.pull(asset, account, amount),
            Self::Push(asset, amount) => ledger.push(asset, account, amount),
            Self::Mint(amount) => ledger.mint_shares(account, amount),
            Self::Burn(amount) => ledger.burn_shares(account, amount),
        }
    }

    const fn reversed(self) -> Self {
        match self {
            Self::Pull(asset, amount) => Self::Push(asset, amount),
            Self::Push(asset, amount) => Self::Pull(asset, amount),
            Self::Mint(amount) => Self::Burn(amount),
            Self::Burn(amount) => Self::Mint(amount),
        }
    }
}

/// Ordered ledger legs settled with one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Settlement {
    account: AccountId,
    legs: Vec<Leg>,
}

impl Settlement {
    /// An empty settlement with `account`.
    pub(crate) const fn with(account: AccountId) -> Self {
        Self {
            account,
            legs: Vec::new(),
        }
    }

    pub(crate) fn pull(mut self, asset: AssetId, amount: Fixed) -> Self {
        self.legs.push(Leg::Pull(asset, amount));
        self
    }

    pub(crate) fn push(mut self, asset: AssetId, amount: Fixed) -> Self {
        self.legs.push(Leg::Push(asset, amount));
        self
    }

    pub(crate) fn mint(mut self, amount: Fixed) -> Self {
        self.legs.push(Leg::Mint(amount));
        self
    }

    pub(crate) fn burn(mut self, amount: Fixed) -> Self {
        self.legs.push(Leg::Burn(amount));
        self
    }

    #[cfg(test)]
    pub(crate) fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Verifies the ledger can cover every debit leg, summed per asset.
    ///
    /// # Errors
    ///
    /// [`PoolError::InsufficientBalance`] naming the first short side, or
    /// [`PoolError::Overflow`] if the summed legs overflow.
    pub(crate) fn check<L: Ledger>(&self, ledger: &L) -> Result<(), PoolError> {
        let mut pulls: HashMap<AssetId, Fixed> = HashMap::new();
        let mut pushes: HashMap<AssetId, Fixed> = HashMap::new();
        let mut burns = Fixed::ZERO;
        for leg in &self.legs {
            match *leg {
                Leg::Pull(asset, amount) => accumulate(pulls.entry(asset).or_default(), amount)?,
                Leg::Push(asset, amount) => accumulate(pushes.entry(asset).or_default(), amount)?,
                Leg::Burn(amount) => accumulate(&mut burns, amount)?,
                Leg::Mint(_) => {}
            }
        }

        for (asset, amount) in &pulls {
            if ledger.asset_balance(*asset, self.account) < *amount {
                tracing::debug!(%asset, account = %self.account, %amount, "pull not covered");
                return Err(PoolError::InsufficientBalance("account cannot cover pull"));
            }
        }
        if ledger.share_balance(self.account) < burns {
            tracing::debug!(account = %self.account, %burns, "share burn not covered");
            return Err(PoolError::InsufficientBalance("holder cannot cover share burn"));
        }
        for (asset, amount) in &pushes {
            if ledger.custody(*asset) < *amount {
                tracing::debug!(%asset, %amount, "push not covered by custody");
                return Err(PoolError::InsufficientBalance("pool custody cannot cover push"));
            }
        }
        Ok(())
    }

    /// Checks, then runs every leg; reverses the executed legs if one
    /// fails.
    ///
    /// # Errors
    ///
    /// Any error from [`check`](Self::check) or from the failing leg.
    pub(crate) fn execute<L: Ledger>(&self, ledger: &mut L) -> Result<(), PoolError> {
        self.check(ledger)?;
        for (done, leg) in self.legs.iter().enumerate() {
            if let Err(err) = leg.run(ledger, self.account) {
                tracing::debug!(%err, ?leg, account = %self.account, "settlement leg failed");
                self.unwind(ledger, done);
                return Err(err);
            }
        }
        Ok(())
    }

    fn unwind<L: Ledger>(&self, ledger: &mut L, done: usize) {
        for leg in self.legs.iter().take(done).rev() {
            if let Err(err) = leg.reversed().run(ledger, self.account) {
                tracing::warn!(%err, ?leg, account = %self.account, "settlement leg not reversed");
            }
        }
    }
}

fn accumulate(total: &mut Fixed, amount: Fixed) -> Result<(), PoolError> {
    *total = total
        .checked_add(&amount)
        .ok_or(PoolError::Overflow("settlement total"))?;
    Ok(())
}
