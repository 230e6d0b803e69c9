//! [`Ledger`] backed by hash maps.

use std::collections::HashMap;

use crate::domain::{AccountId, AssetId, Fixed};
use crate::error::PoolError;
use crate::traits::Ledger;

/// A self-contained ledger holding account balances, pool custody, and
/// pool-share holdings in memory.
///
/// Accounts are funded with [`credit`](Self::credit).  Every trait call
/// either succeeds completely or returns an error without effect.
///
/// # Examples
///
/// ```
/// use smart_pool::domain::{AccountId, AssetId, Fixed};
/// use smart_pool::ledger::InMemoryLedger;
/// use smart_pool::traits::Ledger;
///
/// let alice = AccountId::from_bytes([1; 32]);
/// let usdc = AssetId::from_bytes([9; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.credit(usdc, alice, Fixed::from_integer(100)).expect("credit");
/// ledger.pull(usdc, alice, Fixed::from_integer(40)).expect("pull");
///
/// assert_eq!(ledger.asset_balance(usdc, alice), Fixed::from_integer(60));
/// assert_eq!(ledger.custody(usdc), Fixed::from_integer(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: HashMap<(AssetId, AccountId), Fixed>,
    custody: HashMap<AssetId, Fixed>,
    shares: HashMap<AccountId, Fixed>,
    share_supply: Fixed,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` of `asset` to `account` out of thin air.
    ///
    /// # Errors
    ///
    /// [`PoolError::Overflow`] if the balance would overflow.
    pub fn credit(
        &mut self,
        asset: AssetId,
        account: AccountId,
        amount: Fixed,
    ) -> Result<(), PoolError> {
        let entry = self.balances.entry((asset, account)).or_default();
        *entry = entry
            .checked_add(&amount)
            .ok_or(PoolError::Overflow("ledger balance"))?;
        Ok(())
    }

    /// Sum of all pool shares credited to holders.
    pub const fn share_supply(&self) -> Fixed {
        self.share_supply
    }
}

/// `slot -= amount`, leaving `slot` untouched on failure.
fn debit(slot: &mut Fixed, amount: Fixed, context: &'static str) -> Result<(), PoolError> {
    *slot = slot
        .checked_sub(&amount)
        .ok_or(PoolError::InsufficientBalance(context))?;
    Ok(())
}

impl Ledger for InMemoryLedger {
    fn pull(&mut self, asset: AssetId, from: AccountId, amount: Fixed) -> Result<(), PoolError> {
        let held = self.balances.get(&(asset, from)).copied().unwrap_or_default();
        let custody = self
            .custody(asset)
            .checked_add(&amount)
            .ok_or(PoolError::Overflow("pool custody"))?;
        let mut remaining = held;
        debit(&mut remaining, amount, "account cannot cover pull")?;

        self.balances.insert((asset, from), remaining);
        self.custody.insert(asset, custody);
        Ok(())
    }

    fn push(&mut self, asset: AssetId, to: AccountId, amount: Fixed) -> Result<(), PoolError> {
        let mut custody = self.custody(asset);
        debit(&mut custody, amount, "pool custody cannot cover push")?;
        let held = self.asset_balance(asset, to);
        let credited = held
            .checked_add(&amount)
            .ok_or(PoolError::Overflow("ledger balance"))?;

        self.custody.insert(asset, custody);
        self.balances.insert((asset, to), credited);
        Ok(())
    }

    fn mint_shares(&mut self, to: AccountId, amount: Fixed) -> Result<(), PoolError> {
        let supply = self
            .share_supply
            .checked_add(&amount)
            .ok_or(PoolError::Overflow("share supply"))?;
        let held = self
            .share_balance(to)
            .checked_add(&amount)
            .ok_or(PoolError::Overflow("share balance"))?;

        self.share_supply = supply;
        self.shares.insert(to, held);
        Ok(())
    }

    fn burn_shares(&mut self, from: AccountId, amount: Fixed) -> Result<(), PoolError> {
        let mut held = self.share_balance(from);
        debit(&mut held, amount, "holder cannot cover share burn")?;
        let mut supply = self.share_supply;
        debit(&mut supply, amount, "share supply")?;

        self.shares.insert(from, held);
        self.share_supply = supply;
        Ok(())
    }

    fn share_balance(&self, holder: AccountId) -> Fixed {
        self.shares.get(&holder).copied().unwrap_or_default()
    }

    fn asset_balance(&self, asset: AssetId, holder: AccountId) -> Fixed {
        self.balances.get(&(asset, holder)).copied().unwrap_or_default()
    }

    fn custody(&self, asset: AssetId) -> Fixed {
        self.custody.get(&asset).copied().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::from_bytes([1; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([2; 32])
    }

    fn asset() -> AssetId {
        AssetId::from_bytes([7; 32])
    }

    fn funded() -> InMemoryLedger {
        let mut ledger = InMemoryLedger::new();
        let Ok(()) = ledger.credit(asset(), alice(), Fixed::from_integer(100)) else {
            panic!("expected Ok");
        };
        ledger
    }

    #[test]
    fn pull_then_push_moves_through_custody() {
        let mut ledger = funded();
        assert_eq!(ledger.pull(asset(), alice(), Fixed::from_integer(30)), Ok(()));
        assert_eq!(ledger.push(asset(), bob(), Fixed::from_integer(10)), Ok(()));

        assert_eq!(ledger.asset_balance(asset(), alice()), Fixed::from_integer(70));
        assert_eq!(ledger.asset_balance(asset(), bob()), Fixed::from_integer(10));
        assert_eq!(ledger.custody(asset()), Fixed::from_integer(20));
    }

    #[test]
    fn failed_pull_has_no_effect() {
        let mut ledger = funded();
        let before = ledger.clone();
        let err = ledger.pull(asset(), alice(), Fixed::from_integer(101));
        assert!(matches!(err, Err(PoolError::InsufficientBalance(_))));
        assert_eq!(ledger, before);
    }

    #[test]
    fn push_beyond_custody_fails() {
        let mut ledger = funded();
        let err = ledger.push(asset(), bob(), Fixed::ONE);
        assert!(matches!(err, Err(PoolError::InsufficientBalance(_))));
        assert_eq!(ledger.asset_balance(asset(), bob()), Fixed::ZERO);
    }

    #[test]
    fn shares_mint_and_burn() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(ledger.mint_shares(alice(), Fixed::from_integer(100)), Ok(()));
        assert_eq!(ledger.burn_shares(alice(), Fixed::from_integer(40)), Ok(()));
        assert_eq!(ledger.share_balance(alice()), Fixed::from_integer(60));
        assert_eq!(ledger.share_supply(), Fixed::from_integer(60));

        let err = ledger.burn_shares(bob(), Fixed::ONE);
        assert!(matches!(err, Err(PoolError::InsufficientBalance(_))));
    }

    #[test]
    fn zero_amounts_are_no_ops() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(ledger.pull(asset(), alice(), Fixed::ZERO), Ok(()));
        assert_eq!(ledger.burn_shares(alice(), Fixed::ZERO), Ok(()));
        assert_eq!(ledger.share_supply(), Fixed::ZERO);
    }
}
