//! Smart pool factory implementation.

use crate::config::PoolConfig;
use crate::domain::AccountId;
use crate::error::PoolError;
use crate::pools::{SmartPool, WeightedPool};
use crate::traits::{FromConfig, Ledger};

/// Stateless factory for creating smart pools from configuration.
///
/// # Thread Safety
///
/// [`create`](Self::create) touches no shared state; it only consumes the
/// ledger it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SmartPoolFactory;

impl SmartPoolFactory {
    /// Creates a smart pool bound to `ledger` and funded by `creator`.
    ///
    /// # Flow
    ///
    /// 1. Validate the configuration via [`PoolConfig::validate`].
    /// 2. Build the core pool via [`WeightedPool::from_config`].
    /// 3. Check that `creator` holds every initial balance.
    /// 4. Pull the initial balances from `creator`.
    /// 5. Mint the initial supply to `creator`.
    ///
    /// # Errors
    ///
    /// - Any validation error from the configuration.
    /// - [`PoolError::InsufficientBalance`] if `creator` cannot fund the
    ///   pool; nothing has been pulled in that case.
    /// - Any error from the ledger.
    pub fn create<L: Ledger>(
        config: &PoolConfig,
        mut ledger: L,
        creator: AccountId,
    ) -> Result<SmartPool<L>, PoolError> {
        config.validate()?;
        let core = WeightedPool::from_config(config)?;

        for (asset, balance) in config.assets().iter().zip(config.balances()) {
            if ledger.asset_balance(*asset, creator) < *balance {
                tracing::debug!(%asset, %creator, "creator cannot fund initial balance");
                return Err(PoolError::InsufficientBalance(
                    "creator cannot fund the initial balances",
                ));
            }
        }
        for (asset, balance) in config.assets().iter().zip(config.balances()) {
            ledger.pull(*asset, creator, *balance)?;
        }
        ledger.mint_shares(creator, core.total_supply())?;

        tracing::info!(
            %creator,
            assets = core.len(),
            supply = %core.total_supply(),
            swap_fee = %core.swap_fee(),
            "smart pool created"
        );
        Ok(SmartPool::from_parts(core, config.rights(), ledger))
    }
}
