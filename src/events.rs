//! State-change records emitted by a smart pool.
//!
//! Every successful mutating operation appends one or more [`PoolEvent`]s
//! to the pool's buffer.  Hosts drain the buffer with
//! [`SmartPool::take_events`](crate::pools::SmartPool::take_events) after
//! each call and forward the records to their audit or indexing layer.
//! Failed operations emit nothing.

use crate::domain::{AccountId, AssetId, BlockNumber, Fixed};

/// An observable state change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum PoolEvent {
    /// A gradual weight update was scheduled.
    WeightsScheduled {
        /// Effective start block (clamped to the scheduling block).
        start_block: BlockNumber,
        /// Block at which the targets are reached.
        end_block: BlockNumber,
        /// Weights captured when the plan was scheduled.
        start_weights: Vec<Fixed>,
        /// Target weights.
        end_weights: Vec<Fixed>,
    },
    /// A gradual weight update reached its end block and was cleared.
    WeightsUpdateFinished {
        /// Block at which the plan was cleared.
        block: BlockNumber,
    },
    /// A new asset was committed and awaits its timelock.
    TokenCommitted {
        /// The committed asset.
        asset: AssetId,
        /// Balance that will be pulled on apply.
        balance: Fixed,
        /// Denormalized weight it will be bound with.
        weight: Fixed,
        /// Block of the commit.
        commit_block: BlockNumber,
    },
    /// A committed asset was bound to the pool.
    TokenApplied {
        /// The bound asset.
        asset: AssetId,
    },
    /// An asset was unbound from the pool.
    TokenRemoved {
        /// The removed asset.
        asset: AssetId,
    },
    /// A single asset weight was changed immediately.
    WeightChanged {
        /// The reweighted asset.
        asset: AssetId,
        /// Weight before the change.
        old: Fixed,
        /// Weight after the change.
        new: Fixed,
    },
    /// The pool-share cap changed.
    CapChanged {
        /// Previous cap.
        old: Fixed,
        /// New cap.
        new: Fixed,
    },
    /// The swap fee changed.
    SwapFeeChanged {
        /// Previous fee.
        old: Fixed,
        /// New fee.
        new: Fixed,
    },
    /// Public swapping was turned on or off.
    PublicSwapChanged {
        /// New state.
        enabled: bool,
    },
    /// A liquidity provider was added to the whitelist.
    LpWhitelisted {
        /// The provider.
        account: AccountId,
    },
    /// A liquidity provider was removed from the whitelist.
    LpRemovedFromWhitelist {
        /// The provider.
        account: AccountId,
    },
    /// A swap was executed.
    Swap {
        /// The trader.
        caller: AccountId,
        /// Asset sold to the pool.
        asset_in: AssetId,
        /// Asset bought from the pool.
        asset_out: AssetId,
        /// Amount sold.
        amount_in: Fixed,
        /// Amount bought.
        amount_out: Fixed,
    },
    /// An asset entered the pool through a join.
    Join {
        /// The liquidity provider.
        caller: AccountId,
        /// Deposited asset.
        asset: AssetId,
        /// Deposited amount.
        amount: Fixed,
    },
    /// An asset left the pool through an exit.
    Exit {
        /// The liquidity provider.
        caller: AccountId,
        /// Withdrawn asset.
        asset: AssetId,
        /// Withdrawn amount.
        amount: Fixed,
    },
}

impl PoolEvent {
    /// Short, stable name of the event kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WeightsScheduled { .. } => "weights_scheduled",
            Self::WeightsUpdateFinished { .. } => "weights_update_finished",
            Self::TokenCommitted { .. } => "token_committed",
            Self::TokenApplied { .. } => "token_applied",
            Self::TokenRemoved { .. } => "token_removed",
            Self::WeightChanged { .. } => "weight_changed",
            Self::CapChanged { .. } => "cap_changed",
            Self::SwapFeeChanged { .. } => "swap_fee_changed",
            Self::PublicSwapChanged { .. } => "public_swap_changed",
            Self::LpWhitelisted { .. } => "lp_whitelisted",
            Self::LpRemovedFromWhitelist { .. } => "lp_removed_from_whitelist",
            Self::Swap { .. } => "swap",
            Self::Join { .. } => "join",
            Self::Exit { .. } => "exit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable() {
        let asset = AssetId::from_bytes([1; 32]);
        assert_eq!(PoolEvent::TokenApplied { asset }.name(), "token_applied");
        assert_eq!(
            PoolEvent::CapChanged {
                old: Fixed::ZERO,
                new: Fixed::ONE
            }
            .name(),
            "cap_changed"
        );
        assert_eq!(PoolEvent::PublicSwapChanged { enabled: false }.name(), "public_swap_changed");
    }
}
