//! A constituent asset bound to a pool.

use super::{AssetId, Fixed};

/// One bound asset: its identity, pool balance, and denormalized weight.
///
/// Normalized weight is `weight / total_weight` and is never stored; the
/// bonding-curve formulas work on denormalized weights directly because
/// the ratios cancel the normalization.
///
/// An `Asset` only exists inside a pool's registry.  Bounds on balance and
/// weight are enforced by the registry and the operations that mutate it,
/// not by this plain record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Asset {
    id: AssetId,
    balance: Fixed,
    weight: Fixed,
}

impl Asset {
    /// Creates a new asset record.
    pub const fn new(id: AssetId, balance: Fixed, weight: Fixed) -> Self {
        Self {
            id,
            balance,
            weight,
        }
    }

    /// Returns the asset identity.
    #[must_use]
    pub const fn id(&self) -> AssetId {
        self.id
    }

    /// Returns the pool's balance of this asset.
    pub const fn balance(&self) -> Fixed {
        self.balance
    }

    /// Returns the denormalized weight.
    pub const fn weight(&self) -> Fixed {
        self.weight
    }

    pub(crate) fn set_balance(&mut self, balance: Fixed) {
        self.balance = balance;
    }

    pub(crate) fn set_weight(&mut self, weight: Fixed) {
        self.weight = weight;
    }
}
