//! Declarative blueprint for creating a smart pool.

use super::PoolParams;
use crate::domain::{AssetId, Fixed};
use crate::error::PoolError;
use crate::rights::Rights;

/// Everything needed to create a smart pool.
///
/// # Invariant
///
/// ```text
/// V = ∏ Bᵢ ^ (Wᵢ / ΣW)
/// ```
///
/// where `Bᵢ` is the balance of asset `i` and `Wᵢ` its denormalized weight.
///
/// # Validation
///
/// - `params` must be internally consistent ([`PoolParams::validate`]).
/// - `assets.len() == balances.len() == weights.len()`.
/// - Asset count within `[min_assets, max_assets]`.
/// - No duplicate assets.
/// - Every weight within `[min_weight, max_weight]`, total weight at most
///   `max_total_weight`.
/// - Every balance at least `min_balance`.
/// - Swap fee within `[min_fee, max_fee]`.
/// - Initial supply within `[min_pool_supply, max_pool_supply]`.
///
/// # Examples
///
/// ```
/// use smart_pool::config::PoolConfig;
/// use smart_pool::domain::{AssetId, Fixed};
/// use smart_pool::rights::Rights;
///
/// let cfg = PoolConfig::new(
///     vec![AssetId::from_bytes([1; 32]), AssetId::from_bytes([2; 32])],
///     vec![Fixed::from_integer(1_000), Fixed::from_integer(2_000)],
///     vec![Fixed::from_integer(10), Fixed::from_integer(10)],
///     "0.003".parse().expect("literal"),
///     Rights::all(),
/// )
/// .expect("valid config");
/// assert_eq!(cfg.initial_supply(), Fixed::from_integer(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    assets: Vec<AssetId>,
    balances: Vec<Fixed>,
    weights: Vec<Fixed>,
    swap_fee: Fixed,
    rights: Rights,
    public_swap: bool,
    initial_supply: Fixed,
    params: PoolParams,
}

impl PoolConfig {
    /// Creates a config with default [`PoolParams`], public swapping on,
    /// and an initial supply of `min_pool_supply`.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate).
    pub fn new(
        assets: Vec<AssetId>,
        balances: Vec<Fixed>,
        weights: Vec<Fixed>,
        swap_fee: Fixed,
        rights: Rights,
    ) -> Result<Self, PoolError> {
        let params = PoolParams::default();
        let config = Self {
            assets,
            balances,
            weights,
            swap_fee,
            rights,
            public_swap: true,
            initial_supply: params.min_pool_supply,
            params,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the params and revalidates.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate).
    pub fn with_params(mut self, params: PoolParams) -> Result<Self, PoolError> {
        self.params = params;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the initial pool-share supply and revalidates.
    ///
    /// # Errors
    ///
    /// Any error from [`validate`](Self::validate).
    pub fn with_initial_supply(mut self, supply: Fixed) -> Result<Self, PoolError> {
        self.initial_supply = supply;
        self.validate()?;
        Ok(self)
    }

    /// Sets whether the pool starts with public swapping enabled.
    pub fn with_public_swap(mut self, enabled: bool) -> Self {
        self.public_swap = enabled;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - Any error from [`PoolParams::validate`].
    /// - [`PoolError::LengthMismatch`] if the vectors differ in length.
    /// - [`PoolError::AssetCount`] if the asset count is out of bounds.
    /// - [`PoolError::InvalidAsset`] on a duplicate asset.
    /// - [`PoolError::InvalidWeight`] for a weight or total out of bounds.
    /// - [`PoolError::InvalidBalance`] for a balance below `min_balance`.
    /// - [`PoolError::InvalidFee`] for a fee out of bounds.
    /// - [`PoolError::InvalidConfiguration`] for an initial supply out of
    ///   bounds.
    pub fn validate(&self) -> Result<(), PoolError> {
        let p = &self.params;
        p.validate()?;

        if self.assets.len() != self.balances.len() || self.assets.len() != self.weights.len() {
            return Err(PoolError::LengthMismatch(
                "assets, balances, and weights must have equal length",
            ));
        }
        if !p.asset_count_ok(self.assets.len()) {
            return Err(PoolError::AssetCount(
                "asset count must lie within [min_assets, max_assets]",
            ));
        }

        // O(n²), fine for ≤ max_assets entries.
        let mut iter = self.assets.iter();
        while let Some(asset) = iter.next() {
            if iter.clone().any(|other| other == asset) {
                return Err(PoolError::InvalidAsset("duplicate assets are not allowed"));
            }
        }

        let mut total = Fixed::ZERO;
        for w in &self.weights {
            if !p.weight_ok(*w) {
                return Err(PoolError::InvalidWeight(
                    "weight must lie within [min_weight, max_weight]",
                ));
            }
            total = total
                .checked_add(w)
                .ok_or(PoolError::Overflow("total weight"))?;
        }
        if total > p.max_total_weight {
            return Err(PoolError::InvalidWeight(
                "total weight must not exceed max_total_weight",
            ));
        }

        if self.balances.iter().any(|b| *b < p.min_balance) {
            return Err(PoolError::InvalidBalance(
                "balance must be at least min_balance",
            ));
        }

        if !p.fee_ok(self.swap_fee) {
            return Err(PoolError::InvalidFee(
                "swap fee must lie within [min_fee, max_fee]",
            ));
        }

        if self.initial_supply < p.min_pool_supply || self.initial_supply > p.max_pool_supply {
            return Err(PoolError::InvalidConfiguration(
                "initial supply must lie within [min_pool_supply, max_pool_supply]",
            ));
        }

        Ok(())
    }

    /// Returns the assets in binding order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Returns the initial balances.
    #[must_use]
    pub fn balances(&self) -> &[Fixed] {
        &self.balances
    }

    /// Returns the initial denormalized weights.
    #[must_use]
    pub fn weights(&self) -> &[Fixed] {
        &self.weights
    }

    /// Returns the swap fee.
    pub const fn swap_fee(&self) -> Fixed {
        self.swap_fee
    }

    /// Returns the pool's rights.
    #[must_use]
    pub const fn rights(&self) -> Rights {
        self.rights
    }

    /// Returns whether the pool starts with public swapping enabled.
    #[must_use]
    pub const fn public_swap(&self) -> bool {
        self.public_swap
    }

    /// Returns the initial pool-share supply.
    pub const fn initial_supply(&self) -> Fixed {
        self.initial_supply
    }

    /// Returns the params.
    #[must_use]
    pub const fn params(&self) -> &PoolParams {
        &self.params
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

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

    fn build(weights: &[&str], fee: &str) -> Result<PoolConfig, PoolError> {
        let n = weights.len();
        PoolConfig::new(
            (0..n).map(|i| id(i as u8 + 1)).collect(),
            vec![fx("1000"); n],
            weights.iter().map(|w| fx(w)).collect(),
            fx(fee),
            Rights::all(),
        )
    }

    // -- valid construction ---------------------------------------------------

    #[test]
    fn valid_three_asset_pool() {
        let Ok(cfg) = build(&["12", "1.5", "1.5"], "0.003") else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.assets().len(), 3);
        assert_eq!(cfg.weights()[0], fx("12"));
        assert!(cfg.public_swap());
        assert_eq!(cfg.rights(), Rights::all());
        assert_eq!(cfg.params(), &PoolParams::default());
    }

    #[test]
    fn with_initial_supply_revalidates() {
        let Ok(cfg) = build(&["5", "5"], "0.003") else {
            panic!("expected Ok");
        };
        let Ok(cfg) = cfg.with_initial_supply(fx("1000")) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.initial_supply(), fx("1000"));
        assert!(cfg.with_initial_supply(fx("99")).is_err());
    }

    // -- rejections -----------------------------------------------------------

    #[test]
    fn length_mismatch() {
        let err = PoolConfig::new(
            vec![id(1), id(2)],
            vec![fx("1")],
            vec![fx("1"), fx("1")],
            fx("0.003"),
            Rights::none(),
        );
        assert!(matches!(err, Err(PoolError::LengthMismatch(_))));
    }

    #[test]
    fn too_few_and_too_many_assets() {
        assert!(matches!(build(&["1"], "0.003"), Err(PoolError::AssetCount(_))));
        let nine = ["1"; 9];
        assert!(matches!(build(&nine, "0.003"), Err(PoolError::AssetCount(_))));
    }

    #[test]
    fn duplicate_assets() {
        let err = PoolConfig::new(
            vec![id(1), id(1)],
            vec![fx("1"), fx("1")],
            vec![fx("1"), fx("1")],
            fx("0.003"),
            Rights::none(),
        );
        assert!(matches!(err, Err(PoolError::InvalidAsset(_))));
    }

    #[test]
    fn weight_bounds() {
        assert!(matches!(build(&["0.5", "1"], "0.003"), Err(PoolError::InvalidWeight(_))));
        assert!(matches!(build(&["51", "1"], "0.003"), Err(PoolError::InvalidWeight(_))));
        assert!(matches!(build(&["30", "30"], "0.003"), Err(PoolError::InvalidWeight(_))));
    }

    #[test]
    fn balance_floor() {
        let err = PoolConfig::new(
            vec![id(1), id(2)],
            vec![fx("1"), fx("0.0000000000001")],
            vec![fx("1"), fx("1")],
            fx("0.003"),
            Rights::none(),
        );
        assert!(matches!(err, Err(PoolError::InvalidBalance(_))));
    }

    #[test]
    fn fee_bounds() {
        assert!(matches!(build(&["1", "1"], "0"), Err(PoolError::InvalidFee(_))));
        assert!(matches!(build(&["1", "1"], "0.11"), Err(PoolError::InvalidFee(_))));
    }

    #[test]
    fn bad_params_are_rejected() {
        let Ok(cfg) = build(&["5", "5"], "0.003") else {
            panic!("expected Ok");
        };
        let params = PoolParams {
            exit_fee: fx("0.01"),
            ..PoolParams::default()
        };
        assert!(matches!(cfg.with_params(params), Err(PoolError::InvalidFee(_))));
    }
}
