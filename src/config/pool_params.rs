//! Engine-wide bounds, fee limits, and timelocks.

use crate::domain::{BlockNumber, Fixed};
use crate::error::PoolError;
use crate::math::{BondingCurve, PowLimits, EXIT_FEE};

/// Blocks per day at a 15-second block time.
const BLOCKS_PER_DAY: BlockNumber = 4 * 60 * 24;

/// The constants value object every pool is built with.
///
/// Bounds are carried explicitly instead of living in global state, so two
/// pools (or two test fixtures) can run with different limits side by side.
/// [`Default`] yields the canonical values:
///
/// | Field | Default |
/// |-------|---------|
/// | `min_assets` / `max_assets` | 2 / 8 |
/// | `min_weight` / `max_weight` | 1 / 50 |
/// | `max_total_weight` | 50 |
/// | `min_balance` | 1e-12 |
/// | `min_fee` / `max_fee` | 1e-6 / 0.1 |
/// | `exit_fee` | 0 |
/// | `max_in_ratio` / `max_out_ratio` | 1/2 / 1/3 + 1e-18 |
/// | `min_pool_supply` / `max_pool_supply` | 100 / 1e9 |
/// | `min_weight_change_period` | 90 days of blocks |
/// | `add_token_time_lock` | 10 days of blocks |
/// | `min_pow_base` / `max_pow_base` | 1e-18 / 2 − 1e-18 |
/// | `pow_precision` | 1e-10 |
///
/// # Validation
///
/// [`validate`](Self::validate) checks internal consistency: every
/// `min ≤ max`, the timelock fits inside the minimum weight-change period,
/// the pow base range lies inside `(0, 2)`, and the exit fee is zero.
///
/// # Examples
///
/// ```
/// use smart_pool::config::PoolParams;
///
/// let params = PoolParams {
///     add_token_time_lock: 5,
///     min_weight_change_period: 10,
///     ..PoolParams::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolParams {
    /// Fewest assets a pool may hold.
    pub min_assets: usize,
    /// Most assets a pool may hold.
    pub max_assets: usize,
    /// Smallest denormalized weight.
    pub min_weight: Fixed,
    /// Largest denormalized weight.
    pub max_weight: Fixed,
    /// Upper bound on the sum of all denormalized weights.
    pub max_total_weight: Fixed,
    /// Smallest balance an asset may be bound with or left at.
    pub min_balance: Fixed,
    /// Smallest swap fee.
    pub min_fee: Fixed,
    /// Largest swap fee.
    pub max_fee: Fixed,
    /// Exit fee on redeemed pool shares.  Must equal [`EXIT_FEE`].
    pub exit_fee: Fixed,
    /// Largest swap or single join input, as a fraction of the balance.
    pub max_in_ratio: Fixed,
    /// Largest swap or single exit output, as a fraction of the balance.
    pub max_out_ratio: Fixed,
    /// Smallest initial pool-share supply.
    pub min_pool_supply: Fixed,
    /// Largest initial pool-share supply.
    pub max_pool_supply: Fixed,
    /// Shortest gradual weight update, in blocks.
    pub min_weight_change_period: BlockNumber,
    /// Blocks between committing and applying a new asset.
    pub add_token_time_lock: BlockNumber,
    /// Smallest accepted `pow` base.
    pub min_pow_base: Fixed,
    /// Largest accepted `pow` base.
    pub max_pow_base: Fixed,
    /// Series cut-off for fractional `pow`.
    pub pow_precision: Fixed,
}

impl Default for PoolParams {
    fn default() -> Self {
        let pow = PowLimits::default();
        Self {
            min_assets: 2,
            max_assets: 8,
            min_weight: Fixed::ONE,
            max_weight: Fixed::from_integer(50),
            max_total_weight: Fixed::from_integer(50),
            min_balance: Fixed::from_raw_u128(1_000_000),
            min_fee: Fixed::from_raw_u128(1_000_000_000_000),
            max_fee: Fixed::from_raw_u128(100_000_000_000_000_000),
            exit_fee: EXIT_FEE,
            max_in_ratio: Fixed::from_raw_u128(500_000_000_000_000_000),
            max_out_ratio: Fixed::from_raw_u128(333_333_333_333_333_334),
            min_pool_supply: Fixed::from_integer(100),
            max_pool_supply: Fixed::from_integer(1_000_000_000),
            min_weight_change_period: 90 * BLOCKS_PER_DAY,
            add_token_time_lock: 10 * BLOCKS_PER_DAY,
            min_pow_base: pow.min_base,
            max_pow_base: pow.max_base,
            pow_precision: pow.precision,
        }
    }
}

impl PoolParams {
    /// Validates internal consistency.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfiguration`] for an inverted bound, a
    ///   timelock longer than the minimum weight-change period, a pow
    ///   range outside `(0, 2)`, a zero pow precision, or ratio limits
    ///   outside `(0, 1]`.
    /// - [`PoolError::InvalidFee`] if `exit_fee` is not zero or
    ///   `max_fee ≥ 1`.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.min_assets < 2 {
            return Err(PoolError::InvalidConfiguration(
                "a pool needs at least 2 assets",
            ));
        }
        if self.min_assets > self.max_assets {
            return Err(PoolError::InvalidConfiguration(
                "min_assets must not exceed max_assets",
            ));
        }
        if self.min_weight.is_zero() || self.min_weight > self.max_weight {
            return Err(PoolError::InvalidConfiguration(
                "weight bounds must satisfy 0 < min_weight <= max_weight",
            ));
        }
        if self.max_weight > self.max_total_weight {
            return Err(PoolError::InvalidConfiguration(
                "max_weight must not exceed max_total_weight",
            ));
        }
        if self.min_balance.is_zero() {
            return Err(PoolError::InvalidConfiguration(
                "min_balance must be non-zero",
            ));
        }
        if self.min_fee > self.max_fee {
            return Err(PoolError::InvalidConfiguration(
                "min_fee must not exceed max_fee",
            ));
        }
        if self.max_fee >= Fixed::ONE {
            return Err(PoolError::InvalidFee("max_fee must be below 1"));
        }
        if self.exit_fee != EXIT_FEE {
            return Err(PoolError::InvalidFee("exit fee must be zero"));
        }
        if self.max_in_ratio.is_zero()
            || self.max_in_ratio > Fixed::ONE
            || self.max_out_ratio.is_zero()
            || self.max_out_ratio > Fixed::ONE
        {
            return Err(PoolError::InvalidConfiguration(
                "in/out ratio limits must lie in (0, 1]",
            ));
        }
        if self.min_pool_supply.is_zero() || self.min_pool_supply > self.max_pool_supply {
            return Err(PoolError::InvalidConfiguration(
                "pool supply bounds must satisfy 0 < min <= max",
            ));
        }
        if self.min_weight_change_period == 0 {
            return Err(PoolError::InvalidConfiguration(
                "min_weight_change_period must be non-zero",
            ));
        }
        if self.add_token_time_lock > self.min_weight_change_period {
            return Err(PoolError::InvalidConfiguration(
                "add_token_time_lock must not exceed min_weight_change_period",
            ));
        }
        let default_pow = PowLimits::default();
        if self.min_pow_base.is_zero()
            || self.min_pow_base > self.max_pow_base
            || self.max_pow_base > default_pow.max_base
        {
            return Err(PoolError::InvalidConfiguration(
                "pow base range must lie inside (0, 2)",
            ));
        }
        if self.pow_precision.is_zero() {
            return Err(PoolError::InvalidConfiguration(
                "pow_precision must be non-zero",
            ));
        }
        Ok(())
    }

    /// The `pow` limits derived from these params.
    pub const fn pow_limits(&self) -> PowLimits {
        PowLimits {
            min_base: self.min_pow_base,
            max_base: self.max_pow_base,
            precision: self.pow_precision,
        }
    }

    /// A bonding curve using these params' `pow` limits.
    pub const fn bonding_curve(&self) -> BondingCurve {
        BondingCurve::new(self.pow_limits())
    }

    /// Returns `true` if `count` assets is a legal pool size.
    #[must_use]
    pub const fn asset_count_ok(&self, count: usize) -> bool {
        count >= self.min_assets && count <= self.max_assets
    }

    /// Returns `true` if `weight` is within `[min_weight, max_weight]`.
    #[must_use]
    pub fn weight_ok(&self, weight: Fixed) -> bool {
        weight >= self.min_weight && weight <= self.max_weight
    }

    /// Returns `true` if `fee` is within `[min_fee, max_fee]`.
    #[must_use]
    pub fn fee_ok(&self, fee: Fixed) -> bool {
        fee >= self.min_fee && fee <= self.max_fee
    }
}
