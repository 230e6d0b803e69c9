//! Immediate single-asset reweighting.
//!
//! Changing one weight by `Δw` moves the asset balance by
//! `balance · Δw / weight` and the pool-share supply by
//! `supply · Δw / total_weight`, so every other asset keeps its price.
//! Raising a weight means the caller deposits and receives shares;
//! lowering it means the caller burns shares and withdraws.

use crate::domain::{AssetId, Fixed, Rounding};
use crate::error::PoolError;
use crate::math::fixed_point::mul_div;
use crate::math::CheckedArithmetic;
use crate::pools::WeightedPool;

use super::{TokenLifecycle, WeightScheduler};

/// What [`reweight_single`] did and what the ledger must settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReweightOutcome {
    /// New weight equals the current one.
    Unchanged,
    /// Weight raised: pull `balance_in`, mint `shares_minted`.
    Increased {
        /// Asset amount the caller deposits.
        balance_in: Fixed,
        /// Pool shares minted to the caller.
        shares_minted: Fixed,
    },
    /// Weight lowered: push `balance_out`, burn `shares_burned`.
    Decreased {
        /// Asset amount paid to the caller.
        balance_out: Fixed,
        /// Pool shares burned from the caller.
        shares_burned: Fixed,
    },
}

/// Sets the weight of `asset` to `new_weight` at once.
///
/// # Errors
///
/// - [`PoolError::UpdateInProgress`] if a gradual update is active.
/// - [`PoolError::CommitPending`] if a token commit is pending.
/// - [`PoolError::InvalidAsset`] if `asset` is not bound.
/// - [`PoolError::InvalidWeight`] if `new_weight` is out of bounds or the
///   total weight would exceed `max_total_weight`.
/// - [`PoolError::InvalidBalance`] if the remaining balance would drop
///   below `min_balance`.
/// - [`PoolError::InvalidQuantity`] if the share delta rounds to zero.
pub fn reweight_single(
    pool: &mut WeightedPool,
    scheduler: &WeightScheduler,
    lifecycle: &TokenLifecycle,
    asset: AssetId,
    new_weight: Fixed,
) -> Result<ReweightOutcome, PoolError> {
    if scheduler.is_active() {
        return Err(PoolError::UpdateInProgress);
    }
    if lifecycle.is_pending() {
        return Err(PoolError::CommitPending);
    }
    if !pool.params().weight_ok(new_weight) {
        return Err(PoolError::InvalidWeight(
            "weight must lie within [min_weight, max_weight]",
        ));
    }
    let current = *pool.asset(asset)?;
    if current.weight() == new_weight {
        return Ok(ReweightOutcome::Unchanged);
    }

    let increasing = new_weight > current.weight();
    let delta_weight = current.weight().abs_diff(&new_weight);
    // The caller's side of the settlement rounds against the caller.
    let (share_rounding, balance_rounding) = if increasing {
        (Rounding::Down, Rounding::Up)
    } else {
        (Rounding::Up, Rounding::Down)
    };
    let shares = mul_div(
        pool.total_supply(),
        delta_weight,
        pool.total_weight(),
        share_rounding,
    )?;
    if shares.is_zero() {
        return Err(PoolError::InvalidQuantity("share delta rounds to zero"));
    }
    let delta_balance = mul_div(
        current.balance(),
        delta_weight,
        current.weight(),
        balance_rounding,
    )?;

    let mut next = pool.clone();
    let outcome = if increasing {
        let balance = current.balance().safe_add(&delta_balance)?;
        next.rebind(asset, balance, new_weight)?;
        next.mint_supply(shares)?;
        ReweightOutcome::Increased {
            balance_in: delta_balance,
            shares_minted: shares,
        }
    } else {
        let balance = current.balance().safe_sub(&delta_balance)?;
        next.rebind(asset, balance, new_weight)?;
        next.burn_supply(shares)?;
        ReweightOutcome::Decreased {
            balance_out: delta_balance,
            shares_burned: shares,
        }
    };
    *pool = next;
    Ok(outcome)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::rights::Rights;
    use crate::traits::FromConfig;

    fn fx(s: &str) -> Fixed {
        let Ok(v) = s.parse() else {
            panic!("valid literal {s}");
        };
        v
    }

    fn id(b: u8) -> AssetId {
        AssetId::from_bytes([b; 32])
    }

    fn pool() -> WeightedPool {
        let Ok(cfg) = PoolConfig::new(
            vec![id(1), id(2)],
            vec![fx("1000"), fx("2000")],
            vec![fx("10"), fx("10")],
            fx("0.003"),
            Rights::none(),
        ) else {
            panic!("valid config");
        };
        let Ok(pool) = WeightedPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    fn thirds_pool() -> WeightedPool {
        let Ok(cfg) = PoolConfig::new(
            vec![id(1), id(2)],
            vec![fx("1000"), fx("1000")],
            vec![fx("3"), fx("3")],
            fx("0.003"),
            Rights::none(),
        ) else {
            panic!("valid config");
        };
        let Ok(pool) = WeightedPool::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    #[test]
    fn inexact_deltas_round_against_the_caller() {
        let idle = (WeightScheduler::new(), TokenLifecycle::new());

        let mut up = thirds_pool();
        assert_eq!(
            reweight_single(&mut up, &idle.0, &idle.1, id(1), fx("4")),
            Ok(ReweightOutcome::Increased {
                balance_in: fx("333.333333333333333334"),
                shares_minted: fx("16.666666666666666666"),
            })
        );

        let mut down = thirds_pool();
        assert_eq!(
            reweight_single(&mut down, &idle.0, &idle.1, id(2), fx("2")),
            Ok(ReweightOutcome::Decreased {
                balance_out: fx("333.333333333333333333"),
                shares_burned: fx("16.666666666666666667"),
            })
        );
        assert_eq!(down.balances(), vec![fx("1000"), fx("666.666666666666666667")]);
    }

    #[test]
    fn increase_pulls_and_mints() {
        let mut pool = pool();
        let idle = (WeightScheduler::new(), TokenLifecycle::new());
        let out = reweight_single(&mut pool, &idle.0, &idle.1, id(1), fx("15"));
        assert_eq!(
            out,
            Ok(ReweightOutcome::Increased {
                balance_in: fx("500"),
                shares_minted: fx("25"),
            })
        );
        assert_eq!(pool.balances(), vec![fx("1500"), fx("2000")]);
        assert_eq!(pool.total_weight(), fx("25"));
        assert_eq!(pool.total_supply(), fx("125"));
    }

    #[test]
    fn decrease_pushes_and_burns() {
        let mut pool = pool();
        let idle = (WeightScheduler::new(), TokenLifecycle::new());
        let out = reweight_single(&mut pool, &idle.0, &idle.1, id(2), fx("5"));
        assert_eq!(
            out,
            Ok(ReweightOutcome::Decreased {
                balance_out: fx("1000"),
                shares_burned: fx("25"),
            })
        );
        assert_eq!(pool.balances(), vec![fx("1000"), fx("1000")]);
        assert_eq!(pool.total_supply(), fx("75"));
    }

    #[test]
    fn prices_of_other_assets_are_preserved() {
        let mut pool = pool();
        let Ok(before) = pool.spot_price_sans_fee(id(1), id(2)) else {
            panic!("expected Ok");
        };
        let idle = (WeightScheduler::new(), TokenLifecycle::new());
        let Ok(_) = reweight_single(&mut pool, &idle.0, &idle.1, id(1), fx("20")) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.spot_price_sans_fee(id(1), id(2)), Ok(before));
    }

    #[test]
    fn same_weight_is_unchanged() {
        let mut pool = pool();
        let before = pool.clone();
        let idle = (WeightScheduler::new(), TokenLifecycle::new());
        assert_eq!(
            reweight_single(&mut pool, &idle.0, &idle.1, id(1), fx("10")),
            Ok(ReweightOutcome::Unchanged)
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn guarded_by_plan_and_commit() {
        let mut pool = pool();
        let mut lc = TokenLifecycle::new();
        let s = WeightScheduler::new();
        let Ok(_) = lc.commit(&pool, &s, id(3), fx("1"), fx("1"), 0) else {
            panic!("expected Ok");
        };
        assert_eq!(
            reweight_single(&mut pool, &s, &lc, id(1), fx("12")),
            Err(PoolError::CommitPending)
        );
        assert!(matches!(
            reweight_single(&mut pool, &s, &TokenLifecycle::new(), id(1), fx("41")),
            Err(PoolError::InvalidWeight(_))
        ));
    }
}
