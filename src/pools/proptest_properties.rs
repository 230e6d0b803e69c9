//! Property-based tests using `proptest` for pool invariant validation.
//!
//! 1. **Swap round-trip**: `in_given_out(out_given_in(a)) ≈ a`.
//! 2. **Single-asset inverses**: the four join/exit formulas invert
//!    pairwise.
//! 3. **Price movement direction**: a swap never lowers the spot price.
//! 4. **Interpolation closed form**: scheduled weights track the linear
//!    formula and land exactly on the targets.
//! 5. **Weight-sum bound**: no sequence of reweights pushes the total
//!    above `max_total_weight`.
//! 6. **Pow monotonicity**: `pow(b, e)` rises in `e` for `b > 1` and
//!    falls for `b < 1`.

use proptest::prelude::*;

use crate::config::{PoolConfig, PoolParams};
use crate::domain::{AssetId, Fixed};
use crate::manager::{reweight_single, TokenLifecycle, WeightScheduler};
use crate::math::fixed_point::{self, PowLimits};
use crate::math::BondingCurve;
use crate::rights::Rights;
use crate::traits::FromConfig;

use super::WeightedPool;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn id(b: u8) -> AssetId {
    AssetId::from_bytes([b; 32])
}

fn int(v: u64) -> Fixed {
    Fixed::from_integer(v)
}

fn ratio(n: u64, d: u64) -> Fixed {
    let Some(v) = Fixed::from_ratio(n, d) else {
        panic!("valid ratio {n}/{d}");
    };
    v
}

fn fee() -> Fixed {
    ratio(3, 1_000)
}

fn rel_close(actual: Fixed, expected: Fixed, tolerance: f64) -> bool {
    let e = expected.to_f64();
    ((actual.to_f64() - e) / e).abs() <= tolerance
}

fn make_pool(balances: &[u64], weights: &[u64]) -> WeightedPool {
    let params = PoolParams {
        min_weight_change_period: 10,
        add_token_time_lock: 5,
        ..PoolParams::default()
    };
    let Ok(cfg) = PoolConfig::new(
        (1..=balances.len()).map(|i| id(i as u8)).collect(),
        balances.iter().map(|b| int(*b)).collect(),
        weights.iter().map(|w| int(*w)).collect(),
        fee(),
        Rights::none(),
    )
    .and_then(|c| c.with_params(params)) else {
        panic!("valid config");
    };
    let Ok(pool) = WeightedPool::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn balance_strategy() -> impl Strategy<Value = u64> {
    1_000u64..=1_000_000
}

fn weight_strategy() -> impl Strategy<Value = u64> {
    1u64..=16
}

fn percent_strategy() -> impl Strategy<Value = u64> {
    1u64..=30
}

// ---------------------------------------------------------------------------
// Property 1 & 2: Curve inverses
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_round_trip(
        bal_in in balance_strategy(),
        bal_out in balance_strategy(),
        w_in in weight_strategy(),
        w_out in weight_strategy(),
        pct in percent_strategy(),
    ) {
        let curve = BondingCurve::default();
        let amount_in = ratio(bal_in * pct, 100);
        let Ok(out) = curve.out_given_in(
            int(bal_in), int(w_in), int(bal_out), int(w_out), amount_in, fee(),
        ) else {
            return Ok(());
        };
        if out.is_zero() { return Ok(()); }
        let Ok(back) = curve.in_given_out(
            int(bal_in), int(w_in), int(bal_out), int(w_out), out, fee(),
        ) else {
            return Ok(());
        };
        prop_assert!(
            rel_close(back, amount_in, 1e-6),
            "round trip drifted: {} -> {} -> {}", amount_in, out, back
        );
    }

    #[test]
    fn prop_single_join_inverse(
        bal in balance_strategy(),
        w in weight_strategy(),
        other in weight_strategy(),
        pct in percent_strategy(),
    ) {
        let curve = BondingCurve::default();
        let total = int(w + other);
        let supply = int(100);
        let amount_in = ratio(bal * pct, 100);
        let Ok(shares) = curve.pool_out_given_single_in(
            int(bal), int(w), supply, total, amount_in, fee(),
        ) else {
            return Ok(());
        };
        let Ok(back) = curve.single_in_given_pool_out(
            int(bal), int(w), supply, total, shares, fee(),
        ) else {
            return Ok(());
        };
        prop_assert!(rel_close(back, amount_in, 1e-7), "{} vs {}", back, amount_in);
    }

    #[test]
    fn prop_single_exit_inverse(
        bal in balance_strategy(),
        w in weight_strategy(),
        other in weight_strategy(),
        pct in 1u64..=10,
    ) {
        let curve = BondingCurve::default();
        let total = int(w + other);
        let supply = int(100);
        let shares_in = int(pct);
        let Ok(out) = curve.single_out_given_pool_in(
            int(bal), int(w), supply, total, shares_in, fee(),
        ) else {
            return Ok(());
        };
        if out.is_zero() { return Ok(()); }
        let Ok(back) = curve.pool_in_given_single_out(
            int(bal), int(w), supply, total, out, fee(),
        ) else {
            return Ok(());
        };
        prop_assert!(rel_close(back, shares_in, 1e-7), "{} vs {}", back, shares_in);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Price Movement Direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_raises_spot_price(
        ba in balance_strategy(),
        bb in balance_strategy(),
        wa in weight_strategy(),
        wb in weight_strategy(),
        pct in percent_strategy(),
    ) {
        let mut pool = make_pool(&[ba, bb], &[wa, wb]);
        let Ok(before) = pool.spot_price(id(1), id(2)) else {
            return Ok(());
        };
        let amount_in = ratio(ba * pct, 100);
        let Ok(result) = pool.swap_exact_in(id(1), amount_in, id(2), Fixed::ZERO, None) else {
            return Ok(());
        };
        prop_assert!(result.spot_price_after() >= before);
        let Ok(effective) = result.effective_price() else {
            return Ok(());
        };
        prop_assert!(effective >= before);
    }
}

// ---------------------------------------------------------------------------
// Property 4 & 5: Weight Scheduling and Weight-Sum Bound
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_interpolation_closed_form(
        start in proptest::collection::vec(weight_strategy(), 3),
        end in proptest::collection::vec(weight_strategy(), 3),
        period in 10u64..=1_000,
        offset in 0u64..=1_100,
    ) {
        let mut pool = make_pool(&[1_000, 1_000, 1_000], &start);
        let targets: Vec<Fixed> = end.iter().map(|w| int(*w)).collect();
        let mut scheduler = WeightScheduler::new();
        let Ok(_) = scheduler.schedule(&pool, &TokenLifecycle::new(), &targets, 0, period, 0)
        else {
            panic!("valid schedule");
        };
        let Ok(_) = scheduler.advance(&mut pool, offset) else {
            panic!("advance succeeds");
        };

        let weights = pool.weights();
        if offset >= period {
            prop_assert_eq!(weights, targets);
            prop_assert!(!scheduler.is_active());
        } else {
            let t = offset as f64 / period as f64;
            for ((w, s), e) in weights.iter().zip(&start).zip(&end) {
                let expected = *s as f64 + (*e as f64 - *s as f64) * t;
                prop_assert!((w.to_f64() - expected).abs() < 1e-12, "{} vs {}", w, expected);
            }
        }
        prop_assert!(pool.total_weight() <= pool.params().max_total_weight);
    }

    #[test]
    fn prop_reweights_respect_total_weight(
        moves in proptest::collection::vec((0usize..3, 1u64..=50), 1..12),
    ) {
        let mut pool = make_pool(&[10_000, 10_000, 10_000], &[10, 10, 10]);
        let scheduler = WeightScheduler::new();
        let lifecycle = TokenLifecycle::new();
        let max_total = pool.params().max_total_weight;
        for (slot, weight) in moves {
            let asset = id(slot as u8 + 1);
            let _ = reweight_single(&mut pool, &scheduler, &lifecycle, asset, int(weight));
            prop_assert!(pool.total_weight() <= max_total);
            let sum = pool
                .weights()
                .into_iter()
                .fold(Fixed::ZERO, |acc, w| acc.checked_add(&w).unwrap_or(Fixed::MAX));
            prop_assert_eq!(sum, pool.total_weight());
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Pow Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_pow_monotonic_in_exponent(
        k in 1u64..=900,
        e1 in 0u64..=3_000,
        e2 in 0u64..=3_000,
    ) {
        let limits = PowLimits::default();
        let (lo, hi) = if e1 <= e2 { (e1, e2) } else { (e2, e1) };
        let exp_lo = ratio(lo, 1_000);
        let exp_hi = ratio(hi, 1_000);

        let above = ratio(1_000 + k, 1_000);
        let (Ok(a_lo), Ok(a_hi)) = (
            fixed_point::pow(above, exp_lo, &limits),
            fixed_point::pow(above, exp_hi, &limits),
        ) else {
            panic!("base above one is in domain");
        };
        prop_assert!(a_lo <= a_hi, "{}^{} > {}^{}", above, exp_lo, above, exp_hi);

        let below = ratio(1_000 - k, 1_000);
        let (Ok(b_lo), Ok(b_hi)) = (
            fixed_point::pow(below, exp_lo, &limits),
            fixed_point::pow(below, exp_hi, &limits),
        ) else {
            panic!("base below one is in domain");
        };
        prop_assert!(b_lo >= b_hi, "{}^{} < {}^{}", below, exp_lo, below, exp_hi);
    }
}
