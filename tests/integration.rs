//! Integration tests exercising the full system from config to pool operation.
//!
//! These tests drive the public API only: factory creation, gradual
//! reweighting, the token lifecycle, rights gating, trading and liquidity
//! flows, and configuration loading.

#![allow(clippy::panic)]
#![allow(clippy::indexing_slicing)]

use smart_pool::config::{PoolConfig, PoolParams};
use smart_pool::domain::{AccountId, AssetId, Fixed, Rounding};
use smart_pool::error::{ErrorKind, PoolError};
use smart_pool::events::PoolEvent;
use smart_pool::factory::SmartPoolFactory;
use smart_pool::ledger::InMemoryLedger;
use smart_pool::manager::AdvanceOutcome;
use smart_pool::math::{fixed_point, BondingCurve, CheckedArithmetic};
use smart_pool::pools::SmartPool;
use smart_pool::rights::{Capability, Rights};
use smart_pool::traits::Ledger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fx(s: &str) -> Fixed {
    let Ok(v) = s.parse() else {
        panic!("valid literal {s}");
    };
    v
}

fn asset(b: u8) -> AssetId {
    AssetId::from_bytes([b; 32])
}

fn owner() -> AccountId {
    AccountId::from_bytes([0x01; 32])
}

fn trader() -> AccountId {
    AccountId::from_bytes([0x02; 32])
}

fn asset_x() -> AssetId {
    asset(0x58)
}

fn short_params() -> PoolParams {
    PoolParams {
        min_weight_change_period: 10,
        add_token_time_lock: 5,
        ..PoolParams::default()
    }
}

fn funded_ledger() -> InMemoryLedger {
    let mut ledger = InMemoryLedger::new();
    for a in [asset(1), asset(2), asset(3), asset_x()] {
        for account in [owner(), trader()] {
            let Ok(()) = ledger.credit(a, account, fx("1000000")) else {
                panic!("credit");
            };
        }
    }
    ledger
}

fn three_asset_pool(rights: Rights) -> SmartPool<InMemoryLedger> {
    let Ok(cfg) = PoolConfig::new(
        vec![asset(1), asset(2), asset(3)],
        vec![fx("1000"), fx("2000"), fx("3000")],
        vec![fx("12"), fx("1.5"), fx("1.5")],
        fx("0.003"),
        rights,
    )
    .and_then(|c| c.with_params(short_params())) else {
        panic!("valid config");
    };
    let Ok(pool) = SmartPoolFactory::create(&cfg, funded_ledger(), owner()) else {
        panic!("pool created");
    };
    pool
}

fn assert_close(actual: Fixed, expected: Fixed, tolerance: &str) {
    let diff = actual.abs_diff(&expected);
    assert!(diff <= fx(tolerance), "{actual} vs {expected} (diff {diff})");
}

// ===========================================================================
// Suite 1: Gradual Reweighting
// ===========================================================================

#[test]
fn scenario_midpoint_of_ten_block_update() {
    let mut pool = three_asset_pool(Rights::all());
    let targets = [fx("3"), fx("6"), fx("6")];
    assert_eq!(pool.schedule(&targets, 100, 110, 100), Ok(()));

    assert_eq!(pool.advance(105), Ok(AdvanceOutcome::Progressed));
    let weights = pool.core().weights();
    assert_close(weights[0], fx("7.5"), "0.000000000000000001");
    assert_close(weights[1], fx("3.75"), "0.000000000000000001");
    assert_close(weights[2], fx("3.75"), "0.000000000000000001");
}

#[test]
fn gradual_update_runs_to_completion_with_gaps() {
    let mut pool = three_asset_pool(Rights::all());
    let targets = [fx("3"), fx("6"), fx("6")];
    assert_eq!(pool.schedule(&targets, 0, 40, 0), Ok(()));

    for block in [1, 7, 8, 23] {
        assert_eq!(pool.advance(block), Ok(AdvanceOutcome::Progressed));
        assert!(pool.core().total_weight() <= pool.core().params().max_total_weight);
    }
    // late call well past the end
    assert_eq!(pool.advance(1_000), Ok(AdvanceOutcome::Finished));
    assert_eq!(pool.core().weights(), targets.to_vec());
    assert!(!pool.scheduler().is_active());

    let events = pool.take_events();
    assert!(matches!(events.first(), Some(PoolEvent::WeightsScheduled { .. })));
    assert_eq!(
        events.last(),
        Some(&PoolEvent::WeightsUpdateFinished { block: 1_000 })
    );
}

#[test]
fn weighted_prices_shift_with_weights() {
    let mut pool = three_asset_pool(Rights::all());
    let Ok(before) = pool.spot_price(asset(2), asset(1)) else {
        panic!("price");
    };
    assert_eq!(pool.schedule(&[fx("3"), fx("6"), fx("6")], 0, 10, 0), Ok(()));
    assert_eq!(pool.advance(10), Ok(AdvanceOutcome::Finished));
    let Ok(after) = pool.spot_price(asset(2), asset(1)) else {
        panic!("price");
    };
    // asset 1 lost weight, so it got cheaper in units of asset 2
    assert!(after < before);
}

// ===========================================================================
// Suite 2: Token Lifecycle
// ===========================================================================

#[test]
fn scenario_commit_then_apply_after_timelock() {
    let mut pool = three_asset_pool(Rights::all());
    assert_eq!(pool.commit_token(asset_x(), fx("10000"), fx("1.5"), 50), Ok(()));

    let early = pool.apply_token(owner(), 52);
    assert_eq!(
        early.map(|a| a.shares_minted),
        Err(PoolError::TimelockNotElapsed { remaining: 3 })
    );
    assert!(pool.lifecycle().is_pending());

    let supply = pool.total_supply();
    let Ok(applied) = pool.apply_token(owner(), 55) else {
        panic!("apply after timelock");
    };
    let Ok(expected) = fixed_point::mul_div(supply, fx("1.5"), fx("16.5"), Rounding::Down) else {
        panic!("expected shares");
    };
    assert_eq!(applied.shares_minted, expected);
    assert!(pool.core().is_bound(asset_x()));
    assert_eq!(pool.ledger().custody(asset_x()), fx("10000"));
    assert_eq!(
        pool.ledger().share_balance(owner()),
        supply.safe_add(&expected).unwrap_or_default()
    );
}

#[test]
fn scenario_schedule_and_commit_exclude_each_other() {
    let mut pool = three_asset_pool(Rights::all());
    assert_eq!(pool.commit_token(asset_x(), fx("10"), fx("1"), 0), Ok(()));
    let err = pool.schedule(&[fx("3"), fx("6"), fx("6")], 0, 20, 0);
    assert_eq!(err, Err(PoolError::CommitPending));
    assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::State));

    let mut pool = three_asset_pool(Rights::all());
    assert_eq!(pool.schedule(&[fx("3"), fx("6"), fx("6")], 0, 20, 0), Ok(()));
    let err = pool.commit_token(asset_x(), fx("10"), fx("1"), 1);
    assert_eq!(err, Err(PoolError::UpdateInProgress));
    assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::State));
}

#[test]
fn remove_token_settles_balance_and_shares() {
    let mut pool = three_asset_pool(Rights::all());
    let supply = pool.total_supply();
    let Ok(removed) = pool.remove_token(owner(), asset(3)) else {
        panic!("remove");
    };
    assert_eq!(removed.balance, fx("3000"));
    let Ok(expected) = supply
        .safe_mul(&fx("1.5"))
        .and_then(|v| v.safe_div(&fx("15")))
    else {
        panic!("expected shares");
    };
    assert_eq!(removed.shares_burned, expected);
    assert_eq!(pool.ledger().custody(asset(3)), Fixed::ZERO);
    assert_eq!(pool.core().len(), 2);
    assert_eq!(pool.core().total_weight(), fx("13.5"));
    assert_eq!(
        pool.take_events().last(),
        Some(&PoolEvent::TokenRemoved { asset: asset(3) })
    );
}

#[test]
fn failed_removal_leaves_everything_untouched() {
    let mut pool = three_asset_pool(Rights::all());
    // trader holds no pool shares, so the burn is not covered
    let before = pool.core().clone();
    let err = pool.remove_token(trader(), asset(3));
    assert!(matches!(err, Err(PoolError::InsufficientBalance(_))));
    assert_eq!(pool.core(), &before);
    assert_eq!(pool.ledger().custody(asset(3)), fx("3000"));
    assert!(pool.events().is_empty());
}

#[test]
fn partially_funded_join_leaves_ledger_and_pool_untouched() {
    let mut pool = three_asset_pool(Rights::none());
    let partial = AccountId::from_bytes([0x07; 32]);
    for a in [asset(1), asset(2)] {
        let Ok(()) = pool.ledger_mut().credit(a, partial, fx("100000")) else {
            panic!("credit");
        };
    }
    let before = pool.core().clone();

    let max_in = [fx("1000"), fx("1000"), fx("1000")];
    let err = pool.join_pool(partial, fx("10"), &max_in);
    assert!(matches!(err, Err(PoolError::InsufficientBalance(_))));

    assert_eq!(pool.core(), &before);
    for a in pool.core().assets() {
        assert_eq!(pool.ledger().custody(a.id()), a.balance());
    }
    assert_eq!(pool.ledger().asset_balance(asset(1), partial), fx("100000"));
    assert_eq!(pool.ledger().asset_balance(asset(2), partial), fx("100000"));
    assert_eq!(pool.ledger().share_balance(partial), Fixed::ZERO);
    assert_eq!(pool.ledger().share_supply(), pool.total_supply());
    assert!(pool.events().is_empty());
}

// ===========================================================================
// Suite 3: Bonding Curve
// ===========================================================================

#[test]
fn scenario_out_given_in_matches_closed_form() {
    let curve = BondingCurve::default();
    let Ok(out) = curve.out_given_in(
        fx("52.5"),
        fx("5"),
        fx("10500"),
        fx("5"),
        fx("2.5"),
        fx("0.003"),
    ) else {
        panic!("out_given_in");
    };
    let adjusted = 2.5 * (1.0 - 0.003);
    let expected = 10500.0 * (1.0 - 52.5 / (52.5 + adjusted));
    let rel = ((out.to_f64() - expected) / expected).abs();
    assert!(rel < 1e-8, "relative error {rel}");
}

// ===========================================================================
// Suite 4: Rights
// ===========================================================================

#[test]
fn fixed_pool_still_trades() {
    let mut pool = three_asset_pool(Rights::none());
    assert_eq!(
        pool.schedule(&[fx("3"), fx("6"), fx("6")], 0, 20, 0),
        Err(PoolError::PermissionDenied(Capability::ChangeWeights))
    );
    assert_eq!(
        pool.reweight_single(owner(), asset(1), fx("10")).map(|_| ()),
        Err(PoolError::PermissionDenied(Capability::ChangeWeights))
    );
    assert_eq!(
        pool.remove_token(owner(), asset(1)).map(|r| r.asset),
        Err(PoolError::PermissionDenied(Capability::AddRemoveTokens))
    );
    assert!(pool
        .swap_exact_in(trader(), asset(1), fx("10"), asset(2), Fixed::ZERO, None)
        .is_ok());
}

#[test]
fn paused_pool_blocks_swaps_but_not_proportional_exit() {
    let mut pool = three_asset_pool(Rights::all());
    assert_eq!(pool.set_public_swap(false), Ok(()));
    assert_eq!(
        pool.swap_exact_in(trader(), asset(1), fx("10"), asset(2), Fixed::ZERO, None)
            .map(|r| r.amount_out()),
        Err(PoolError::SwapsPaused)
    );
    let zeros = [Fixed::ZERO, Fixed::ZERO, Fixed::ZERO];
    assert!(pool.exit_pool(owner(), fx("10"), &zeros).is_ok());
}

// ===========================================================================
// Suite 5: Trading and Liquidity Lifecycle
// ===========================================================================

#[test]
fn full_trading_lifecycle() {
    let mut pool = three_asset_pool(Rights::none());

    // proportional join by a trader
    let max_in = [fx("1000"), fx("1000"), fx("1000")];
    let Ok(amounts) = pool.join_pool(trader(), fx("10"), &max_in) else {
        panic!("join");
    };
    assert_eq!(amounts, vec![fx("100"), fx("200"), fx("300")]);
    assert_eq!(pool.ledger().share_balance(trader()), fx("10"));

    // swap both ways
    let Ok(quote) = pool.quote_swap(asset(1), fx("5"), asset(3)) else {
        panic!("quote");
    };
    let Ok(swap) = pool.swap_exact_in(trader(), asset(1), fx("5"), asset(3), quote, None) else {
        panic!("swap");
    };
    assert_eq!(swap.amount_out(), quote);
    let Ok(needed) = pool.quote_swap_exact_out(asset(3), asset(1), fx("1")) else {
        panic!("quote exact out");
    };
    let Ok(back) = pool.swap_exact_out(trader(), asset(3), needed, asset(1), fx("1"), None)
    else {
        panic!("swap exact out");
    };
    assert_eq!(back.amount_in(), needed);

    // single-asset round trip
    let Ok(shares) = pool.join_single(trader(), asset(2), fx("50"), Fixed::ZERO) else {
        panic!("join single");
    };
    let Ok(paid) = pool.exit_single(trader(), asset(2), shares, Fixed::ZERO) else {
        panic!("exit single");
    };
    assert!(paid < fx("50"));

    // exit everything the trader holds
    let held = pool.ledger().share_balance(trader());
    let zeros = [Fixed::ZERO, Fixed::ZERO, Fixed::ZERO];
    assert!(pool.exit_pool(trader(), held, &zeros).is_ok());
    assert_eq!(pool.ledger().share_balance(trader()), Fixed::ZERO);

    // custody always mirrors pool bookkeeping
    for a in pool.core().assets() {
        assert_eq!(pool.ledger().custody(a.id()), a.balance());
    }
    assert_eq!(pool.ledger().share_supply(), pool.total_supply());
}

#[test]
fn single_exact_variants_settle_on_ledger() {
    let mut pool = three_asset_pool(Rights::none());
    let Ok(paid) = pool.join_single_exact_shares(trader(), asset(1), fx("1"), fx("100")) else {
        panic!("join exact shares");
    };
    assert_eq!(pool.ledger().custody(asset(1)), fx("1000").safe_add(&paid).unwrap_or_default());
    let Ok(burned) = pool.exit_single_exact_amount(trader(), asset(1), fx("10"), fx("1")) else {
        panic!("exit exact amount");
    };
    assert!(burned < fx("1"));
    assert_eq!(
        pool.ledger().share_balance(trader()),
        fx("1").safe_sub(&burned).unwrap_or_default()
    );
}

#[test]
fn reweight_then_total_weight_bound_holds() {
    let mut pool = three_asset_pool(Rights::all());
    assert!(pool.reweight_single(owner(), asset(1), fx("40")).is_ok());
    assert!(matches!(
        pool.reweight_single(owner(), asset(2), fx("10")),
        Err(PoolError::InvalidWeight(_))
    ));
    assert!(pool.core().total_weight() <= pool.core().params().max_total_weight);
    assert!(pool.reweight_single(owner(), asset(1), fx("2")).is_ok());
    assert_eq!(pool.core().total_weight(), fx("5"));
    for a in pool.core().assets() {
        assert_eq!(pool.ledger().custody(a.id()), a.balance());
    }
}

// ===========================================================================
// Suite 6: Configuration
// ===========================================================================

#[test]
fn config_validation_errors_are_validation_kind() {
    let err = PoolConfig::new(
        vec![asset(1), asset(1)],
        vec![fx("10"), fx("10")],
        vec![fx("1"), fx("1")],
        fx("0.003"),
        Rights::none(),
    );
    assert!(matches!(err, Err(PoolError::InvalidAsset(_))));
    assert_eq!(err.map_err(|e| e.kind()).map(|_| ()), Err(ErrorKind::Validation));
}

#[cfg(feature = "serde")]
#[test]
fn params_load_from_toml() {
    let text = r#"
        min_weight_change_period = 20
        add_token_time_lock = 10
        max_fee = "0.05"
    "#;
    let Ok(params) = toml::from_str::<PoolParams>(text) else {
        panic!("params parse");
    };
    assert_eq!(params.min_weight_change_period, 20);
    assert_eq!(params.add_token_time_lock, 10);
    assert_eq!(params.max_fee, fx("0.05"));
    assert_eq!(params.max_total_weight, PoolParams::default().max_total_weight);
    assert_eq!(params.validate(), Ok(()));
}
