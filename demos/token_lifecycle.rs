//! Token lifecycle example.
//!
//! Demonstrates committing a new asset, waiting out the timelock, applying
//! it to the pool, trading against it, and finally removing it again.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=smart_pool=debug cargo run --example token_lifecycle
//! ```

use smart_pool::config::{PoolConfig, PoolParams};
use smart_pool::domain::{AccountId, AssetId, Fixed};
use smart_pool::error::PoolError;
use smart_pool::factory::SmartPoolFactory;
use smart_pool::ledger::InMemoryLedger;
use smart_pool::rights::Rights;
use smart_pool::traits::Ledger;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Token Lifecycle ===\n");

    // ── 1. Accounts and assets ──────────────────────────────────────────
    let controller = AccountId::from_bytes([1u8; 32]);
    let trader = AccountId::from_bytes([2u8; 32]);
    let weth = AssetId::from_bytes([0x01; 32]);
    let dai = AssetId::from_bytes([0x02; 32]);
    let wbtc = AssetId::from_bytes([0x03; 32]);

    let mut ledger = InMemoryLedger::new();
    for asset in [weth, dai, wbtc] {
        ledger.credit(asset, controller, Fixed::from_integer(1_000_000))?;
        ledger.credit(asset, trader, Fixed::from_integer(10_000))?;
    }

    // ── 2. Pool with add/remove rights ──────────────────────────────────
    let params = PoolParams {
        min_weight_change_period: 20,
        add_token_time_lock: 10,
        ..PoolParams::default()
    };
    let config = PoolConfig::new(
        vec![weth, dai],
        vec![Fixed::from_integer(500), Fixed::from_integer(1_000_000)],
        vec![Fixed::from_integer(10), Fixed::from_integer(10)],
        "0.003".parse()?,
        Rights::all(),
    )?
    .with_params(params)?;
    let mut pool = SmartPoolFactory::create(&config, ledger, controller)?;
    println!("Created pool with {} assets, supply {}", pool.core().len(), pool.total_supply());

    // ── 3. Commit WBTC at block 100 ───────────────────────────────────────
    pool.commit_token(wbtc, Fixed::from_integer(25), Fixed::from_integer(5), 100)?;
    println!("Committed WBTC at block 100");

    match pool.apply_token(controller, 105) {
        Err(PoolError::TimelockNotElapsed { remaining }) => {
            println!("Apply at block 105 rejected: {remaining} block(s) remaining");
        }
        other => println!("Unexpected apply result: {other:?}"),
    }

    // ── 4. Apply after the timelock ───────────────────────────────────────
    let applied = pool.apply_token(controller, 110)?;
    println!(
        "Applied WBTC: minted {} shares, total weight now {}",
        applied.shares_minted,
        pool.core().total_weight()
    );

    // ── 5. Trade against the new asset ────────────────────────────────────
    let quote = pool.quote_swap(dai, Fixed::from_integer(1_000), wbtc)?;
    let result = pool.swap_exact_in(trader, dai, Fixed::from_integer(1_000), wbtc, quote, None)?;
    println!("Swapped 1000 DAI for {} WBTC ({result})", result.amount_out());

    // ── 6. Remove it again ────────────────────────────────────────────────
    let removed = pool.remove_token(controller, wbtc)?;
    println!(
        "Removed WBTC: returned {} WBTC, burned {} shares",
        removed.balance, removed.shares_burned
    );
    println!(
        "Controller now holds {} shares of {}",
        pool.ledger().share_balance(controller),
        pool.total_supply()
    );

    for event in pool.take_events() {
        println!("event: {}", event.name());
    }

    println!("\n✓ Token lifecycle example completed successfully.");
    Ok(())
}
