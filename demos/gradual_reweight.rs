//! Gradual reweighting example (Liquidity Bootstrapping style).
//!
//! Demonstrates creating a smart pool that starts heavily weighted toward a
//! new project token and drifts toward 50/50 over a block window, showing
//! how the spot price falls as the weights move.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=smart_pool=info cargo run --example gradual_reweight
//! ```

use smart_pool::config::{PoolConfig, PoolParams};
use smart_pool::domain::{AccountId, AssetId, Fixed};
use smart_pool::factory::SmartPoolFactory;
use smart_pool::ledger::InMemoryLedger;
use smart_pool::manager::AdvanceOutcome;
use smart_pool::rights::Rights;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Gradual Reweight ===\n");

    // ── 1. Accounts and assets ──────────────────────────────────────────
    let controller = AccountId::from_bytes([1u8; 32]);
    let project = AssetId::from_bytes([0x10; 32]);
    let usdc = AssetId::from_bytes([0x20; 32]);

    let mut ledger = InMemoryLedger::new();
    ledger.credit(project, controller, Fixed::from_integer(1_000_000))?;
    ledger.credit(usdc, controller, Fixed::from_integer(100_000))?;

    // ── 2. Pool: 36/4 weights, reweight allowed over ≥ 100 blocks ─────────
    let params = PoolParams {
        min_weight_change_period: 100,
        add_token_time_lock: 10,
        ..PoolParams::default()
    };
    let rights = Rights {
        can_change_weights: true,
        can_pause_swapping: true,
        ..Rights::none()
    };
    let config = PoolConfig::new(
        vec![project, usdc],
        vec![Fixed::from_integer(900_000), Fixed::from_integer(100_000)],
        vec![Fixed::from_integer(36), Fixed::from_integer(4)],
        "0.01".parse()?,
        rights,
    )?
    .with_params(params)?;

    let mut pool = SmartPoolFactory::create(&config, ledger, controller)?;
    println!(
        "Created pool: weights = {:?}, spot(usdc → project) = {}",
        pool.core().weights().iter().map(ToString::to_string).collect::<Vec<_>>(),
        pool.spot_price(usdc, project)?
    );

    // ── 3. Schedule 36/4 → 20/20 over blocks 1 000..1 500 ─────────────────
    let targets = [Fixed::from_integer(20), Fixed::from_integer(20)];
    pool.schedule(&targets, 1_000, 1_500, 990)?;

    // ── 4. Poke the schedule at irregular intervals ───────────────────────
    for block in [1_000, 1_100, 1_250, 1_400, 1_600] {
        let outcome = pool.advance(block)?;
        let weights: Vec<String> = pool.core().weights().iter().map(ToString::to_string).collect();
        println!(
            "block {block:>5}: {:<10} weights = {weights:?}, spot = {}",
            format!("{outcome:?}"),
            pool.spot_price(usdc, project)?
        );
        if outcome == AdvanceOutcome::Finished {
            break;
        }
    }

    // ── 5. Events ───────────────────────────────────────────────────────
    for event in pool.take_events() {
        println!("event: {}", event.name());
    }

    println!("\n✓ Gradual reweight example completed successfully.");
    Ok(())
}
