//! # Smart Pool
//!
//! Weighted constant-function market maker with governance-adjustable
//! weights: an 18-decimal fixed-point core, Balancer-style bonding-curve
//! math, a block-indexed gradual weight scheduler, and a timelocked
//! commit → apply workflow for adding assets.
//!
//! The crate is a pure, deterministic state machine.  A host (chain,
//! simulator, or service) drives it one call at a time and supplies the
//! current block number and a [`Ledger`](traits::Ledger) that moves tokens.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for params, rights, ids, events |
//!
//! # Quick Start
//!
//! ```rust
//! use smart_pool::config::{PoolConfig, PoolParams};
//! use smart_pool::domain::{AccountId, AssetId, Fixed};
//! use smart_pool::factory::SmartPoolFactory;
//! use smart_pool::ledger::InMemoryLedger;
//! use smart_pool::rights::Rights;
//!
//! let owner = AccountId::from_bytes([1; 32]);
//! let dai = AssetId::from_bytes([10; 32]);
//! let weth = AssetId::from_bytes([11; 32]);
//!
//! // 1. Fund the creator on the ledger
//! let mut ledger = InMemoryLedger::new();
//! ledger.credit(dai, owner, Fixed::from_integer(10_000)).expect("credit");
//! ledger.credit(weth, owner, Fixed::from_integer(10_000)).expect("credit");
//!
//! // 2. Describe the pool: 80/20 weights, 0.3% fee, weights adjustable
//! let params = PoolParams {
//!     min_weight_change_period: 100,
//!     add_token_time_lock: 10,
//!     ..PoolParams::default()
//! };
//! let rights = Rights { can_change_weights: true, ..Rights::none() };
//! let config = PoolConfig::new(
//!     vec![dai, weth],
//!     vec![Fixed::from_integer(4_000), Fixed::from_integer(1_000)],
//!     vec![Fixed::from_integer(40), Fixed::from_integer(10)],
//!     "0.003".parse().expect("literal"),
//!     rights,
//! )
//! .and_then(|c| c.with_params(params))
//! .expect("valid config");
//!
//! // 3. Create the pool and schedule a move to 50/50 over 100 blocks
//! let mut pool = SmartPoolFactory::create(&config, ledger, owner).expect("pool created");
//! let targets = [Fixed::from_integer(25), Fixed::from_integer(25)];
//! pool.schedule(&targets, 1_000, 1_100, 1_000).expect("scheduled");
//!
//! // 4. Advance halfway
//! pool.advance(1_050).expect("advanced");
//! assert_eq!(pool.core().weights()[0], "32.5".parse().expect("literal"));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │     Host     │  supplies blocks, callers, and a Ledger
//! └──────┬───────┘
//!        │ SmartPoolFactory::create(&config, ledger, creator)
//!        ▼
//! ┌──────────────┐
//! │  SmartPool   │  rights, cap, whitelist, events, reentrancy guard
//! └──────┬───────┘
//!        │ WeightScheduler / TokenLifecycle / reweight_single
//!        ▼
//! ┌──────────────┐
//! │ WeightedPool │  bound assets, swaps, joins, exits
//! └──────┬───────┘
//!        │ BondingCurve
//!        ▼
//! ┌──────────────┐
//! │  fixed_point │  mul, div, pow_int, pow, pow_approx
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Fixed`](domain::Fixed), [`AssetId`](domain::AssetId), [`AccountId`](domain::AccountId), [`SwapResult`](domain::SwapResult) |
//! | [`math`] | Fixed-point primitives and the [`BondingCurve`](math::BondingCurve) |
//! | [`config`] | [`PoolParams`](config::PoolParams) constants and [`PoolConfig`](config::PoolConfig) blueprints |
//! | [`traits`] | Collaborator seams: [`Ledger`](traits::Ledger), [`FromConfig`](traits::FromConfig) |
//! | [`manager`] | Weight scheduler, token lifecycle, single-asset reweight |
//! | [`pools`] | [`WeightedPool`](pools::WeightedPool) and [`SmartPool`](pools::SmartPool) |
//! | [`factory`] | [`SmartPoolFactory`](factory::SmartPoolFactory) |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) for simulations and tests |
//! | [`rights`] | [`Rights`](rights::Rights) capability flags |
//! | [`events`] | [`PoolEvent`](events::PoolEvent) state-change records |
//! | [`error`] | [`PoolError`](error::PoolError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod factory;
pub mod ledger;
pub mod manager;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod rights;
pub mod traits;
