//! Pool instantiation via the factory pattern.
//!
//! [`SmartPoolFactory`] turns a [`PoolConfig`] and a funded ledger into a
//! live [`SmartPool`]: it validates the configuration, builds the core
//! [`WeightedPool`] through [`FromConfig`], pulls the initial balances from
//! the creator, and mints the initial pool-share supply to the creator.
//!
//! # Usage
//!
//! ```rust
//! use smart_pool::config::PoolConfig;
//! use smart_pool::domain::{AccountId, AssetId, Fixed};
//! use smart_pool::factory::SmartPoolFactory;
//! use smart_pool::ledger::InMemoryLedger;
//! use smart_pool::rights::Rights;
//! use smart_pool::traits::Ledger;
//!
//! let creator = AccountId::from_bytes([7; 32]);
//! let a = AssetId::from_bytes([1; 32]);
//! let b = AssetId::from_bytes([2; 32]);
//!
//! let mut ledger = InMemoryLedger::new();
//! ledger.credit(a, creator, Fixed::from_integer(1_000)).expect("credit");
//! ledger.credit(b, creator, Fixed::from_integer(1_000)).expect("credit");
//!
//! let cfg = PoolConfig::new(
//!     vec![a, b],
//!     vec![Fixed::from_integer(1_000), Fixed::from_integer(1_000)],
//!     vec![Fixed::from_integer(10), Fixed::from_integer(10)],
//!     "0.003".parse().expect("literal"),
//!     Rights::all(),
//! )
//! .expect("valid config");
//!
//! let pool = SmartPoolFactory::create(&cfg, ledger, creator).expect("pool created");
//! assert_eq!(pool.ledger().share_balance(creator), Fixed::from_integer(100));
//! ```
//!
//! [`PoolConfig`]: crate::config::PoolConfig
//! [`SmartPool`]: crate::pools::SmartPool
//! [`WeightedPool`]: crate::pools::WeightedPool
//! [`FromConfig`]: crate::traits::FromConfig

mod smart_factory;

pub use smart_factory::SmartPoolFactory;
