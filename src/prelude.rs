//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use smart_pool::prelude::*;
//! ```

pub use crate::domain::{AccountId, Asset, AssetId, BlockNumber, Fixed, Rounding, SwapResult};

pub use crate::traits::{FromConfig, Ledger};

pub use crate::math::{BondingCurve, CheckedArithmetic};

pub use crate::config::{PoolConfig, PoolParams};

pub use crate::error::{ErrorKind, PoolError, Result};

pub use crate::events::PoolEvent;

pub use crate::rights::{Capability, Rights};

pub use crate::manager::{AdvanceOutcome, ReweightOutcome};

pub use crate::factory::SmartPoolFactory;

pub use crate::ledger::InMemoryLedger;

pub use crate::pools::{SmartPool, WeightedPool};
