//! Pool implementations.
//!
//! | Type | Role |
//! |------|------|
//! | [`WeightedPool`] | Asset registry, pricing, swaps, joins and exits (bookkeeping only) |
//! | [`SmartPool`] | Rights, governance state machines, cap, whitelist, events, ledger settlement |
//!
//! [`ReentrancyLock`] and [`ReentrancyGuard`] back the scoped guard every
//! [`SmartPool`] operation holds while it calls the ledger.  Ledger calls go
//! through a checked, reversible settlement so a failed operation leaves
//! the ledger untouched.

mod guard;
mod settlement;
mod smart;
mod weighted;

#[cfg(test)]
mod proptest_properties;

pub use guard::{ReentrancyGuard, ReentrancyLock};
pub use smart::SmartPool;
pub use weighted::WeightedPool;
