//! Generic construction trait for pool instantiation from configuration.
//!
//! [`FromConfig`] provides a uniform interface for creating pool state from
//! a validated configuration struct.  The
//! [`SmartPoolFactory`](crate::factory::SmartPoolFactory) builds the core
//! [`WeightedPool`](crate::pools::WeightedPool) through it before wrapping
//! it with rights, params, and a ledger.
//!
//! # Validation Contract
//!
//! Implementations **must** validate all configuration invariants during
//! construction.  A successfully constructed value is guaranteed to be in a
//! valid initial state: asset count in bounds, weights and balances in
//! bounds, total weight at most the maximum, swap fee in bounds.
//!
//! # No Generic Blanket Implementation
//!
//! There is no `impl<T> FromConfig<T>` blanket; every pairing is
//! implemented explicitly so that validation stays type-specific.

use crate::error::PoolError;

/// Generic construction trait for building a value from a configuration.
///
/// # Type Parameters
///
/// - `C`: the configuration type that fully describes the initial state.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for WeightedPool`
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// The configuration is taken by reference because it may be reused
    /// (e.g., for logging or retry).
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfiguration`] (or a more specific variant)
    ///   if any parameter is out of range or inconsistent.
    fn from_config(config: &C) -> Result<Self, PoolError>
    where
        Self: Sized;
}
