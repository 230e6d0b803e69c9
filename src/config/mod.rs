//! Pool configuration structs.
//!
//! [`PoolParams`] is the constants value object (bounds, fee limits,
//! timelocks, pow limits) every pool carries.  [`PoolConfig`] is the
//! declarative blueprint the factory turns into a live pool.

mod pool_config;
mod pool_params;

pub use pool_config::PoolConfig;
pub use pool_params::PoolParams;
