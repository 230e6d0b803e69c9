//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the value types that model a weighted pool:
//! fixed-point quantities, asset and account identities, bound asset
//! records, swap outcomes, and explicit rounding directions.

mod account_id;
mod asset;
mod asset_id;
mod fixed;
mod rounding;
mod swap_result;

pub use account_id::AccountId;
pub use asset::Asset;
pub use asset_id::AssetId;
pub use fixed::{Fixed, DECIMALS};
pub use rounding::Rounding;
pub use swap_result::SwapResult;

/// Host-supplied block (tick) counter.  Assumed monotonically
/// non-decreasing across calls on the same pool.
pub type BlockNumber = u64;
