//! Arithmetic and pricing utilities for the weighted pool.
//!
//! This module provides the 256-bit integer type behind [`Fixed`], the
//! deterministic fixed-point primitives, [`CheckedArithmetic`] for
//! chaining them, `div_round` for explicit division rounding, and the
//! [`BondingCurve`] formulas that price swaps and single-asset
//! joins/exits.
//!
//! # Layers
//!
//! | Module | Contents |
//! |--------|----------|
//! | `uint` | [`U256`] machine word |
//! | `rounding` | [`div_round`] |
//! | [`fixed_point`] | `mul`, `div`, `pow_int`, `pow`, `pow_approx` |
//! | `checked` | [`CheckedArithmetic`] method-call veneer |
//! | `bonding_curve` | [`BondingCurve`] spot price and trade sizes |
//!
//! [`Fixed`]: crate::domain::Fixed

mod bonding_curve;
mod checked;
pub mod fixed_point;
mod rounding;
mod uint;

pub use bonding_curve::{BondingCurve, EXIT_FEE};
pub use checked::CheckedArithmetic;
pub use fixed_point::PowLimits;
pub use rounding::div_round;
pub use uint::U256;
