//! 256-bit unsigned integer backing every fixed-point quantity.
//!
//! Intermediate products such as `a * b` before rescaling must fit in
//! this width; anything wider is reported as an overflow.

#![allow(clippy::all, clippy::indexing_slicing, clippy::panic)]

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer (little-endian limbs).
    pub struct U256(4);
}
