//! Arithmetic for pool calculations.
//!
//! Amounts are `u128`; intermediate products are computed in 256 bits
//! (512 for `mul_div`) with [`ruint`], and only a final result that does
//! not fit back into `u128` surfaces as
//! [`DexError::Overflow`](crate::error::DexError::Overflow). Nothing
//! panics or saturates. All divisions floor.

pub mod constant_product;
mod integer;

pub use integer::{isqrt, mul_div, narrow, wide_product};
pub use ruint::aliases::U256;
