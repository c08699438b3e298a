//! Core trait abstractions for pool operations.
//!
//! [`SwapPool`] covers pricing and swap execution; [`LiquidityPool`]
//! extends it with share accounting. [`Pool`](crate::pools::Pool)
//! implements both, and callers can write code generic over the traits
//! without naming the ledger type.

mod liquidity_pool;
mod swap_pool;

pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
