//! The constant-product pool and its share accounting.
//!
//! [`Pool`] owns the lock and talks to the ledger; the accounting it
//! guards lives in a private `PoolState` that is pure and lock-free, so
//! pricing and share math can be tested without a ledger.

mod pool;
mod state;

#[cfg(test)]
mod proptest_properties;

pub use pool::Pool;
