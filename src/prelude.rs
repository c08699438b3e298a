//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```

pub use crate::domain::{
    Amount, BasisPoints, FeeTier, Principal, Reserves, Shares, TokenId, TokenPair, Withdrawal,
};

pub use crate::traits::{LiquidityPool, SwapPool};

pub use crate::config::PoolConfig;

pub use crate::error::{DexError, Result};

pub use crate::ledger::{FungibleLedger, InMemoryLedger, LedgerError};

pub use crate::pools::Pool;

pub use crate::registry::{AllPools, PoolHandle, PoolRegistry};
