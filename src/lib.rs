//! # Hydra DEX
//!
//! Constant-product AMM settlement engine: pools that hold two token
//! reserves, issue liquidity shares, and price swaps under `x · y = k`,
//! plus a registry that keeps exactly one pool per token pair.
//!
//! Pools never own balances. Every deposit, withdrawal and swap leg is a
//! transfer on a [`FungibleLedger`](ledger::FungibleLedger) supplied by
//! the host, and pools re-read their reserves from it after each
//! mutation. [`InMemoryLedger`](ledger::InMemoryLedger) is included for
//! tests and embedders without a ledger of their own.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_dex::prelude::*;
//!
//! // 1. Two tokens and a funded account on a shared ledger
//! let usdc = TokenId::from_bytes([1u8; 32]);
//! let weth = TokenId::from_bytes([2u8; 32]);
//! let alice = Principal::from_bytes([0xa1; 32]);
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! ledger.mint(usdc, &alice, Amount::new(1_000_000)).expect("mint");
//! ledger.mint(weth, &alice, Amount::new(1_000_000)).expect("mint");
//!
//! // 2. One pool per pair, created on demand
//! let registry = PoolRegistry::new(Arc::clone(&ledger));
//! let pool = registry.get_or_create_pool(usdc, weth).expect("valid pair");
//!
//! // 3. Seed liquidity: the first deposit mints √(x · y) shares
//! let shares = pool
//!     .add_liquidity(&alice, usdc, Amount::new(1_000), Amount::new(1_000))
//!     .expect("deposit");
//! assert_eq!(shares, Shares::new(1_000));
//!
//! // 4. Swap 100 USDC for WETH at the default 0.30% fee
//! let out = pool.swap(&alice, Amount::new(100), usdc, Amount::new(90)).expect("swap");
//! assert_eq!(out, Amount::new(90));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  get_or_create_pool / get_pool / all_pools
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ PoolRegistry │  RwLock<pair → PoolHandle>, creation order
//! └──────┬───────┘
//!        │ Arc<Pool<L>>
//!        ▼
//! ┌──────────────┐
//! │     Pool     │  Mutex<PoolState>, SwapPool + LiquidityPool
//! └──────┬───────┘
//!        │ transfer / balance_of
//!        ▼
//! ┌──────────────┐
//! │FungibleLedger│  host ledger or InMemoryLedger
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`TokenPair`](domain::TokenPair), etc. |
//! | [`math`]   | Checked integer helpers and constant-product formulas |
//! | [`config`] | [`PoolConfig`](config::PoolConfig): fee tier and validation |
//! | [`ledger`] | [`FungibleLedger`](ledger::FungibleLedger) seam and the in-memory ledger |
//! | [`traits`] | [`SwapPool`](traits::SwapPool) and [`LiquidityPool`](traits::LiquidityPool) |
//! | [`pools`]  | [`Pool`](pools::Pool), the constant-product implementation |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) and the [`AllPools`](registry::AllPools) iterator |
//! | [`error`]  | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber:
//! `debug` for completed mutations, `info` for pool creation, `warn` for
//! reversed transfers and `error` for invariant violations.

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
