//! Share-based liquidity provision extending [`SwapPool`].
//!
//! # Share Accounting Invariant
//!
//! Total shares only change through [`LiquidityPool::add_liquidity`] and
//! [`LiquidityPool::remove_liquidity`]. For every pool:
//!
//! ```text
//! total_shares = Σ share_balance(holder)
//! ```
//!
//! and total shares are zero exactly when both reserves are zero.

use super::SwapPool;
use crate::domain::{Amount, Principal, Shares, TokenId, Withdrawal};
use crate::error::DexError;

/// Liquidity provision for pools that issue fungible shares.
pub trait LiquidityPool: SwapPool {
    /// Deposits `amount_x` of `token_x` and `amount_y` of the other token
    /// from `caller`, minting shares to `caller`.
    ///
    /// The first deposit mints `floor(√(x · y))`. Later deposits mint the
    /// smaller of the two per-side ratios; any excess over the current
    /// ratio stays in the pool.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if either amount is zero.
    /// - [`DexError::InvalidToken`] if `token_x` is not in the pair.
    /// - [`DexError::InsufficientLiquidityMinted`] if no share would be minted.
    /// - [`DexError::InsufficientBalance`] or [`DexError::TransferFailed`]
    ///   if the ledger refuses a deposit.
    fn add_liquidity(
        &self,
        caller: &Principal,
        token_x: TokenId,
        amount_x: Amount,
        amount_y: Amount,
    ) -> Result<Shares, DexError>;

    /// Burns `shares` held by `caller` and pays out the proportional
    /// amounts of both tokens.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidShareAmount`] if `shares` is zero.
    /// - [`DexError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`DexError::ZeroWithdrawAmount`] if both amounts floor to zero.
    /// - [`DexError::TransferFailed`] if the ledger refuses a payout.
    fn remove_liquidity(&self, caller: &Principal, shares: Shares) -> Result<Withdrawal, DexError>;

    /// Returns the shares held by `owner` (zero if none).
    ///
    /// # Errors
    ///
    /// [`DexError::LockPoisoned`] if the pool's lock is poisoned.
    fn share_balance(&self, owner: &Principal) -> Result<Shares, DexError>;

    /// Returns the total shares outstanding.
    ///
    /// # Errors
    ///
    /// [`DexError::LockPoisoned`] if the pool's lock is poisoned.
    fn total_shares(&self) -> Result<Shares, DexError>;
}
