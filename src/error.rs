//! Unified error types for the Hydra DEX library.
//!
//! All fallible operations across the crate return [`DexError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! # Error kinds
//!
//! | Kind | Variants | Recoverable |
//! |------|----------|-------------|
//! | Input validation | [`InvalidTokenPair`](DexError::InvalidTokenPair), [`ZeroAmount`](DexError::ZeroAmount), [`InvalidToken`](DexError::InvalidToken), [`InvalidShareAmount`](DexError::InvalidShareAmount), [`InvalidFee`](DexError::InvalidFee) | yes |
//! | Insufficient resource | [`InsufficientBalance`](DexError::InsufficientBalance), [`InsufficientShares`](DexError::InsufficientShares), [`InsufficientReserves`](DexError::InsufficientReserves), [`InsufficientLiquidityMinted`](DexError::InsufficientLiquidityMinted), [`InsufficientOutput`](DexError::InsufficientOutput), [`ZeroWithdrawAmount`](DexError::ZeroWithdrawAmount) | yes |
//! | Slippage | [`SlippageExceeded`](DexError::SlippageExceeded) | yes |
//! | Lookup | [`PoolNotFound`](DexError::PoolNotFound) | yes |
//! | Ledger | [`TransferFailed`](DexError::TransferFailed) | depends on host |
//! | Internal | [`InvariantViolation`](DexError::InvariantViolation), [`Overflow`](DexError::Overflow), [`LockPoisoned`](DexError::LockPoisoned) | no |
//!
//! Every failing operation leaves pool state untouched.

use thiserror::Error;

use crate::domain::{Amount, Shares};
use crate::ledger::LedgerError;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DexError>;

/// Every error the pool and registry can return.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// The two tokens are equal, or one of them is the null token.
    #[error("invalid token pair: {0}")]
    InvalidTokenPair(&'static str),

    /// An amount that must be positive was zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// The token is not one of the pool's two tokens.
    #[error("token is not part of the pool pair")]
    InvalidToken,

    /// A share amount of zero was supplied.
    #[error("share amount must be greater than zero")]
    InvalidShareAmount,

    /// The caller's ledger balance cannot cover a transfer.
    #[error("insufficient balance: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer required.
        needed: Amount,
        /// Amount the owner actually held.
        available: Amount,
    },

    /// The ledger refused a transfer for a reason other than balance.
    #[error("ledger transfer failed: {0}")]
    TransferFailed(String),

    /// The caller holds fewer shares than they tried to redeem.
    #[error("insufficient shares: requested {requested}, held {held}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: Shares,
        /// Shares the caller owns.
        held: Shares,
    },

    /// The pool has no reserves on one or both sides.
    #[error("insufficient reserves")]
    InsufficientReserves,

    /// The deposit is too small to mint a single share unit.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// The swap would pay out nothing.
    #[error("insufficient output amount")]
    InsufficientOutput,

    /// Burning the requested shares would return zero of both tokens.
    #[error("share amount too small to withdraw anything")]
    ZeroWithdrawAmount,

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: output {output} is below minimum {minimum}")]
    SlippageExceeded {
        /// Output the pool would pay.
        output: Amount,
        /// Minimum the caller accepted.
        minimum: Amount,
    },

    /// No pool exists for the requested pair.
    #[error("pool not found")]
    PoolNotFound,

    /// The fee tier cannot be used for pricing.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A post-condition of the constant-product model failed. Fatal.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// A result does not fit in `u128`.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// A thread panicked while holding a pool or registry lock.
    #[error("lock poisoned")]
    LockPoisoned,
}

impl DexError {
    /// Returns `true` for errors that indicate a defect rather than a
    /// rejected request. Callers should stop using the pool and investigate.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_) | Self::LockPoisoned)
    }
}

impl From<LedgerError> for DexError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                needed, available, ..
            } => Self::InsufficientBalance { needed, available },
            other => Self::TransferFailed(other.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for DexError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}
