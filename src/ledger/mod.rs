//! The fungible-token ledger the pools settle against.
//!
//! Pools never hold balances themselves. Every deposit, withdrawal and swap
//! leg is a [`FungibleLedger::transfer`], and after each mutating call the
//! pool re-reads its reserves through [`FungibleLedger::balance_of`]. This
//! keeps the pool's books equal to ledger truth even when tokens are sent
//! to a pool's principal directly.
//!
//! Implementations must make each call atomic: a transfer either moves the
//! full amount or fails without effect. Methods take `&self` so a single
//! ledger can be shared by every pool; implementations synchronize
//! internally.
//!
//! [`InMemoryLedger`] is a complete reference implementation for tests,
//! demos, and hosts without a ledger of their own.

mod in_memory;

use thiserror::Error;

use crate::domain::{Amount, Principal, TokenId};

pub use in_memory::InMemoryLedger;

/// Reasons a ledger refuses an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The sender does not hold enough of the token.
    #[error("insufficient balance of {token}: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Token being moved.
        token: TokenId,
        /// Amount requested.
        needed: Amount,
        /// Amount held.
        available: Amount,
    },

    /// The spender's allowance does not cover a delegated transfer.
    #[error("insufficient allowance of {token}: needed {needed}, approved {approved}")]
    InsufficientAllowance {
        /// Token being moved.
        token: TokenId,
        /// Amount requested.
        needed: Amount,
        /// Amount approved.
        approved: Amount,
    },

    /// A balance or supply would exceed `u128::MAX`.
    #[error("ledger arithmetic overflow")]
    Overflow,

    /// Any other refusal by the host ledger.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Balance store consulted and mutated by pools.
pub trait FungibleLedger: Send + Sync {
    /// Moves `amount` of `token` from `from` to `to`.
    ///
    /// A zero amount is a successful no-op.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - Any other [`LedgerError`] the host raises; the transfer has no
    ///   effect in that case.
    fn transfer(
        &self,
        token: TokenId,
        from: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Returns the balance of `token` held by `owner`.
    fn balance_of(&self, token: TokenId, owner: &Principal) -> Amount;
}
