//! Swap pricing and execution.
//!
//! # Fee Invariant
//!
//! The fee is folded into the input before pricing, and the full input is
//! added to the reserve:
//!
//! ```text
//! in_after_fee = amount_in × (10_000 − fee_bps)
//! amount_out   = in_after_fee × R_out / (R_in × 10_000 + in_after_fee)
//! ```
//!
//! so `R_in × R_out` never decreases across a swap.
//!
//! # Dispatch Model
//!
//! Pools are generic over their ledger, not trait objects. Methods take
//! `&self`: implementations serialize mutations internally so a pool can
//! be shared across threads behind an `Arc`.

use crate::domain::{Amount, FeeTier, Principal, Reserves, TokenId, TokenPair};
use crate::error::DexError;

/// Pricing and swap execution for a two-token pool.
///
/// # Errors
///
/// Methods that can fail return [`Result<T, DexError>`]. Common variants:
///
/// - [`DexError::ZeroAmount`] for a zero input or output
/// - [`DexError::InvalidToken`] for a token outside the pair
/// - [`DexError::InsufficientReserves`] when a side is empty
pub trait SwapPool {
    /// Output of selling `input_amount` of `input_token`, without executing.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `input_amount` is zero.
    /// - [`DexError::InvalidToken`] if `input_token` is not in the pair.
    /// - [`DexError::InsufficientReserves`] if either reserve is zero.
    fn get_amount_out(&self, input_amount: Amount, input_token: TokenId) -> Result<Amount, DexError>;

    /// Smallest input that buys at least `output_amount` of `output_token`.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `output_amount` is zero.
    /// - [`DexError::InvalidToken`] if `output_token` is not in the pair.
    /// - [`DexError::InsufficientReserves`] if either reserve is zero or
    ///   `output_amount` is not below the output reserve.
    fn get_amount_in(&self, output_amount: Amount, output_token: TokenId) -> Result<Amount, DexError>;

    /// Amount of the other token matching `amount` of `token` at the
    /// current reserve ratio, ignoring fees.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAmount`] if `amount` is zero.
    /// - [`DexError::InvalidToken`] if `token` is not in the pair.
    /// - [`DexError::InsufficientReserves`] if either reserve is zero.
    fn quote(&self, amount: Amount, token: TokenId) -> Result<Amount, DexError>;

    /// Sells `input_amount` of `input_token` from `caller`, paying the
    /// output back to `caller`.
    ///
    /// Either every ledger transfer succeeds and the reserves move, or the
    /// pool is left unchanged.
    ///
    /// # Errors
    ///
    /// - Any error of [`get_amount_out`](Self::get_amount_out).
    /// - [`DexError::SlippageExceeded`] if the output is below `min_output`.
    /// - [`DexError::InsufficientOutput`] if the output floors to zero.
    /// - [`DexError::InsufficientBalance`] or [`DexError::TransferFailed`]
    ///   if the ledger refuses a leg.
    /// - [`DexError::InvariantViolation`] if `k` would decrease.
    fn swap(
        &self,
        caller: &Principal,
        input_amount: Amount,
        input_token: TokenId,
        min_output: Amount,
    ) -> Result<Amount, DexError>;

    /// Returns the canonically ordered token pair.
    #[must_use]
    fn token_pair(&self) -> TokenPair;

    /// Returns the fee tier applied to swaps.
    #[must_use]
    fn fee_tier(&self) -> FeeTier;

    /// Returns a consistent snapshot of both reserves and the share supply.
    ///
    /// # Errors
    ///
    /// [`DexError::LockPoisoned`] if the pool's lock is poisoned.
    fn reserves(&self) -> Result<Reserves, DexError>;
}
