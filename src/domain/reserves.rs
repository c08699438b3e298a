//! Point-in-time views of pool state.

use super::{Amount, Shares, TokenId, TokenPair};
use crate::error::DexError;

/// A consistent snapshot of a pool's reserves and share supply.
///
/// Taken under the pool lock, so `reserve_a`, `reserve_b` and
/// `total_shares` always belong to the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Reserves {
    /// Reserve of the pair's first (lower) token.
    pub reserve_a: Amount,
    /// Reserve of the pair's second (higher) token.
    pub reserve_b: Amount,
    /// Outstanding share units.
    pub total_shares: Shares,
}

impl Reserves {
    /// Orders the reserves as `(reserve_in, reserve_out)` for a swap that
    /// sells `token_in`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidToken`] if `token_in` is not in `pair`.
    pub fn oriented(&self, pair: &TokenPair, token_in: &TokenId) -> Result<(Amount, Amount), DexError> {
        if pair.is_first(token_in)? {
            Ok((self.reserve_a, self.reserve_b))
        } else {
            Ok((self.reserve_b, self.reserve_a))
        }
    }
}

/// Token amounts paid out by a liquidity withdrawal, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Withdrawal {
    /// Amount of the pair's first token.
    pub amount_a: Amount,
    /// Amount of the pair's second token.
    pub amount_b: Amount,
}
