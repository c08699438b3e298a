//! Unordered pair of distinct tokens in canonical order.

use core::fmt;

use super::TokenId;
use crate::error::DexError;

/// An unordered pair of distinct, non-null tokens.
///
/// The canonical ordering guarantees `first() < second()`, so `(A, B)` and
/// `(B, A)` build equal pairs and hash to the same registry key.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{TokenId, TokenPair};
///
/// let a = TokenId::from_bytes([1u8; 32]);
/// let b = TokenId::from_bytes([2u8; 32]);
///
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair, TokenPair::new(a, b).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token_a: TokenId,
    token_b: TokenId,
}

impl TokenPair {
    /// Creates a canonically-ordered `TokenPair`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidTokenPair`] if either token is null or
    /// both tokens are the same.
    pub fn new(x: TokenId, y: TokenId) -> Result<Self, DexError> {
        if x.is_null() || y.is_null() {
            return Err(DexError::InvalidTokenPair("null token identifier"));
        }
        if x == y {
            return Err(DexError::InvalidTokenPair(
                "token pair requires two distinct tokens",
            ));
        }

        let (token_a, token_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { token_a, token_b })
    }

    /// Returns the lower token.
    #[must_use]
    pub const fn first(&self) -> TokenId {
        self.token_a
    }

    /// Returns the higher token.
    #[must_use]
    pub const fn second(&self) -> TokenId {
        self.token_b
    }

    /// Returns `true` if `token` is the lower token of the pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidToken`] if `token` is not in the pair.
    pub fn is_first(&self, token: &TokenId) -> Result<bool, DexError> {
        if *token == self.token_a {
            Ok(true)
        } else if *token == self.token_b {
            Ok(false)
        } else {
            Err(DexError::InvalidToken)
        }
    }

    /// Returns the counterpart of `token` in this pair.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidToken`] if `token` is not in the pair.
    pub fn other(&self, token: &TokenId) -> Result<TokenId, DexError> {
        if self.is_first(token)? {
            Ok(self.token_b)
        } else {
            Ok(self.token_a)
        }
    }
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_a, self.token_b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tok(byte: u8) -> TokenId {
        TokenId::from_bytes([byte; 32])
    }

    #[test]
    fn sorts_reversed_input() {
        let Ok(pair) = TokenPair::new(tok(2), tok(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.first(), tok(1));
        assert_eq!(pair.second(), tok(2));
    }

    #[test]
    fn construction_is_commutative() {
        assert_eq!(TokenPair::new(tok(1), tok(2)), TokenPair::new(tok(2), tok(1)));
    }

    #[test]
    fn rejects_same_token() {
        let result = TokenPair::new(tok(1), tok(1));
        assert!(matches!(result, Err(DexError::InvalidTokenPair(_))));
    }

    #[test]
    fn rejects_null_token() {
        assert!(matches!(
            TokenPair::new(TokenId::NULL, tok(1)),
            Err(DexError::InvalidTokenPair(_))
        ));
        assert!(matches!(
            TokenPair::new(tok(1), TokenId::NULL),
            Err(DexError::InvalidTokenPair(_))
        ));
    }

    #[test]
    fn other_and_is_first() {
        let Ok(pair) = TokenPair::new(tok(1), tok(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(pair.other(&tok(1)), Ok(tok(2)));
        assert_eq!(pair.other(&tok(2)), Ok(tok(1)));
        assert_eq!(pair.is_first(&tok(1)), Ok(true));
        assert_eq!(pair.is_first(&tok(2)), Ok(false));
        assert_eq!(pair.other(&tok(3)), Err(DexError::InvalidToken));
    }
}
