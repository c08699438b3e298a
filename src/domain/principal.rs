//! Ledger account identities.

use core::fmt;

use super::TokenPair;

/// The identity of a party holding ledger balances.
///
/// Callers pass their principal explicitly into every mutating pool
/// operation. Pools hold their reserves under a principal derived from
/// their token pair, so a pool's account can never collide with a user
/// account or with another pool's account.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Principal, TokenId, TokenPair};
///
/// let alice = Principal::from_bytes([0xa1; 32]);
/// let pair = TokenPair::new(
///     TokenId::from_bytes([1u8; 32]),
///     TokenId::from_bytes([2u8; 32]),
/// ).expect("distinct");
///
/// assert!(!alice.is_pool());
/// assert!(Principal::pool(pair).is_pool());
/// assert_ne!(alice, Principal::pool(pair));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal(Kind);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Kind {
    Account([u8; 32]),
    Pool(TokenPair),
}

impl Principal {
    /// Creates an account principal from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Kind::Account(bytes))
    }

    /// Returns the principal that holds the reserves of the pool for `pair`.
    #[must_use]
    pub const fn pool(pair: TokenPair) -> Self {
        Self(Kind::Pool(pair))
    }

    /// Returns `true` if this principal belongs to a pool.
    #[must_use]
    pub const fn is_pool(&self) -> bool {
        matches!(self.0, Kind::Pool(_))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Kind::Account(bytes) => {
                write!(f, "account:")?;
                for byte in &bytes[..4] {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Kind::Pool(pair) => write!(f, "pool:{pair}"),
        }
    }
}
